//! Engine configuration, loaded from TOML
//!
//! ```toml
//! ownership_failure = "forbidden"
//!
//! [form]
//! max_tags = 5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use snippets_core::errors::{ExError, ExErrorKind};
use snippets_core::{FormLimits, OwnershipFailure};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// How a non-author's modify attempt is reported
    pub ownership_failure: OwnershipFailure,
    pub form: FormLimits,
}

impl EngineConfig {
    /// Parse a TOML document; missing keys take their defaults
    ///
    /// # Errors
    ///
    /// Returns `Config` if the document is not valid TOML or names an
    /// unknown key or value.
    pub fn from_toml_str(source: &str) -> Result<Self, ExError> {
        toml::from_str(source).map_err(|e| {
            ExError::new(ExErrorKind::Config)
                .with_op("config_parse")
                .with_message(e.to_string())
        })
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, otherwise as
    /// [`EngineConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ExError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("config_load")
                .with_entity_id(path.display().to_string())
                .with_message(e.to_string())
        })?;
        Self::from_toml_str(&source)
    }
}
