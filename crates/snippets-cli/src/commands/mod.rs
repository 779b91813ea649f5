//! CLI command implementations

use std::path::PathBuf;

use snippets_engine::{EngineConfig, SnippetAccessController};
use snippets_store::SqliteSnippetStore;

pub mod admin;
pub mod snippet;

/// Flags shared by every command
#[derive(Debug)]
pub struct GlobalArgs {
    pub db: PathBuf,
    pub user: Option<String>,
    pub config: Option<PathBuf>,
    pub trace_id: Option<String>,
}

impl GlobalArgs {
    pub fn engine_config(&self) -> Result<EngineConfig, Box<dyn std::error::Error>> {
        match &self.config {
            Some(path) => Ok(EngineConfig::load(path)?),
            None => Ok(EngineConfig::default()),
        }
    }

    pub fn open_controller(
        &self,
    ) -> Result<SnippetAccessController<SqliteSnippetStore>, Box<dyn std::error::Error>> {
        let config = self.engine_config()?;
        Ok(SnippetAccessController::open(&self.db, config)?)
    }
}
