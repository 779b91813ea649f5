//! Authorization policy for snippets
//!
//! Two pure predicates decide every access question. There is no role or
//! group model: the author may do everything, everyone else may only read
//! approved snippets.

use serde::{Deserialize, Serialize};

use crate::errors::SnippetError;
use crate::model::{Identity, Snippet};

/// Whether `caller` may update or delete `snippet`
pub fn can_modify(caller: &Identity, snippet: &Snippet) -> bool {
    snippet.is_authored_by(&caller.user_id)
}

/// Whether `caller` may read `snippet`
pub fn can_view(caller: &Identity, snippet: &Snippet) -> bool {
    snippet.approved || can_modify(caller, snippet)
}

/// How a modify attempt by a non-author is reported
///
/// `NotFound` makes the failure identical to an absent snippet, matching
/// the read path. `Forbidden` reveals that the snippet exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipFailure {
    #[default]
    NotFound,
    Forbidden,
}

impl OwnershipFailure {
    /// The error a non-author receives for `snippet_id`
    pub fn error_for(self, snippet_id: &str) -> SnippetError {
        match self {
            OwnershipFailure::NotFound => SnippetError::SnippetNotFound {
                snippet_id: snippet_id.to_string(),
            },
            OwnershipFailure::Forbidden => SnippetError::NotOwner {
                snippet_id: snippet_id.to_string(),
            },
        }
    }
}
