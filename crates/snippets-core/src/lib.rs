//! Snippets Core - domain kernel for the snippet-sharing service
//!
//! This crate provides:
//! - The `Snippet` and `Identity` models
//! - The two authorization predicates (`can_view`, `can_modify`)
//! - A typed listing query (`SnippetQuery`)
//! - Form cleaning and tag parsing for snippet submissions
//! - The `SnippetStore` persistence seam and an in-memory implementation
//! - The structured error facility and the logging facility
//!
//! Nothing here performs I/O beyond logging; SQLite lives in `snippets-store`
//! and request orchestration in `snippets-engine`.

pub mod errors;
pub mod forms;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod policy;
pub mod query;

// Used by the logging macros so callers need no direct dependency.
#[doc(hidden)]
pub use snippets_core_types;
#[doc(hidden)]
pub use tracing;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, SnippetError};
pub use forms::{FieldErrors, FormData, FormLimits};
pub use model::{Identity, NewSnippet, Snippet, SnippetDetail, SnippetId, SnippetPatch, UserId};
pub use ops::{MemoryStore, SnippetStore};
pub use policy::{can_modify, can_view, OwnershipFailure};
pub use query::{SnippetOrder, SnippetQuery};
