//! SQLite failures as `ExError`
//!
//! Every failure names the store operation that hit it; failures on one
//! snippet also carry its id as the entity id.

use rusqlite::ErrorCode;
use snippets_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Map a SQLite failure during `op`
pub fn sqlite(op: &'static str) -> impl Fn(rusqlite::Error) -> ExError {
    move |err| {
        ExError::new(kind_of(&err))
            .with_op(op)
            .with_message(err.to_string())
    }
}

/// Map a SQLite failure during `op` on the snippet `snippet_id`
pub fn on_snippet<'a>(
    op: &'static str,
    snippet_id: &'a str,
) -> impl Fn(rusqlite::Error) -> ExError + 'a {
    move |err| sqlite(op)(err).with_entity_id(snippet_id)
}

/// Foreign-key, uniqueness and NOT NULL failures are constraint violations
fn kind_of(err: &rusqlite::Error) -> ExErrorKind {
    match err.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => ExErrorKind::ConstraintViolation,
        _ => ExErrorKind::Persistence,
    }
}
