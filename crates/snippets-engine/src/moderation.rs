//! Moderation commands
//!
//! Approval is outside the access controller: no caller-facing operation can
//! change it. These handlers are for operators.

use std::time::Instant;

use snippets_core::errors::ExError;
use snippets_core::{log_op_end, log_op_error, log_op_start, SnippetStore};

/// Set the approval flag of a snippet
///
/// # Errors
///
/// Returns `NotFound` if no snippet has `id`.
pub fn set_approved<S: SnippetStore>(
    store: &mut S,
    id: &str,
    approved: bool,
) -> Result<(), ExError> {
    let op = if approved { "approve" } else { "unapprove" };
    log_op_start!(op, snippet_id = id);
    let start = Instant::now();

    store
        .set_approved(id, approved)
        .map_err(|e| {
            let e = e.with_op(op);
            log_op_error!(
                op,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                snippet_id = id
            );
            e
        })?;

    log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        snippet_id = id
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snippets_core::{ExErrorKind, MemoryStore, NewSnippet, UserId};

    #[test]
    fn test_approve_and_unapprove() {
        let mut store = MemoryStore::new();
        let id = store
            .insert(NewSnippet {
                author: UserId::new("alice"),
                title: "t".into(),
                content: "c".into(),
                tags: vec![],
            })
            .unwrap();

        set_approved(&mut store, &id, true).unwrap();
        assert!(store.get_by_id(&id).unwrap().unwrap().approved);

        set_approved(&mut store, &id, false).unwrap();
        assert!(!store.get_by_id(&id).unwrap().unwrap().approved);
    }

    #[test]
    fn test_missing_snippet() {
        let mut store = MemoryStore::new();
        let err = set_approved(&mut store, "missing", true).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.op(), Some("approve"));
    }
}
