// Controller over the SQLite store, including the configured
// ownership failure

mod common;

use common::{alice, bob, form};
use snippets_core::{ExErrorKind, OwnershipFailure, SnippetStore};
use snippets_engine::moderation::set_approved;
use snippets_engine::{EngineConfig, SnippetAccessController};
use tempfile::TempDir;

#[test]
fn test_full_lifecycle_on_disk() {
    // Given: A controller over a fresh database file
    let dir = TempDir::new().unwrap();
    let mut ctl =
        SnippetAccessController::open(&dir.path().join("store.db"), EngineConfig::default())
            .unwrap();

    // When: A creates, gets approved, then updates a snippet
    let id = ctl
        .create(Some(&alice()), &form("foo", "body", "python web"))
        .unwrap();
    set_approved(ctl.store_mut(), &id, true).unwrap();
    ctl.update(Some(&alice()), &id, &form("foo v2", "body v2", "rust"))
        .unwrap();

    // Then: B reads the updated, still approved snippet
    let detail = ctl.get_one(Some(&bob()), &id).unwrap();
    assert_eq!(detail.snippet.title, "foo v2");
    assert!(detail.snippet.approved);
    assert_eq!(detail.tags, vec!["rust"]);

    // When: A deletes it
    ctl.delete(Some(&alice()), &id).unwrap();

    // Then: It is gone along with its tags
    assert_eq!(
        ctl.get_one(Some(&bob()), &id).unwrap_err().kind(),
        ExErrorKind::NotFound
    );
    assert!(ctl.store().tags_for(&id).unwrap().is_empty());
}

#[test]
fn test_forbidden_ownership_failure_on_disk() {
    let dir = TempDir::new().unwrap();
    let config = EngineConfig::from_toml_str(r#"ownership_failure = "forbidden""#).unwrap();
    let mut ctl = SnippetAccessController::open(&dir.path().join("store.db"), config).unwrap();
    let id = ctl.create(Some(&alice()), &form("foo", "body", "")).unwrap();

    let err = ctl
        .update(Some(&bob()), &id, &form("hacked", "hacked", ""))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);
    assert_eq!(err.code(), "ERR_FORBIDDEN");

    let snippet = ctl.store().get_by_id(&id).unwrap().unwrap();
    assert_eq!(snippet.title, "foo");
    assert_eq!(ctl.config().ownership_failure, OwnershipFailure::Forbidden);
}

#[test]
fn test_form_limits_come_from_config() {
    let dir = TempDir::new().unwrap();
    let config = EngineConfig::from_toml_str("[form]\nmax_tags = 1\n").unwrap();
    let mut ctl = SnippetAccessController::open(&dir.path().join("store.db"), config).unwrap();

    let err = ctl
        .create(Some(&alice()), &form("foo", "body", "a b"))
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Validation);
    assert!(!err.field_errors().unwrap().get("tags").is_empty());
}
