use chrono::{Duration, TimeZone, Utc};
use snippets_core::{MemoryStore, Snippet, UserId};

/// Create an empty MemoryStore for testing
#[allow(dead_code)]
pub fn new_store() -> MemoryStore {
    MemoryStore::new()
}

/// Insert a snippet with a controlled creation time, bypassing `insert`
///
/// `minute` offsets `created` from a fixed epoch so ordering is predictable.
#[allow(dead_code)]
pub fn seed_snippet(
    store: &mut MemoryStore,
    author: &str,
    approved: bool,
    minute: i64,
    tags: &[&str],
) -> String {
    let mut snippet = Snippet::new(
        UserId::new(author),
        format!("{} #{}", author, minute),
        "content".to_string(),
    );
    snippet.approved = approved;
    snippet.created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minute);
    snippet.updated = snippet.created;
    let id = snippet.id.clone();
    store.insert_snippet(snippet, tags.iter().map(|t| t.to_string()).collect());
    id
}
