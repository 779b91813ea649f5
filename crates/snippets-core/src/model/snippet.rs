use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identity::UserId;

/// Snippet identifier (UUID v7 string)
pub type SnippetId = String;

/// A persisted, owned unit of text content
///
/// `author`, `created` and `id` are fixed at creation. `approved` is only
/// ever changed by moderation. Tags are a separate relation and are not
/// carried here; see [`SnippetDetail`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: SnippetId,
    pub author: UserId,
    pub title: String,
    pub content: String,
    pub approved: bool,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Snippet {
    /// Create an unapproved snippet with a fresh id and current timestamps
    pub fn new(author: UserId, title: String, content: String) -> Self {
        let now = now_millis();
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            author,
            title,
            content,
            approved: false,
            created: now,
            updated: now,
        }
    }

    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        &self.author == user_id
    }

    /// Apply a caller patch. Only title and content live on the record.
    pub fn apply_patch(&mut self, patch: &SnippetPatch) {
        self.title = patch.title.clone();
        self.content = patch.content.clone();
        self.updated = now_millis();
    }
}

/// Record handed to a store on creation
///
/// Carries no `approved` flag: new snippets always start unapproved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSnippet {
    pub author: UserId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl NewSnippet {
    /// Materialize the record, assigning id and timestamps
    pub fn into_snippet(self) -> (Snippet, Vec<String>) {
        let snippet = Snippet::new(self.author, self.title, self.content);
        (snippet, self.tags)
    }
}

/// The caller-writable fields of a snippet; the tag set is replaced whole
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetPatch {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// A snippet together with its resolved tag list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetDetail {
    #[serde(flatten)]
    pub snippet: Snippet,
    pub tags: Vec<String>,
}

/// Current time truncated to whole milliseconds, the precision stores keep
pub fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_snippet_is_unapproved() {
        let snippet = Snippet::new(UserId::new("alice"), "t".into(), "c".into());

        assert!(!snippet.approved);
        assert!(snippet.is_authored_by(&UserId::new("alice")));
        assert!(!snippet.is_authored_by(&UserId::new("bob")));
        assert_eq!(snippet.created, snippet.updated);
        assert_eq!(snippet.created.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn test_apply_patch_keeps_identity_fields() {
        let mut snippet = Snippet::new(UserId::new("alice"), "old".into(), "old".into());
        let before = snippet.clone();

        snippet.apply_patch(&SnippetPatch {
            title: "new title".into(),
            content: "new content".into(),
            tags: vec!["rust".into()],
        });

        assert_eq!(snippet.title, "new title");
        assert_eq!(snippet.content, "new content");
        assert_eq!(snippet.id, before.id);
        assert_eq!(snippet.author, before.author);
        assert_eq!(snippet.created, before.created);
        assert_eq!(snippet.approved, before.approved);
        assert!(snippet.updated >= before.updated);
    }

    #[test]
    fn test_detail_serializes_flat() {
        let snippet = Snippet::new(UserId::new("alice"), "t".into(), "c".into());
        let detail = SnippetDetail {
            snippet,
            tags: vec!["a".into()],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["title"], "t");
        assert_eq!(json["author"], "alice");
        assert_eq!(json["tags"][0], "a");
    }
}
