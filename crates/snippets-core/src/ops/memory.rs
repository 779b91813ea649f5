use std::collections::HashMap;

use crate::errors::{ExError, Result, SnippetError};
use crate::model::{NewSnippet, Snippet, SnippetId, SnippetPatch};
use crate::ops::SnippetStore;
use crate::query::SnippetQuery;

/// In-memory snippet store
///
/// HashMap-backed and single-threaded. Used by tests and wherever a
/// throwaway store is enough.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snippets: HashMap<SnippetId, Snippet>,
    tags: HashMap<SnippetId, Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed snippet as-is, bypassing id and timestamp
    /// assignment. Test setup uses this to control `created`.
    pub fn insert_snippet(&mut self, snippet: Snippet, tags: Vec<String>) {
        self.tags.insert(snippet.id.clone(), normalize(tags));
        self.snippets.insert(snippet.id.clone(), snippet);
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Snippet> {
        self.snippets
            .get_mut(id)
            .ok_or_else(|| SnippetError::SnippetNotFound {
                snippet_id: id.to_string(),
            })
    }
}

fn normalize(mut tags: Vec<String>) -> Vec<String> {
    tags.sort();
    tags.dedup();
    tags
}

impl SnippetStore for MemoryStore {
    fn find(&self, query: &SnippetQuery) -> std::result::Result<Vec<Snippet>, ExError> {
        let mut found: Vec<Snippet> = self
            .snippets
            .values()
            .filter(|s| query.matches(s))
            .cloned()
            .collect();
        query.sort(&mut found);
        Ok(found)
    }

    fn get_by_id(&self, id: &str) -> std::result::Result<Option<Snippet>, ExError> {
        Ok(self.snippets.get(id).cloned())
    }

    fn tags_for(&self, id: &str) -> std::result::Result<Vec<String>, ExError> {
        Ok(self.tags.get(id).cloned().unwrap_or_default())
    }

    fn insert(&mut self, record: NewSnippet) -> std::result::Result<SnippetId, ExError> {
        let (snippet, tags) = record.into_snippet();
        let id = snippet.id.clone();
        self.insert_snippet(snippet, tags);
        Ok(id)
    }

    fn update(&mut self, id: &str, patch: SnippetPatch) -> std::result::Result<(), ExError> {
        self.get_mut(id)?.apply_patch(&patch);
        self.tags.insert(id.to_string(), normalize(patch.tags));
        Ok(())
    }

    fn delete(&mut self, id: &str) -> std::result::Result<(), ExError> {
        self.snippets
            .remove(id)
            .ok_or_else(|| ExError::snippet_not_found(id))?;
        self.tags.remove(id);
        Ok(())
    }

    fn set_approved(&mut self, id: &str, approved: bool) -> std::result::Result<(), ExError> {
        self.get_mut(id)?.approved = approved;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use crate::model::UserId;

    fn new_record(author: &str, title: &str, tags: &[&str]) -> NewSnippet {
        NewSnippet {
            author: UserId::new(author),
            title: title.to_string(),
            content: "body".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.find(&SnippetQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = MemoryStore::new();
        let id = store.insert(new_record("alice", "hello", &["b", "a"])).unwrap();

        let snippet = store.get_by_id(&id).unwrap().unwrap();
        assert_eq!(snippet.title, "hello");
        assert!(!snippet.approved);
        assert_eq!(store.tags_for(&id).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_update_replaces_tags() {
        let mut store = MemoryStore::new();
        let id = store.insert(new_record("alice", "hello", &["a"])).unwrap();

        store
            .update(
                &id,
                SnippetPatch {
                    title: "hi".into(),
                    content: "new".into(),
                    tags: vec!["z".into()],
                },
            )
            .unwrap();

        assert_eq!(store.get_by_id(&id).unwrap().unwrap().title, "hi");
        assert_eq!(store.tags_for(&id).unwrap(), vec!["z"]);
    }

    #[test]
    fn test_missing_ids_fail_not_found() {
        let mut store = MemoryStore::new();
        let patch = SnippetPatch {
            title: "t".into(),
            content: "c".into(),
            tags: vec![],
        };

        assert_eq!(
            store.update("nope", patch).unwrap_err().kind(),
            ExErrorKind::NotFound
        );
        assert_eq!(store.delete("nope").unwrap_err().kind(), ExErrorKind::NotFound);
        assert_eq!(
            store.set_approved("nope", true).unwrap_err().kind(),
            ExErrorKind::NotFound
        );
    }

    #[test]
    fn test_delete_removes_tags() {
        let mut store = MemoryStore::new();
        let id = store.insert(new_record("alice", "hello", &["a"])).unwrap();

        store.delete(&id).unwrap();

        assert!(store.get_by_id(&id).unwrap().is_none());
        assert!(store.tags_for(&id).unwrap().is_empty());
    }
}
