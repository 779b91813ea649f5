use crate::errors::ExError;
use crate::model::{NewSnippet, Snippet, SnippetId, SnippetPatch};
use crate::query::SnippetQuery;

/// Persistence seam for snippets
///
/// Each call is atomic on its own: a snippet row and its tags are written
/// together or not at all. No call spans several snippets, so callers never
/// need a transaction. Reads see earlier writes made through the same store.
pub trait SnippetStore {
    /// Snippets matching `query`, in the query's order
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the backing store fails.
    fn find(&self, query: &SnippetQuery) -> Result<Vec<Snippet>, ExError>;

    /// # Errors
    ///
    /// Returns `Persistence` if the backing store fails.
    fn get_by_id(&self, id: &str) -> Result<Option<Snippet>, ExError>;

    /// Resolved tag list of a snippet, sorted; empty for unknown ids
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the backing store fails.
    fn tags_for(&self, id: &str) -> Result<Vec<String>, ExError>;

    /// Persist a new snippet, assigning its id and `created` timestamp
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the backing store fails.
    fn insert(&mut self, record: NewSnippet) -> Result<SnippetId, ExError>;

    /// Overwrite the caller-writable fields and replace the tag set
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no snippet has `id`.
    fn update(&mut self, id: &str, patch: SnippetPatch) -> Result<(), ExError>;

    /// Remove a snippet and its tags permanently
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no snippet has `id`.
    fn delete(&mut self, id: &str) -> Result<(), ExError>;

    /// Moderation hook; never reachable through the access controller
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no snippet has `id`.
    fn set_approved(&mut self, id: &str, approved: bool) -> Result<(), ExError>;
}
