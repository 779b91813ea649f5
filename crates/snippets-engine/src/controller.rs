//! Access-checked snippet operations with boundary logging
//!
//! ## Logging Ownership
//!
//! The controller owns lifecycle logging for every operation it exposes:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Stores below it use only `tracing::debug!()`.
//!
//! ## Check ordering
//!
//! Authentication comes first, then existence and ownership, then form
//! validation. A caller who may not modify a snippet never learns whether
//! their submission would have been valid.

use std::path::Path;
use std::time::Instant;

use snippets_core::errors::ExError;
use snippets_core::forms::{render_tags, SnippetForm, FIELD_CONTENT, FIELD_TAGS, FIELD_TITLE};
use snippets_core::{
    can_modify, can_view, log_op_end, log_op_error, log_op_start, FormData, Identity,
    NewSnippet, Snippet, SnippetDetail, SnippetError, SnippetId, SnippetPatch, SnippetQuery,
    SnippetStore,
};
use snippets_store::SqliteSnippetStore;

use crate::config::EngineConfig;

type Result<T> = std::result::Result<T, ExError>;

/// A snippet loaded for editing, with the form's initial values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub snippet: Snippet,
    pub initial: FormData,
}

/// Applies the access policy to every snippet operation
///
/// Holds nothing between calls besides the store and configuration. Each
/// operation takes the caller explicitly; `None` is an unauthenticated
/// request and fails before anything else is looked at.
pub struct SnippetAccessController<S: SnippetStore> {
    store: S,
    config: EngineConfig,
}

impl SnippetAccessController<SqliteSnippetStore> {
    /// Controller over a migrated SQLite database at `path`
    ///
    /// # Errors
    ///
    /// Returns `Io` or `Persistence` if the database cannot be opened or
    /// migrated.
    pub fn open(path: &Path, config: EngineConfig) -> Result<Self> {
        Ok(Self::new(SqliteSnippetStore::open(path)?, config))
    }
}

impl<S: SnippetStore> SnippetAccessController<S> {
    pub fn new(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Direct store access, for moderation and test setup
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Approved snippets, newest first
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` without a caller, or `Persistence`.
    pub fn list_public(&self, caller: Option<&Identity>) -> Result<Vec<Snippet>> {
        let op = "list_public";
        let who = caller_name(caller);
        log_op_start!(op, caller = who);
        let start = Instant::now();

        let result = authenticate(caller).and_then(|_| self.store.find(&SnippetQuery::public()));

        finish(op, who, None, start, result, |snippets| {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                caller = who,
                count = snippets.len()
            );
        })
    }

    /// The caller's own snippets, approved or not, newest first
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` without a caller, or `Persistence`.
    pub fn list_mine(&self, caller: Option<&Identity>) -> Result<Vec<Snippet>> {
        let op = "list_mine";
        let who = caller_name(caller);
        log_op_start!(op, caller = who);
        let start = Instant::now();

        let result = authenticate(caller).and_then(|caller| {
            self.store
                .find(&SnippetQuery::authored_by(caller.user_id.clone()))
        });

        finish(op, who, None, start, result, |snippets| {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                caller = who,
                count = snippets.len()
            );
        })
    }

    /// One snippet with its tags
    ///
    /// # Errors
    ///
    /// Returns `NotFound` both when the snippet is absent and when it is
    /// unapproved and the caller is not its author.
    pub fn get_one(&self, caller: Option<&Identity>, id: &str) -> Result<SnippetDetail> {
        let op = "get_one";
        let who = caller_name(caller);
        log_op_start!(op, caller = who, snippet_id = id);
        let start = Instant::now();

        let result = self.get_one_impl(caller, id);

        finish(op, who, Some(id), start, result, |_| {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                caller = who,
                snippet_id = id
            );
        })
    }

    fn get_one_impl(&self, caller: Option<&Identity>, id: &str) -> Result<SnippetDetail> {
        let caller = authenticate(caller)?;
        let snippet = self
            .store
            .get_by_id(id)?
            .filter(|snippet| can_view(caller, snippet))
            .ok_or_else(|| ExError::snippet_not_found(id))?;
        let tags = self.store.tags_for(id)?;
        Ok(SnippetDetail { snippet, tags })
    }

    /// Validate `form` and store a new unapproved snippet owned by the caller
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated`, `Validation` with per-field messages, or
    /// `Persistence`.
    pub fn create(&mut self, caller: Option<&Identity>, form: &FormData) -> Result<SnippetId> {
        let op = "create";
        let who = caller_name(caller);
        log_op_start!(op, caller = who);
        let start = Instant::now();

        let result = self.create_impl(caller, form);

        finish(op, who, None, start, result, |id| {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                caller = who,
                snippet_id = id.as_str()
            );
        })
    }

    fn create_impl(&mut self, caller: Option<&Identity>, form: &FormData) -> Result<SnippetId> {
        let caller = authenticate(caller)?;
        let cleaned = SnippetForm::new(form, &self.config.form).clean()?;

        self.store.insert(NewSnippet {
            author: caller.user_id.clone(),
            title: cleaned.title,
            content: cleaned.content,
            tags: cleaned.tags,
        })
    }

    /// Load a snippet the caller may edit, with initial form values
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated`, `NotFound`, or the configured ownership
    /// failure for non-authors.
    pub fn edit_form(&self, caller: Option<&Identity>, id: &str) -> Result<EditForm> {
        let op = "edit_form";
        let who = caller_name(caller);
        log_op_start!(op, caller = who, snippet_id = id);
        let start = Instant::now();

        let result = self.edit_form_impl(caller, id);

        finish(op, who, Some(id), start, result, |_| {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                caller = who,
                snippet_id = id
            );
        })
    }

    fn edit_form_impl(&self, caller: Option<&Identity>, id: &str) -> Result<EditForm> {
        let caller = authenticate(caller)?;
        let snippet = self.owned_snippet(caller, id)?;
        let tags = self.store.tags_for(id)?;

        let initial = FormData::from_pairs([
            (FIELD_TITLE, snippet.title.clone()),
            (FIELD_CONTENT, snippet.content.clone()),
            (FIELD_TAGS, render_tags(&tags)),
        ]);
        Ok(EditForm { snippet, initial })
    }

    /// Overwrite title, content and tags of the caller's snippet
    ///
    /// `author`, `approved` and `created` are never touched.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated`, `NotFound`, the configured ownership
    /// failure, then `Validation`, in that order of precedence.
    pub fn update(&mut self, caller: Option<&Identity>, id: &str, form: &FormData) -> Result<()> {
        let op = "update";
        let who = caller_name(caller);
        log_op_start!(op, caller = who, snippet_id = id);
        let start = Instant::now();

        let result = self.update_impl(caller, id, form);

        finish(op, who, Some(id), start, result, |_| {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                caller = who,
                snippet_id = id
            );
        })
    }

    fn update_impl(&mut self, caller: Option<&Identity>, id: &str, form: &FormData) -> Result<()> {
        let caller = authenticate(caller)?;
        self.owned_snippet(caller, id)?;
        let cleaned = SnippetForm::new(form, &self.config.form).clean()?;

        self.store.update(
            id,
            SnippetPatch {
                title: cleaned.title,
                content: cleaned.content,
                tags: cleaned.tags,
            },
        )
    }

    /// Load a snippet the caller may delete, for a confirmation step
    ///
    /// # Errors
    ///
    /// As [`SnippetAccessController::edit_form`].
    pub fn confirm_delete(&self, caller: Option<&Identity>, id: &str) -> Result<Snippet> {
        let op = "confirm_delete";
        let who = caller_name(caller);
        log_op_start!(op, caller = who, snippet_id = id);
        let start = Instant::now();

        let result = authenticate(caller).and_then(|caller| self.owned_snippet(caller, id));

        finish(op, who, Some(id), start, result, |_| {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                caller = who,
                snippet_id = id
            );
        })
    }

    /// Permanently remove the caller's snippet and its tags
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated`, `NotFound`, or the configured ownership
    /// failure.
    pub fn delete(&mut self, caller: Option<&Identity>, id: &str) -> Result<()> {
        let op = "delete";
        let who = caller_name(caller);
        log_op_start!(op, caller = who, snippet_id = id);
        let start = Instant::now();

        let result = self.delete_impl(caller, id);

        finish(op, who, Some(id), start, result, |_| {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                caller = who,
                snippet_id = id
            );
        })
    }

    fn delete_impl(&mut self, caller: Option<&Identity>, id: &str) -> Result<()> {
        let caller = authenticate(caller)?;
        self.owned_snippet(caller, id)?;
        self.store.delete(id)
    }

    /// The snippet, if it exists and `caller` may modify it
    fn owned_snippet(&self, caller: &Identity, id: &str) -> Result<Snippet> {
        let snippet = self
            .store
            .get_by_id(id)?
            .ok_or_else(|| ExError::snippet_not_found(id))?;

        if !can_modify(caller, &snippet) {
            return Err(self.config.ownership_failure.error_for(id).into());
        }
        Ok(snippet)
    }
}

fn authenticate(caller: Option<&Identity>) -> Result<&Identity> {
    caller.ok_or_else(|| SnippetError::Unauthenticated.into())
}

fn caller_name(caller: Option<&Identity>) -> &str {
    caller.map_or("anonymous", |c| c.user_id.as_str())
}

/// Log the outcome of `op` and tag any error with the operation name
fn finish<T>(
    op: &'static str,
    who: &str,
    id: Option<&str>,
    start: Instant,
    result: Result<T>,
    on_success: impl FnOnce(&T),
) -> Result<T> {
    match result {
        Ok(value) => {
            on_success(&value);
            Ok(value)
        }
        Err(err) => {
            let err = err.with_op(op);
            log_op_error!(
                op,
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                caller = who,
                snippet_id = id.unwrap_or_default()
            );
            Err(err)
        }
    }
}
