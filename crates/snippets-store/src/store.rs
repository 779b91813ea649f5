//! SQLite-backed `SnippetStore`

#![allow(clippy::result_large_err)]

use crate::db;
use crate::errors::{sqlite, Result};
use crate::migrations::apply_migrations;
use crate::repo::SqliteRepo;
use rusqlite::Connection;
use snippets_core::errors::ExError;
use snippets_core::model::{NewSnippet, Snippet, SnippetId, SnippetPatch};
use snippets_core::query::SnippetQuery;
use snippets_core::SnippetStore;
use std::path::Path;

/// Snippet store over a single SQLite connection
///
/// Every constructor brings the schema up to date before returning.
pub struct SqliteSnippetStore {
    conn: Connection,
}

impl SqliteSnippetStore {
    /// Open (or create) a database file and migrate it
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_connection(db::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(db::open_in_memory()?)
    }

    pub fn from_connection(mut conn: Connection) -> Result<Self> {
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// Underlying connection, for inspection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl SnippetStore for SqliteSnippetStore {
    fn find(&self, query: &SnippetQuery) -> Result<Vec<Snippet>> {
        SqliteRepo::find_snippets(&self.conn, query)
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Snippet>> {
        SqliteRepo::get_snippet(&self.conn, id)
    }

    fn tags_for(&self, id: &str) -> Result<Vec<String>> {
        SqliteRepo::load_tags(&self.conn, id)
    }

    fn insert(&mut self, record: NewSnippet) -> Result<SnippetId> {
        let (snippet, tags) = record.into_snippet();

        let tx = self.conn.transaction().map_err(sqlite("begin"))?;
        SqliteRepo::persist_snippet(&tx, &snippet)?;
        SqliteRepo::replace_tags(&tx, &snippet.id, &tags)?;
        tx.commit().map_err(sqlite("commit"))?;

        Ok(snippet.id)
    }

    fn update(&mut self, id: &str, patch: SnippetPatch) -> Result<()> {
        let tx = self.conn.transaction().map_err(sqlite("begin"))?;

        let mut snippet =
            SqliteRepo::get_snippet(&tx, id)?.ok_or_else(|| ExError::snippet_not_found(id))?;
        snippet.apply_patch(&patch);
        SqliteRepo::persist_snippet(&tx, &snippet)?;
        SqliteRepo::replace_tags(&tx, id, &patch.tags)?;

        tx.commit().map_err(sqlite("commit"))?;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let tx = self.conn.transaction().map_err(sqlite("begin"))?;

        SqliteRepo::delete_tags(&tx, id)?;
        if !SqliteRepo::delete_snippet(&tx, id)? {
            return Err(ExError::snippet_not_found(id));
        }

        tx.commit().map_err(sqlite("commit"))?;
        Ok(())
    }

    fn set_approved(&mut self, id: &str, approved: bool) -> Result<()> {
        if SqliteRepo::set_approved(&self.conn, id, approved)? {
            Ok(())
        } else {
            Err(ExError::snippet_not_found(id))
        }
    }
}
