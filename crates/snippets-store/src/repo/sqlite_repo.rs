//! SQLite row mapping for snippets and tags
//!
//! Functions take a `&Connection`; pass `&tx` to run them inside a
//! transaction.

#![allow(clippy::result_large_err)]

use crate::errors::{on_snippet, sqlite, Result};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row};
use snippets_core::model::{Snippet, UserId};
use snippets_core::query::{SnippetOrder, SnippetQuery};

const SNIPPET_COLUMNS: &str = "id, author, title, content, approved, created_at, updated_at";

/// SQLite repository for snippets
pub struct SqliteRepo;

impl SqliteRepo {
    /// Insert or overwrite a snippet row
    ///
    /// `author`, `created_at` and `approved` are written on insert only; a
    /// conflicting row keeps its original values. Moderation goes through
    /// [`SqliteRepo::set_approved`].
    pub fn persist_snippet(conn: &Connection, snippet: &Snippet) -> Result<()> {
        conn.execute(
            "INSERT INTO snippets (id, author, title, content, approved, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                content = excluded.content,
                updated_at = excluded.updated_at",
            rusqlite::params![
                snippet.id,
                snippet.author.as_str(),
                snippet.title,
                snippet.content,
                snippet.approved,
                snippet.created.timestamp_millis(),
                snippet.updated.timestamp_millis(),
            ],
        )
        .map_err(on_snippet("persist_snippet", &snippet.id))?;

        tracing::debug!(snippet_id = %snippet.id, "persisted snippet row");
        Ok(())
    }

    /// Get a snippet by id
    pub fn get_snippet(conn: &Connection, snippet_id: &str) -> Result<Option<Snippet>> {
        let sql = format!("SELECT {} FROM snippets WHERE id = ?1", SNIPPET_COLUMNS);
        conn.query_row(&sql, [snippet_id], row_to_snippet)
            .optional()
            .map_err(on_snippet("get_snippet", snippet_id))
    }

    /// Snippets matching `query`, ordered as the query requires
    pub fn find_snippets(conn: &Connection, query: &SnippetQuery) -> Result<Vec<Snippet>> {
        let mut clauses = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some(approved) = query.approved {
            params.push(Value::Integer(i64::from(approved)));
            clauses.push(format!("approved = ?{}", params.len()));
        }
        if let Some(author) = &query.author {
            params.push(Value::Text(author.as_str().to_string()));
            clauses.push(format!("author = ?{}", params.len()));
        }

        let mut sql = format!("SELECT {} FROM snippets", SNIPPET_COLUMNS);
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(match query.order {
            SnippetOrder::CreatedDesc => " ORDER BY created_at DESC, id DESC",
        });

        let mut stmt = conn.prepare(&sql).map_err(sqlite("find_snippets"))?;
        let snippets = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), row_to_snippet)
            .map_err(sqlite("find_snippets"))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(sqlite("find_snippets"))?;

        tracing::debug!(count = snippets.len(), "queried snippets");
        Ok(snippets)
    }

    /// Delete a snippet row; returns whether a row was removed
    pub fn delete_snippet(conn: &Connection, snippet_id: &str) -> Result<bool> {
        let removed = conn
            .execute("DELETE FROM snippets WHERE id = ?1", [snippet_id])
            .map_err(on_snippet("delete_snippet", snippet_id))?;
        Ok(removed > 0)
    }

    /// Set the moderation flag; returns whether the snippet exists
    pub fn set_approved(conn: &Connection, snippet_id: &str, approved: bool) -> Result<bool> {
        let changed = conn
            .execute(
                "UPDATE snippets SET approved = ?1 WHERE id = ?2",
                rusqlite::params![approved, snippet_id],
            )
            .map_err(on_snippet("set_approved", snippet_id))?;
        Ok(changed > 0)
    }

    /// Replace a snippet's whole tag set
    pub fn replace_tags(conn: &Connection, snippet_id: &str, tags: &[String]) -> Result<()> {
        Self::delete_tags(conn, snippet_id)?;

        let mut stmt = conn
            .prepare("INSERT OR IGNORE INTO snippet_tags (snippet_id, tag) VALUES (?1, ?2)")
            .map_err(on_snippet("replace_tags", snippet_id))?;
        for tag in tags {
            stmt.execute(rusqlite::params![snippet_id, tag])
                .map_err(on_snippet("replace_tags", snippet_id))?;
        }
        Ok(())
    }

    pub fn delete_tags(conn: &Connection, snippet_id: &str) -> Result<()> {
        conn.execute("DELETE FROM snippet_tags WHERE snippet_id = ?1", [snippet_id])
            .map_err(on_snippet("delete_tags", snippet_id))?;
        Ok(())
    }

    /// Tags of a snippet, sorted
    pub fn load_tags(conn: &Connection, snippet_id: &str) -> Result<Vec<String>> {
        let mut stmt = conn
            .prepare("SELECT tag FROM snippet_tags WHERE snippet_id = ?1 ORDER BY tag")
            .map_err(on_snippet("load_tags", snippet_id))?;
        let tags = stmt
            .query_map([snippet_id], |row| row.get(0))
            .map_err(on_snippet("load_tags", snippet_id))?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(on_snippet("load_tags", snippet_id))?;
        Ok(tags)
    }
}

fn row_to_snippet(row: &Row<'_>) -> rusqlite::Result<Snippet> {
    let author: String = row.get(1)?;
    Ok(Snippet {
        id: row.get(0)?,
        author: UserId::new(author),
        title: row.get(2)?,
        content: row.get(3)?,
        approved: row.get(4)?,
        created: millis_to_datetime(row, 5)?,
        updated: millis_to_datetime(row, 6)?,
    })
}

fn millis_to_datetime(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let millis: i64 = row.get(idx)?;
    DateTime::from_timestamp_millis(millis)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, millis))
}
