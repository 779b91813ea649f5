#![allow(clippy::result_large_err)]

use crate::errors::{sqlite, Result};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::get_migrations;
use rusqlite::{Connection, OptionalExtension};
use snippets_core::errors::{ExError, ExErrorKind};

/// Apply all pending migrations to the database
///
/// # Errors
///
/// Returns `ConstraintViolation` if an applied migration's SQL no longer
/// matches its recorded checksum, or `Persistence` if a migration fails.
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    create_schema_version_table(conn)?;

    for migration in get_migrations() {
        apply_migration(conn, migration.id, migration.sql)?;
    }

    Ok(())
}

/// Ids of applied migrations, in application order
pub fn applied_migrations(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT migration_id FROM schema_version ORDER BY id")
        .map_err(sqlite("migrate"))?;
    let ids = stmt
        .query_map([], |row| row.get(0))
        .map_err(sqlite("migrate"))?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(sqlite("migrate"))?;
    Ok(ids)
}

fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT NOT NULL
        )",
        [],
    )
    .map_err(sqlite("migrate"))?;

    Ok(())
}

fn apply_migration(conn: &mut Connection, migration_id: &str, sql: &str) -> Result<()> {
    let checksum = compute_checksum(sql);

    let recorded: Option<String> = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = ?1",
            [migration_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(sqlite("migrate"))?;

    if let Some(recorded) = recorded {
        if recorded != checksum {
            return Err(ExError::new(ExErrorKind::ConstraintViolation)
                .with_op("migration_checksum")
                .with_entity_id(migration_id)
                .with_message(format!(
                    "migration {} changed after it was applied: recorded checksum {}, embedded {}",
                    migration_id, recorded, checksum
                )));
        }
        return Ok(());
    }

    let tx = conn.transaction().map_err(sqlite("migrate"))?;

    tx.execute_batch(sql)
        .map_err(|e| sqlite("migration")(e).with_entity_id(migration_id))?;

    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?1, ?2, ?3)",
        rusqlite::params![migration_id, chrono::Utc::now().timestamp(), checksum],
    )
    .map_err(sqlite("migrate"))?;

    tx.commit().map_err(sqlite("migrate"))?;

    tracing::debug!(migration_id, "applied migration");
    Ok(())
}
