//! Repository layer mapping snippet models to SQLite rows

pub mod sqlite_repo;

pub use sqlite_repo::SqliteRepo;
