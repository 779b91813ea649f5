//! Snippets Store - SQLite persistence
//!
//! Provides:
//! - Connection management
//! - Embedded, checksummed schema migrations
//! - Row-level repository functions (`SqliteRepo`)
//! - `SqliteSnippetStore`, the `SnippetStore` implementation used in production

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod store;

// Re-export key types
pub use errors::Result;
pub use store::SqliteSnippetStore;
