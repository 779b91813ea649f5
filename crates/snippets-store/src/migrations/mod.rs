//! Migration framework
//!
//! - Embedded SQL migrations, applied in order
//! - Idempotent application recorded in `schema_version`
//! - SHA-256 checksums; an applied migration whose SQL changed is rejected

mod checksums;
mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
