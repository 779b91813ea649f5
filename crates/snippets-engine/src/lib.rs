//! Snippets Engine - request orchestration
//!
//! - `SnippetAccessController`: eight access-checked operations (both
//!   listings, detail, create, edit form, update, delete confirmation and
//!   delete)
//! - `SnippetViews`: one handler per page, wiring identity, controller and
//!   presenter together
//! - `JsonPresenter`: the in-tree `Presenter`
//! - `EngineConfig`: TOML configuration

#![allow(clippy::result_large_err)]

pub mod config;
pub mod controller;
pub mod identity;
pub mod moderation;
pub mod presenter;
pub mod routes;
pub mod views;

pub use config::EngineConfig;
pub use controller::{EditForm, SnippetAccessController};
pub use identity::{IdentityProvider, StaticIdentityProvider};
pub use presenter::{JsonPresenter, Presenter, Response, View};
pub use routes::Route;
pub use views::SnippetViews;
