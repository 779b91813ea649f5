//! Operator commands: schema migration and moderation

use clap::{Args, Subcommand};
use serde_json::json;
use snippets_engine::moderation::set_approved;
use snippets_engine::Response;
use snippets_store::migrations::applied_migrations;
use snippets_store::SqliteSnippetStore;

use super::GlobalArgs;

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create or upgrade the database schema
    Migrate,
    /// Make a snippet publicly visible
    Approve { id: String },
    /// Hide a snippet from the public listing again
    Unapprove { id: String },
}

pub fn execute(args: AdminArgs, global: &GlobalArgs) -> Result<Response, Box<dyn std::error::Error>> {
    match args.command {
        AdminCommand::Migrate => {
            // Opening the store applies pending migrations
            let store = SqliteSnippetStore::open(&global.db)?;
            let applied = applied_migrations(store.conn())?;
            Ok(ok(json!({ "applied_migrations": applied })))
        }
        AdminCommand::Approve { id } => moderate(global, &id, true),
        AdminCommand::Unapprove { id } => moderate(global, &id, false),
    }
}

fn moderate(
    global: &GlobalArgs,
    id: &str,
    approved: bool,
) -> Result<Response, Box<dyn std::error::Error>> {
    let mut controller = global.open_controller()?;
    set_approved(controller.store_mut(), id, approved)?;
    Ok(ok(json!({ "snippet_id": id, "approved": approved })))
}

fn ok(body: serde_json::Value) -> Response {
    Response {
        status: 200,
        location: None,
        body,
    }
}
