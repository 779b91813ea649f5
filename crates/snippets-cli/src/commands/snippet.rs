//! Snippet requests, routed through the request handlers

use clap::{Args, Subcommand};
use snippets_core::forms::{FIELD_CONTENT, FIELD_TAGS, FIELD_TITLE};
use snippets_core::{FormData, Identity};
use snippets_core_types::TraceId;
use snippets_engine::{JsonPresenter, Response, SnippetViews, StaticIdentityProvider};

use super::GlobalArgs;

#[derive(Debug, Subcommand)]
pub enum SnippetCommand {
    /// Approved snippets, newest first
    List,
    /// Your own snippets
    Mine {
        /// Profile slug of the listing page; defaults to your own
        slug: Option<String>,
    },
    /// One snippet with its tags
    Show { id: String },
    Create(CreateArgs),
    /// Show the edit form of one of your snippets
    Edit { id: String },
    Update(UpdateArgs),
    Delete(DeleteArgs),
}

/// Create a snippet
#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub content: String,

    /// Comma- or space-separated tags
    #[arg(long)]
    pub tags: Option<String>,
}

/// Update one of your snippets; omitted fields keep their current values
#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    #[arg(long)]
    pub tags: Option<String>,
}

/// Delete one of your snippets
#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,

    /// Delete without stopping at the confirmation step
    #[arg(long)]
    pub yes: bool,
}

pub fn execute(
    command: SnippetCommand,
    global: &GlobalArgs,
) -> Result<Response, Box<dyn std::error::Error>> {
    let caller = global.user.as_deref().map(Identity::from_username);
    let own_slug = caller.as_ref().map(|c| c.profile_slug.clone());
    let identity = StaticIdentityProvider::new(caller);
    let mut views = SnippetViews::new(global.open_controller()?, identity, JsonPresenter);
    if let Some(trace_id) = &global.trace_id {
        views = views.with_trace_id(TraceId::from_string(trace_id.clone()));
    }

    let response = match command {
        SnippetCommand::List => views.snippets(),
        SnippetCommand::Mine { slug } => {
            let slug = slug
                .or(own_slug)
                .ok_or("mine needs --user or a profile slug")?;
            views.my_snippets(&slug)
        }
        SnippetCommand::Show { id } => views.snippet_details(&id),
        SnippetCommand::Create(args) => {
            let mut form = FormData::new();
            form.insert(FIELD_TITLE, args.title);
            form.insert(FIELD_CONTENT, args.content);
            if let Some(tags) = args.tags {
                form.insert(FIELD_TAGS, tags);
            }
            views.create(&form)
        }
        SnippetCommand::Edit { id } => views.update_form(&id),
        SnippetCommand::Update(args) => {
            // Start from the edit form so omitted flags keep current values
            let current = views.update_form(&args.id);
            if current.status != 200 {
                return Ok(current);
            }
            let mut form: FormData =
                serde_json::from_value(current.body["context"]["form"].clone())?;
            if let Some(title) = args.title {
                form.insert(FIELD_TITLE, title);
            }
            if let Some(content) = args.content {
                form.insert(FIELD_CONTENT, content);
            }
            if let Some(tags) = args.tags {
                form.insert(FIELD_TAGS, tags);
            }
            views.update(&args.id, &form)
        }
        SnippetCommand::Delete(args) if args.yes => views.delete(&args.id),
        SnippetCommand::Delete(args) => views.delete_confirm(&args.id),
    };

    Ok(response)
}
