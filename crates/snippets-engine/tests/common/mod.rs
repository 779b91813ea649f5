#![allow(dead_code)]

use snippets_core::{FormData, Identity, MemoryStore};
use snippets_engine::{EngineConfig, SnippetAccessController};

pub fn alice() -> Identity {
    Identity::from_username("alice")
}

pub fn bob() -> Identity {
    Identity::from_username("bob")
}

pub fn controller() -> SnippetAccessController<MemoryStore> {
    SnippetAccessController::new(MemoryStore::new(), EngineConfig::default())
}

pub fn form(title: &str, content: &str, tags: &str) -> FormData {
    FormData::from_pairs([("title", title), ("content", content), ("tags", tags)])
}

/// Create a snippet as `author` and approve it when asked
pub fn create_snippet(
    ctl: &mut SnippetAccessController<MemoryStore>,
    author: &Identity,
    title: &str,
    approved: bool,
) -> String {
    let id = ctl
        .create(Some(author), &form(title, "body", ""))
        .expect("create should succeed");
    if approved {
        snippets_engine::moderation::set_approved(ctl.store_mut(), &id, true)
            .expect("approve should succeed");
    }
    id
}
