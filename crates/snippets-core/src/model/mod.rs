pub mod identity;
pub mod snippet;

pub use identity::{Identity, UserId};
pub use snippet::{NewSnippet, Snippet, SnippetDetail, SnippetId, SnippetPatch};
