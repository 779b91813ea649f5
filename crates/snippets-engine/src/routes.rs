//! Named, reversible locations

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is in a `next` query value: unreserved plus `/`
const NEXT_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// A location a response can point at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Snippets,
    /// A user's own listing page
    UserSnippets { slug: String },
    SnippetDetails { id: String },
    CreateSnippet,
    UpdateSnippet { id: String },
    DeleteSnippet { id: String },
    Login { next: String },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Snippets => "/snippets/".to_string(),
            Route::UserSnippets { slug } => format!("/users/{}/snippets/", slug),
            Route::SnippetDetails { id } => format!("/snippets/{}/", id),
            Route::CreateSnippet => "/snippets/create/".to_string(),
            Route::UpdateSnippet { id } => format!("/snippets/{}/update/", id),
            Route::DeleteSnippet { id } => format!("/snippets/{}/delete/", id),
            Route::Login { next } => {
                format!("/login/?next={}", utf8_percent_encode(next, NEXT_VALUE))
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
