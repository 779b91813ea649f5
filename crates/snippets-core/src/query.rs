//! Typed listing query
//!
//! Stores receive a `SnippetQuery` instead of building filters ad hoc.
//! `matches` and `sort` define the semantics; the SQLite store mirrors them
//! in SQL.

use std::cmp::Ordering;

use crate::model::{Snippet, UserId};

/// Listing order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SnippetOrder {
    /// Newest first; equal timestamps fall back to id, descending
    #[default]
    CreatedDesc,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetQuery {
    pub approved: Option<bool>,
    pub author: Option<UserId>,
    pub order: SnippetOrder,
}

impl SnippetQuery {
    /// Approved snippets from every author
    pub fn public() -> Self {
        Self {
            approved: Some(true),
            ..Self::default()
        }
    }

    /// Every snippet by `author`, approved or not
    pub fn authored_by(author: UserId) -> Self {
        Self {
            author: Some(author),
            ..Self::default()
        }
    }

    pub fn matches(&self, snippet: &Snippet) -> bool {
        self.approved.map_or(true, |a| snippet.approved == a)
            && self.author.as_ref().map_or(true, |a| &snippet.author == a)
    }

    pub fn compare(&self, a: &Snippet, b: &Snippet) -> Ordering {
        match self.order {
            SnippetOrder::CreatedDesc => b.created.cmp(&a.created).then_with(|| b.id.cmp(&a.id)),
        }
    }

    pub fn sort(&self, snippets: &mut [Snippet]) {
        snippets.sort_by(|a, b| self.compare(a, b));
    }
}
