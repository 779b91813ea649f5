//! Snippet form cleaning
//!
//! Submissions arrive as raw key/value pairs. Cleaning keeps only the
//! caller-writable fields (`title`, `content`, `tags`), validates them
//! against [`FormLimits`] and collects every failure per field. Keys such as
//! `author` or `approved` are dropped here and never reach a store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SnippetError};

pub const FIELD_TITLE: &str = "title";
pub const FIELD_CONTENT: &str = "content";
pub const FIELD_TAGS: &str = "tags";

const MSG_REQUIRED: &str = "This field is required.";

/// Raw submitted form values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-field validation messages, ordered by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Messages for one field; empty when the field is valid
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(" "))?;
        }
        Ok(())
    }
}

/// Size limits applied while cleaning a snippet form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormLimits {
    pub title_max_len: usize,
    pub content_max_len: usize,
    pub tag_max_len: usize,
    pub max_tags: usize,
}

impl Default for FormLimits {
    fn default() -> Self {
        Self {
            title_max_len: 100,
            content_max_len: 20_000,
            tag_max_len: 50,
            max_tags: 10,
        }
    }
}

/// A validated submission, restricted to caller-writable fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedSnippet {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// Form used for both creating and updating a snippet
pub struct SnippetForm<'a> {
    data: &'a FormData,
    limits: &'a FormLimits,
}

impl<'a> SnippetForm<'a> {
    pub fn new(data: &'a FormData, limits: &'a FormLimits) -> Self {
        Self { data, limits }
    }

    /// Validate every field, reporting all failures at once
    ///
    /// # Errors
    ///
    /// Returns `SnippetError::Validation` listing the failing fields.
    pub fn clean(&self) -> Result<CleanedSnippet> {
        let mut errors = FieldErrors::default();

        let title = self.data.get(FIELD_TITLE).unwrap_or_default().trim();
        if title.is_empty() {
            errors.add(FIELD_TITLE, MSG_REQUIRED);
        } else if title.chars().count() > self.limits.title_max_len {
            errors.add(FIELD_TITLE, too_long(self.limits.title_max_len));
        }

        let content = self.data.get(FIELD_CONTENT).unwrap_or_default();
        if content.trim().is_empty() {
            errors.add(FIELD_CONTENT, MSG_REQUIRED);
        } else if content.chars().count() > self.limits.content_max_len {
            errors.add(FIELD_CONTENT, too_long(self.limits.content_max_len));
        }

        let tags = parse_tags(self.data.get(FIELD_TAGS).unwrap_or_default());
        if tags.len() > self.limits.max_tags {
            errors.add(
                FIELD_TAGS,
                format!("Use at most {} tags.", self.limits.max_tags),
            );
        }
        for tag in &tags {
            if tag.chars().count() > self.limits.tag_max_len {
                errors.add(
                    FIELD_TAGS,
                    format!(
                        "Tag \"{}\" is longer than {} characters.",
                        tag, self.limits.tag_max_len
                    ),
                );
            }
        }

        if !errors.is_empty() {
            return Err(SnippetError::Validation { errors });
        }

        Ok(CleanedSnippet {
            title: title.to_string(),
            content: content.to_string(),
            tags,
        })
    }
}

fn too_long(max: usize) -> String {
    format!("Ensure this value has at most {} characters.", max)
}

/// Parse a tag field into a sorted, de-duplicated tag list
///
/// Input containing a comma is split on commas, so tags may hold spaces;
/// otherwise it is split on whitespace. Surrounding quotes are stripped.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let parts: Vec<&str> = if raw.contains(',') {
        raw.split(',').collect()
    } else {
        raw.split_whitespace().collect()
    };

    let mut tags: Vec<String> = parts
        .into_iter()
        .map(|part| part.trim().trim_matches('"').trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

/// Render a tag list back into a form value that [`parse_tags`] reads
/// to the same list
pub fn render_tags(tags: &[String]) -> String {
    let joined = tags.join(", ");
    match tags {
        [only] if only.contains(char::is_whitespace) => format!("{},", joined),
        _ => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        FormData::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_clean_valid_form() {
        let data = form(&[
            ("title", "  Hello  "),
            ("content", "fn main() {}"),
            ("tags", "rust cli"),
        ]);
        let limits = FormLimits::default();
        let cleaned = SnippetForm::new(&data, &limits).clean().unwrap();

        assert_eq!(cleaned.title, "Hello");
        assert_eq!(cleaned.content, "fn main() {}");
        assert_eq!(cleaned.tags, vec!["cli".to_string(), "rust".to_string()]);
    }

    #[test]
    fn test_clean_collects_all_field_errors() {
        let data = form(&[("title", "   "), ("content", "")]);
        let limits = FormLimits::default();
        let err = SnippetForm::new(&data, &limits).clean().unwrap_err();

        match err {
            SnippetError::Validation { errors } => {
                assert_eq!(errors.get("title"), [MSG_REQUIRED.to_string()]);
                assert_eq!(errors.get("content"), [MSG_REQUIRED.to_string()]);
                assert!(errors.get("tags").is_empty());
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_clean_enforces_limits() {
        let limits = FormLimits {
            title_max_len: 5,
            content_max_len: 10,
            tag_max_len: 3,
            max_tags: 2,
        };
        let data = form(&[
            ("title", "too long title"),
            ("content", "content that is too long"),
            ("tags", "a b long"),
        ]);
        let err = SnippetForm::new(&data, &limits).clean().unwrap_err();

        let SnippetError::Validation { errors } = err else {
            panic!("Expected Validation error");
        };
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["content", "tags", "title"]);
        assert_eq!(errors.get("tags").len(), 2);
    }

    #[test]
    fn test_clean_ignores_unknown_keys() {
        let data = form(&[
            ("title", "t"),
            ("content", "c"),
            ("approved", "true"),
            ("author", "mallory"),
        ]);
        let limits = FormLimits::default();
        let cleaned = SnippetForm::new(&data, &limits).clean().unwrap();
        assert_eq!(
            cleaned,
            CleanedSnippet {
                title: "t".into(),
                content: "c".into(),
                tags: vec![],
            }
        );
    }

    #[test]
    fn test_parse_tags_space_and_comma_modes() {
        assert_eq!(parse_tags("b a b"), vec!["a", "b"]);
        assert_eq!(parse_tags("web dev, rust"), vec!["rust", "web dev"]);
        assert_eq!(parse_tags("\"quoted\", ,plain"), vec!["plain", "quoted"]);
        assert!(parse_tags("   ").is_empty());
    }

    #[test]
    fn test_render_tags_reparses_to_same_list() {
        let cases: Vec<Vec<String>> = vec![
            vec![],
            vec!["rust".into()],
            vec!["web dev".into()],
            vec!["cli".into(), "rust".into()],
            vec!["data science".into(), "python".into()],
        ];
        for tags in cases {
            assert_eq!(parse_tags(&render_tags(&tags)), tags, "for {:?}", tags);
        }
    }

    #[test]
    fn test_field_errors_display() {
        let mut errors = FieldErrors::default();
        errors.add("title", "Required.");
        errors.add("content", "Too long.");
        assert_eq!(errors.to_string(), "content: Too long.; title: Required.");
    }

    #[test]
    fn test_form_limits_partial_deserialize() {
        let limits: FormLimits = serde_json::from_str(r#"{"max_tags": 3}"#).unwrap();
        assert_eq!(limits.max_tags, 3);
        assert_eq!(limits.title_max_len, 100);
    }

    #[test]
    fn test_form_limits_reject_unknown_key() {
        let result: std::result::Result<FormLimits, _> =
            serde_json::from_str(r#"{"max_tag": 3}"#);
        assert!(result.is_err());
    }
}
