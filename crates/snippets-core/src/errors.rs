use snippets_core_types::{RequestId, TraceId};
use thiserror::Error;

use crate::forms::FieldErrors;

/// Result type alias using SnippetError
pub type Result<T> = std::result::Result<T, SnippetError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable code that presenters and tests match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Access
    Unauthenticated,
    NotFound,
    Forbidden,

    // Input
    Validation,
    ConstraintViolation,

    // Integration/IO
    Persistence,
    Io,
    Serialization,
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Unauthenticated => "ERR_UNAUTHENTICATED",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::Validation => "ERR_VALIDATION",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a kind for programmatic handling plus optional context for
/// debugging. Store and engine layers return this type.
#[derive(Debug, Clone, PartialEq)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    field_errors: Option<FieldErrors>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            field_errors: None,
        }
    }

    /// The one not-found error for snippets
    ///
    /// Absent snippets and snippets hidden from the caller both go through
    /// here, so the two cases cannot be told apart.
    pub fn snippet_not_found(snippet_id: impl Into<String>) -> Self {
        ExError::new(ExErrorKind::NotFound)
            .with_entity_id(snippet_id)
            .with_message("Snippet not found")
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach per-field validation messages
    pub fn with_field_errors(mut self, errors: FieldErrors) -> Self {
        self.field_errors = Some(errors);
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Per-field validation messages, present on `Validation` errors
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        self.field_errors.as_ref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(errors) = &self.field_errors {
            write!(f, " ({})", errors)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for snippet operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnippetError {
    /// No identity could be resolved for the caller
    #[error("Authentication required")]
    Unauthenticated,

    /// Snippet is absent, or hidden from the caller
    #[error("Snippet not found: {snippet_id}")]
    SnippetNotFound { snippet_id: String },

    /// Caller is not the snippet's author
    #[error("Snippet {snippet_id} can only be modified by its author")]
    NotOwner { snippet_id: String },

    /// Submitted form failed validation
    #[error("Invalid snippet form: {errors}")]
    Validation { errors: FieldErrors },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<SnippetError> for ExError {
    fn from(err: SnippetError) -> Self {
        match err {
            SnippetError::Unauthenticated => {
                ExError::new(ExErrorKind::Unauthenticated).with_message("Authentication required")
            }

            SnippetError::SnippetNotFound { snippet_id } => ExError::snippet_not_found(snippet_id),

            SnippetError::NotOwner { snippet_id } => ExError::new(ExErrorKind::Forbidden)
                .with_entity_id(snippet_id)
                .with_message("Only the author may modify this snippet"),

            SnippetError::Validation { errors } => ExError::new(ExErrorKind::Validation)
                .with_message("Submitted form is invalid")
                .with_field_errors(errors),

            SnippetError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            SnippetError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for SnippetError {
    fn from(err: serde_json::Error) -> Self {
        SnippetError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::Unauthenticated, "ERR_UNAUTHENTICATED"),
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::Forbidden, "ERR_FORBIDDEN"),
            (ExErrorKind::Validation, "ERR_VALIDATION"),
            (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_not_owner_maps_to_forbidden() {
        let ex: ExError = SnippetError::NotOwner {
            snippet_id: "s1".into(),
        }
        .into();
        assert_eq!(ex.kind(), ExErrorKind::Forbidden);
        assert_eq!(ex.entity_id(), Some("s1"));
    }

    #[test]
    fn test_validation_carries_field_errors() {
        let mut errors = FieldErrors::default();
        errors.add("title", "This field is required.");

        let ex: ExError = SnippetError::Validation { errors }.into();
        assert_eq!(ex.kind(), ExErrorKind::Validation);
        let fields = ex.field_errors().expect("field errors should be attached");
        assert_eq!(fields.get("title"), ["This field is required.".to_string()]);
    }

    #[test]
    fn test_field_errors_none_by_default() {
        assert!(ExError::new(ExErrorKind::Internal).field_errors().is_none());
    }

    #[test]
    fn test_display_includes_code_op_and_entity() {
        let err = ExError::snippet_not_found("s9").with_op("get_one");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_NOT_FOUND]"));
        assert!(rendered.contains("get_one"));
        assert!(rendered.contains("s9"));
    }
}
