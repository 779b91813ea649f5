//! Turning outcomes into responses
//!
//! The engine decides *what* to show (a view, a redirect or an error); a
//! `Presenter` decides how it looks on the wire.

use serde::Serialize;
use serde_json::{json, Value};
use snippets_core::errors::{ExError, ExErrorKind};
use snippets_core::{FieldErrors, FormData};
use snippets_core_types::RequestContext;

use crate::routes::Route;

/// Pages the engine can render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Snippets,
    MySnippets,
    SnippetDetails,
    Create,
    Update,
    ConfirmDelete,
}

impl View {
    pub fn template(self) -> &'static str {
        match self {
            View::Snippets => "snippets/snippets.html",
            View::MySnippets => "snippets/my_snippets.html",
            View::SnippetDetails => "snippets/snippet_details.html",
            View::Create => "snippets/create.html",
            View::Update => "snippets/update.html",
            View::ConfirmDelete => "snippets/snippet_confirm_delete.html",
        }
    }
}

pub trait Presenter {
    type Output;

    /// A successful page
    fn render(&self, view: View, model: Value) -> Self::Output;

    /// A form page shown again with the submitted values and their errors
    fn render_invalid(
        &self,
        view: View,
        model: Value,
        form: &FormData,
        errors: &FieldErrors,
    ) -> Self::Output;

    fn redirect(&self, route: &Route) -> Self::Output;

    /// A failure that has no page of its own
    fn error(&self, err: &ExError, ctx: &RequestContext) -> Self::Output;
}

/// Transport-neutral response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub body: Value,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }
}

/// Presents everything as JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPresenter;

pub fn status_for(kind: ExErrorKind) -> u16 {
    match kind {
        ExErrorKind::Unauthenticated => 401,
        ExErrorKind::Forbidden => 403,
        ExErrorKind::NotFound => 404,
        ExErrorKind::Validation => 400,
        _ => 500,
    }
}

impl Presenter for JsonPresenter {
    type Output = Response;

    fn render(&self, view: View, model: Value) -> Response {
        Response {
            status: 200,
            location: None,
            body: json!({ "template": view.template(), "context": model }),
        }
    }

    fn render_invalid(
        &self,
        view: View,
        mut model: Value,
        form: &FormData,
        errors: &FieldErrors,
    ) -> Response {
        if let Value::Object(map) = &mut model {
            map.insert("form".to_string(), json!(form));
            map.insert("errors".to_string(), json!(errors));
        }
        Response {
            status: 400,
            location: None,
            body: json!({ "template": view.template(), "context": model }),
        }
    }

    fn redirect(&self, route: &Route) -> Response {
        let location = route.path();
        Response {
            status: 302,
            body: json!({ "location": location }),
            location: Some(location),
        }
    }

    fn error(&self, err: &ExError, ctx: &RequestContext) -> Response {
        // Server-side failures keep their details out of the response
        let message = match err.kind() {
            ExErrorKind::Persistence
            | ExErrorKind::Io
            | ExErrorKind::Serialization
            | ExErrorKind::Config
            | ExErrorKind::ConstraintViolation
            | ExErrorKind::Internal => "Internal server error",
            _ => err.message(),
        };

        let mut error = json!({
            "code": err.code(),
            "message": message,
            "request_id": ctx.request_id.as_str(),
        });
        if let Some(trace_id) = &ctx.trace_id {
            error["trace_id"] = json!(trace_id.as_str());
        }

        Response {
            status: status_for(err.kind()),
            location: None,
            body: json!({ "error": error }),
        }
    }
}
