//! Request handlers, one per page
//!
//! Each handler opens a `RequestContext`, resolves the caller, runs one
//! controller operation and hands the outcome to the presenter:
//!
//! | outcome            | response                                         |
//! |--------------------|--------------------------------------------------|
//! | success            | the page, or a redirect for form submissions     |
//! | `Unauthenticated`  | redirect to login with `next` = requested path   |
//! | `Validation`       | the form again with submitted values, status 400 |
//! | anything else      | `Presenter::error`, carrying the request id      |

use serde::Serialize;
use serde_json::{json, Value};
use snippets_core::errors::{ExError, ExErrorKind};
use snippets_core::{FieldErrors, FormData, Snippet, SnippetDetail, SnippetError, SnippetStore};
use snippets_core_types::{RequestContext, TraceId};

use crate::controller::SnippetAccessController;
use crate::identity::IdentityProvider;
use crate::presenter::{Presenter, View};
use crate::routes::Route;

#[derive(Serialize)]
struct ListPage {
    snippets: Vec<Snippet>,
}

#[derive(Serialize)]
struct SnippetPage<T> {
    snippet: T,
}

#[derive(Serialize)]
struct FormPageModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    snippet: Option<Snippet>,
    form: FormData,
    errors: FieldErrors,
}

enum Outcome {
    Render(View, Value),
    Redirect(Route),
}

/// Form page to fall back to when a submission is invalid
struct FormPage<'a> {
    view: View,
    model: Value,
    submitted: &'a FormData,
}

pub struct SnippetViews<S: SnippetStore, I: IdentityProvider, P: Presenter> {
    controller: SnippetAccessController<S>,
    identity: I,
    presenter: P,
    trace_id: Option<TraceId>,
}

impl<S: SnippetStore, I: IdentityProvider, P: Presenter> SnippetViews<S, I, P> {
    pub fn new(controller: SnippetAccessController<S>, identity: I, presenter: P) -> Self {
        Self {
            controller,
            identity,
            presenter,
            trace_id: None,
        }
    }

    /// Tag every request handled from now on with an inbound trace id
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn controller(&self) -> &SnippetAccessController<S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SnippetAccessController<S> {
        &mut self.controller
    }

    pub fn identity_mut(&mut self) -> &mut I {
        &mut self.identity
    }

    /// Public listing
    pub fn snippets(&self) -> P::Output {
        let ctx = self.context(&Route::Snippets);
        let caller = self.identity.current_identity();

        let outcome = self
            .controller
            .list_public(caller.as_ref())
            .and_then(|snippets| to_model(&ListPage { snippets }))
            .map(|model| Outcome::Render(View::Snippets, model));
        self.respond(&ctx, outcome, None)
    }

    /// The caller's own listing, served at `/users/{slug}/snippets/`
    ///
    /// The page always lists the caller's snippets; `slug` only names the
    /// requested location.
    pub fn my_snippets(&self, slug: &str) -> P::Output {
        let ctx = self.context(&Route::UserSnippets {
            slug: slug.to_string(),
        });
        let caller = self.identity.current_identity();

        let outcome = self
            .controller
            .list_mine(caller.as_ref())
            .and_then(|snippets| to_model(&ListPage { snippets }))
            .map(|model| Outcome::Render(View::MySnippets, model));
        self.respond(&ctx, outcome, None)
    }

    pub fn snippet_details(&self, id: &str) -> P::Output {
        let ctx = self.context(&Route::SnippetDetails { id: id.to_string() });
        let caller = self.identity.current_identity();

        let outcome = self
            .controller
            .get_one(caller.as_ref(), id)
            .and_then(|detail: SnippetDetail| to_model(&SnippetPage { snippet: detail }))
            .map(|model| Outcome::Render(View::SnippetDetails, model));
        self.respond(&ctx, outcome, None)
    }

    /// Empty creation form
    ///
    /// Still requires a caller, so anonymous visitors go to login first.
    pub fn create_form(&self) -> P::Output {
        let ctx = self.context(&Route::CreateSnippet);
        let caller = self.identity.current_identity();

        let outcome = match caller {
            Some(_) => to_model(&FormPageModel {
                snippet: None,
                form: FormData::new(),
                errors: FieldErrors::default(),
            })
            .map(|model| Outcome::Render(View::Create, model)),
            None => Err(SnippetError::Unauthenticated.into()),
        };
        self.respond(&ctx, outcome, None)
    }

    /// Creation form submission; redirects to the caller's listing
    pub fn create(&mut self, form: &FormData) -> P::Output {
        let ctx = self.context(&Route::CreateSnippet);
        let caller = self.identity.current_identity();

        let outcome = self.controller.create(caller.as_ref(), form).map(|_| {
            let slug = caller
                .as_ref()
                .map(|c| c.profile_slug.clone())
                .unwrap_or_default();
            Outcome::Redirect(Route::UserSnippets { slug })
        });
        let page = FormPage {
            view: View::Create,
            model: json!({}),
            submitted: form,
        };
        self.respond(&ctx, outcome, Some(page))
    }

    /// Edit form pre-filled with the current values and tags
    pub fn update_form(&self, id: &str) -> P::Output {
        let ctx = self.context(&Route::UpdateSnippet { id: id.to_string() });
        let caller = self.identity.current_identity();

        let outcome = self
            .controller
            .edit_form(caller.as_ref(), id)
            .and_then(|edit| {
                to_model(&FormPageModel {
                    snippet: Some(edit.snippet),
                    form: edit.initial,
                    errors: FieldErrors::default(),
                })
            })
            .map(|model| Outcome::Render(View::Update, model));
        self.respond(&ctx, outcome, None)
    }

    /// Edit form submission; redirects to the snippet's detail page
    pub fn update(&mut self, id: &str, form: &FormData) -> P::Output {
        let ctx = self.context(&Route::UpdateSnippet { id: id.to_string() });
        let caller = self.identity.current_identity();

        let outcome = self
            .controller
            .update(caller.as_ref(), id, form)
            .map(|()| Outcome::Redirect(Route::SnippetDetails { id: id.to_string() }));
        let page = FormPage {
            view: View::Update,
            model: json!({ "snippet_id": id }),
            submitted: form,
        };
        self.respond(&ctx, outcome, Some(page))
    }

    pub fn delete_confirm(&self, id: &str) -> P::Output {
        let ctx = self.context(&Route::DeleteSnippet { id: id.to_string() });
        let caller = self.identity.current_identity();

        let outcome = self
            .controller
            .confirm_delete(caller.as_ref(), id)
            .and_then(|snippet| to_model(&SnippetPage { snippet }))
            .map(|model| Outcome::Render(View::ConfirmDelete, model));
        self.respond(&ctx, outcome, None)
    }

    /// Confirmed deletion; redirects to the public listing
    pub fn delete(&mut self, id: &str) -> P::Output {
        let ctx = self.context(&Route::DeleteSnippet { id: id.to_string() });
        let caller = self.identity.current_identity();

        let outcome = self
            .controller
            .delete(caller.as_ref(), id)
            .map(|()| Outcome::Redirect(Route::Snippets));
        self.respond(&ctx, outcome, None)
    }

    fn context(&self, route: &Route) -> RequestContext {
        let ctx = RequestContext::new(route.path());
        match &self.trace_id {
            Some(trace_id) => ctx.with_trace_id(trace_id.clone()),
            None => ctx,
        }
    }

    fn respond(
        &self,
        ctx: &RequestContext,
        outcome: Result<Outcome, ExError>,
        form_page: Option<FormPage<'_>>,
    ) -> P::Output {
        tracing::debug!(request_id = %ctx.request_id, path = %ctx.path, "responding");

        let err = match outcome {
            Ok(Outcome::Render(view, model)) => return self.presenter.render(view, model),
            Ok(Outcome::Redirect(route)) => return self.presenter.redirect(&route),
            Err(err) => err.with_request_id(ctx.request_id.clone()),
        };
        let err = match &ctx.trace_id {
            Some(trace_id) => err.with_trace_id(trace_id.clone()),
            None => err,
        };

        match (err.kind(), err.field_errors(), form_page) {
            (ExErrorKind::Unauthenticated, _, _) => self.presenter.redirect(&Route::Login {
                next: ctx.path.clone(),
            }),
            (ExErrorKind::Validation, Some(errors), Some(page)) => {
                self.presenter
                    .render_invalid(page.view, page.model, page.submitted, errors)
            }
            _ => self.presenter.error(&err, ctx),
        }
    }
}

fn to_model<T: Serialize>(model: &T) -> Result<Value, ExError> {
    serde_json::to_value(model).map_err(|e| SnippetError::from(e).into())
}
