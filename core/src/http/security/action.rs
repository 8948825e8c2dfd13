//! HTTP actions and their rendering onto Actix responses.
//!
//! An [`HttpAction`] describes a response (status, redirect target, body)
//! before it is written. Entry points decide on an action, then hand it to an
//! [`HttpActionAdapter`] which produces the concrete `HttpResponse`.

use std::fmt;

use actix_web::http::header;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, HttpResponseBuilder};

use crate::http::security::context::WebContext;

/// Realm used in the default `WWW-Authenticate` challenge.
pub const DEFAULT_REALM: &str = "Restricted";

/// Abstract description of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpAction {
    /// 200 with a body
    Ok { content: String },
    /// 204
    NoContent,
    /// 302
    Found { location: String },
    /// 303, used for redirects answering a POST
    SeeOther { location: String },
    /// 307
    TemporaryRedirect { location: String },
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// Any other status code, without body
    Status(u16),
}

impl HttpAction {
    /// Builds a redirect to `location`.
    ///
    /// POST requests get `303 See Other` so that the browser follows with a
    /// GET; everything else gets `302 Found`.
    pub fn redirect(ctx: &WebContext<'_>, location: impl Into<String>) -> Self {
        let location = location.into();
        if ctx.is_post() {
            HttpAction::SeeOther { location }
        } else {
            HttpAction::Found { location }
        }
    }

    /// Builds the `401 Unauthorized` action for an unauthenticated request.
    ///
    /// A `WWW-Authenticate` header is added to the context unless one is
    /// already pending: `challenge` when given, `Bearer realm="Restricted"`
    /// otherwise.
    pub fn unauthenticated(ctx: &mut WebContext<'_>, challenge: Option<&str>) -> Self {
        if ctx.response_header(&header::WWW_AUTHENTICATE).is_none() {
            let value = match challenge {
                Some(challenge) => challenge.to_string(),
                None => format!("Bearer realm=\"{}\"", DEFAULT_REALM),
            };
            ctx.set_response_header(header::WWW_AUTHENTICATE, &value);
        }
        HttpAction::Unauthorized
    }

    /// Status code of the action.
    pub fn code(&self) -> u16 {
        match self {
            HttpAction::Ok { .. } => 200,
            HttpAction::NoContent => 204,
            HttpAction::Found { .. } => 302,
            HttpAction::SeeOther { .. } => 303,
            HttpAction::TemporaryRedirect { .. } => 307,
            HttpAction::BadRequest => 400,
            HttpAction::Unauthorized => 401,
            HttpAction::Forbidden => 403,
            HttpAction::Status(code) => *code,
        }
    }

    /// Redirect target, for redirecting actions.
    pub fn location(&self) -> Option<&str> {
        match self {
            HttpAction::Found { location }
            | HttpAction::SeeOther { location }
            | HttpAction::TemporaryRedirect { location } => Some(location),
            _ => None,
        }
    }

    /// Response body, for actions that carry one.
    pub fn content(&self) -> Option<&str> {
        match self {
            HttpAction::Ok { content } => Some(content),
            _ => None,
        }
    }
}

impl fmt::Display for HttpAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location() {
            Some(location) => write!(f, "{} -> {}", self.code(), location),
            None => write!(f, "{}", self.code()),
        }
    }
}

// =============================================================================
// Action Adapter
// =============================================================================

/// Renders an [`HttpAction`] onto a concrete response.
///
/// The context is consumed: its pending response headers are part of the
/// rendered response.
pub trait HttpActionAdapter: Send + Sync {
    fn adapt(&self, action: HttpAction, ctx: WebContext<'_>) -> HttpResponse;
}

/// Default adapter producing an Actix `HttpResponse`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActixHttpActionAdapter;

impl HttpActionAdapter for ActixHttpActionAdapter {
    fn adapt(&self, action: HttpAction, ctx: WebContext<'_>) -> HttpResponse {
        let status =
            StatusCode::from_u16(action.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut builder = HttpResponseBuilder::new(status);

        for (name, value) in ctx.into_response_headers().iter() {
            builder.insert_header((name.clone(), value.clone()));
        }
        if let Some(location) = action.location() {
            builder.insert_header((header::LOCATION, location));
        }

        match action {
            HttpAction::Ok { content } => builder.body(content),
            _ => builder.finish(),
        }
    }
}
