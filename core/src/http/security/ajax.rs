//! Detection of background (XHR) requests.
//!
//! Browsers do not follow a redirect to an identity provider issued in
//! answer to an XHR call in any useful way, so such requests get a plain
//! error (or a JSF partial-response redirect) instead.

use actix_web::http::header;

use crate::http::security::action::HttpAction;
use crate::http::security::context::WebContext;

const X_REQUESTED_WITH: &str = "X-Requested-With";
const XML_HTTP_REQUEST: &str = "XMLHttpRequest";
const FACES_REQUEST: &str = "Faces-Request";
const FACES_PARTIAL_AJAX: &str = "partial/ajax";
const IS_AJAX_REQUEST_PARAMETER: &str = "is_ajax_request";

/// Decides whether a request is an ajax call and how to answer one that
/// would otherwise be redirected.
pub trait AjaxRequestResolver: Send + Sync {
    fn is_ajax(&self, ctx: &WebContext<'_>) -> bool;

    /// Builds the response for an ajax request that should go to `url`.
    fn build_ajax_response(&self, url: &str, ctx: &mut WebContext<'_>) -> HttpAction;
}

/// Default resolver.
///
/// A request is ajax when it carries `X-Requested-With: XMLHttpRequest`,
/// `Faces-Request: partial/ajax` or the query parameter `is_ajax_request=true`.
#[derive(Clone, Debug, Default)]
pub struct DefaultAjaxRequestResolver {
    add_redirection_url_as_header: bool,
}

impl DefaultAjaxRequestResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also send the redirection URL as a `Location` header on ajax responses.
    pub fn add_redirection_url_as_header(mut self, add: bool) -> Self {
        self.add_redirection_url_as_header = add;
        self
    }

    pub fn is_add_redirection_url_as_header(&self) -> bool {
        self.add_redirection_url_as_header
    }

    fn is_faces_partial_request(ctx: &WebContext<'_>) -> bool {
        ctx.request_header(FACES_REQUEST) == Some(FACES_PARTIAL_AJAX)
    }
}

impl AjaxRequestResolver for DefaultAjaxRequestResolver {
    fn is_ajax(&self, ctx: &WebContext<'_>) -> bool {
        ctx.request_header(X_REQUESTED_WITH) == Some(XML_HTTP_REQUEST)
            || Self::is_faces_partial_request(ctx)
            || ctx.request_parameter(IS_AJAX_REQUEST_PARAMETER).as_deref() == Some("true")
    }

    fn build_ajax_response(&self, url: &str, ctx: &mut WebContext<'_>) -> HttpAction {
        if self.add_redirection_url_as_header {
            ctx.set_response_header(header::LOCATION, url);
        }

        if !Self::is_faces_partial_request(ctx) {
            return HttpAction::Unauthorized;
        }

        let mut content = String::from("<?xml version='1.0' encoding='UTF-8'?><partial-response>");
        if !url.trim().is_empty() {
            content.push_str(&format!(
                "<redirect url=\"{}\"></redirect>",
                url.replace('&', "&amp;")
            ));
        }
        content.push_str("</partial-response>");
        HttpAction::Ok { content }
    }
}
