//! Per-request web context.
//!
//! # Spring Equivalent
//! The pair `HttpServletRequest` / `HttpServletResponse` as seen by an
//! `AuthenticationEntryPoint`

use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use actix_web::http::Method;
use actix_web::HttpRequest;
use url::form_urlencoded;

use crate::http::security::session::{SessionError, SessionStore};

/// Request-scoped view over the incoming request, its session and the
/// headers to add to the outgoing response.
///
/// A context is created for one entry point invocation and dropped once the
/// resulting action has been rendered.
pub struct WebContext<'a> {
    request: &'a HttpRequest,
    session_store: &'a dyn SessionStore,
    response_headers: HeaderMap,
}

impl<'a> WebContext<'a> {
    /// Creates a context over `request`, storing session data through `session_store`.
    pub fn new(request: &'a HttpRequest, session_store: &'a dyn SessionStore) -> Self {
        WebContext {
            request,
            session_store,
            response_headers: HeaderMap::new(),
        }
    }

    pub fn request(&self) -> &HttpRequest {
        self.request
    }

    pub fn request_method(&self) -> &Method {
        self.request.method()
    }

    pub fn is_post(&self) -> bool {
        self.request.method() == Method::POST
    }

    /// Returns a request header as a string, if present and valid UTF-8.
    pub fn request_header(&self, name: &str) -> Option<&str> {
        self.request.headers().get(name)?.to_str().ok()
    }

    /// Returns the first query parameter named `name`, percent-decoded.
    pub fn request_parameter(&self, name: &str) -> Option<String> {
        form_urlencoded::parse(self.request.query_string().as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Reconstructs the absolute URL of the request: `scheme://host/path?query`.
    pub fn full_request_url(&self) -> String {
        let info = self.request.connection_info();
        let path_and_query = self
            .request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| self.request.path());
        format!("{}://{}{}", info.scheme(), info.host(), path_and_query)
    }

    pub fn session_get(&self, key: &str) -> Option<String> {
        self.session_store.get(self.request, key)
    }

    pub fn session_set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.session_store.set(self.request, key, value)
    }

    pub fn session_remove(&self, key: &str) {
        self.session_store.remove(self.request, key);
    }

    /// Adds a header to the pending response, replacing any previous value.
    ///
    /// Values that are not valid header values are dropped with a warning.
    pub fn set_response_header(&mut self, name: HeaderName, value: &str) {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.response_headers.insert(name, value);
            }
            Err(_) => {
                tracing::warn!(header = %name, "ignoring invalid response header value");
            }
        }
    }

    pub fn response_header(&self, name: &HeaderName) -> Option<&str> {
        self.response_headers.get(name)?.to_str().ok()
    }

    pub fn response_headers(&self) -> &HeaderMap {
        &self.response_headers
    }

    /// Consumes the context, returning the headers collected for the response.
    pub fn into_response_headers(self) -> HeaderMap {
        self.response_headers
    }
}
