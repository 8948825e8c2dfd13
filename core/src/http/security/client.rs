//! Authentication clients and their registry.
//!
//! A client is one way of authenticating a user:
//! - an **indirect** client sends the browser to an external identity
//!   provider (OAuth2, SAML, CAS, a central login page...) and gets the user
//!   back on a callback URL;
//! - a **direct** client validates credentials carried by the request itself
//!   (HTTP Basic, API keys, bearer tokens) and can only answer `401` when
//!   they are missing.
//!
//! # Example
//! ```rust,ignore
//! use actix_client_security_core::http::security::client::{BasicAuthClient, Clients, RedirectClient};
//!
//! let clients = Clients::new()
//!     .with_client(RedirectClient::new(
//!         "sso",
//!         "https://sso.example.com/login",
//!         "https://app.example.com/callback",
//!     ))
//!     .with_client(BasicAuthClient::new("basic"));
//!
//! assert!(clients.find_client("SSO").is_some());
//! ```

use std::fmt;
use std::sync::Arc;

use url::form_urlencoded;

use crate::http::security::action::HttpAction;
use crate::http::security::ajax::{AjaxRequestResolver, DefaultAjaxRequestResolver};
use crate::http::security::context::WebContext;
use crate::http::security::http_basic::HttpBasicConfig;
use crate::http::security::logic::Outcome;
use crate::http::security::session::SessionError;

/// Session key suffix marking that a login through a client was already tried.
pub const ATTEMPTED_AUTHENTICATION_SUFFIX: &str = "$attemptedAuthentication";

/// Query parameter carrying the client name on callback URLs.
pub const CLIENT_NAME_PARAMETER: &str = "client_name";

/// Whether a client needs a browser redirect to authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientKind {
    Indirect,
    Direct,
}

/// An authentication mechanism.
pub trait Client: Send + Sync + fmt::Debug {
    /// Unique name of the client in its registry.
    fn name(&self) -> &str;

    fn kind(&self) -> ClientKind;

    /// Whether an unauthenticated request should be sent through an
    /// interactive login with this client.
    ///
    /// Indirect clients say yes by default. A client may instead answer with
    /// an explicit action, which becomes the response.
    fn check_redirect(&self, _ctx: &WebContext<'_>) -> Outcome<bool> {
        Outcome::Continue(self.kind() == ClientKind::Indirect)
    }

    /// Builds the redirect to the identity provider.
    ///
    /// Direct clients cannot redirect; by default they answer with an
    /// unauthenticated action.
    fn redirection_action(
        &self,
        ctx: &mut WebContext<'_>,
        _ajax_request_resolver: &dyn AjaxRequestResolver,
    ) -> Result<Outcome<HttpAction>, SessionError> {
        let challenge = self.www_authenticate();
        Ok(Outcome::Action(HttpAction::unauthenticated(
            ctx,
            challenge.as_deref(),
        )))
    }

    /// `WWW-Authenticate` challenge sent with `401` responses, if the client has one.
    fn www_authenticate(&self) -> Option<String> {
        None
    }
}

/// Session key recording a failed login through the client `client_name`.
pub fn attempted_authentication_key(client_name: &str) -> String {
    format!("{}{}", client_name, ATTEMPTED_AUTHENTICATION_SUFFIX)
}

/// Consumes the attempted-authentication marker of `client_name`.
///
/// Returns the unauthenticated action to answer with when the marker was set.
pub fn take_attempted_authentication(
    client_name: &str,
    ctx: &mut WebContext<'_>,
) -> Option<HttpAction> {
    let key = attempted_authentication_key(client_name);
    ctx.session_get(&key)?;
    tracing::debug!(client = client_name, "authentication already attempted");
    ctx.session_remove(&key);
    Some(HttpAction::unauthenticated(ctx, None))
}

/// Appends a query parameter to `url`, percent-encoding name and value.
pub fn add_parameter(url: &str, name: &str, value: &str) -> String {
    let pair = form_urlencoded::Serializer::new(String::new())
        .append_pair(name, value)
        .finish();
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, pair)
}

// =============================================================================
// Client Registry
// =============================================================================

/// Ordered registry of clients.
///
/// Names are matched ignoring surrounding whitespace and ASCII case.
#[derive(Clone)]
pub struct Clients {
    clients: Vec<Arc<dyn Client>>,
    ajax_request_resolver: Arc<dyn AjaxRequestResolver>,
}

impl Clients {
    /// Creates an empty registry with the default ajax request resolver.
    pub fn new() -> Self {
        Clients {
            clients: Vec::new(),
            ajax_request_resolver: Arc::new(DefaultAjaxRequestResolver::new()),
        }
    }

    /// Registers a client.
    ///
    /// A client whose name is already registered is skipped with a warning.
    pub fn with_client<C: Client + 'static>(self, client: C) -> Self {
        self.with_shared_client(Arc::new(client))
    }

    /// Registers a client that is also referenced elsewhere.
    pub fn with_shared_client(mut self, client: Arc<dyn Client>) -> Self {
        if self.find_client(client.name()).is_some() {
            tracing::warn!(client = client.name(), "client already registered, skipping");
        } else {
            self.clients.push(client);
        }
        self
    }

    /// Sets the resolver deciding whether a request is an ajax call.
    pub fn ajax_request_resolver<R: AjaxRequestResolver + 'static>(mut self, resolver: R) -> Self {
        self.ajax_request_resolver = Arc::new(resolver);
        self
    }

    /// Looks a client up by name.
    pub fn find_client(&self, name: &str) -> Option<Arc<dyn Client>> {
        let name = name.trim();
        self.clients
            .iter()
            .find(|client| client.name().trim().eq_ignore_ascii_case(name))
            .cloned()
    }

    pub fn get_ajax_request_resolver(&self) -> &dyn AjaxRequestResolver {
        self.ajax_request_resolver.as_ref()
    }

    /// Names of the registered clients, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.clients.iter().map(|client| client.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl Default for Clients {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Clients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clients")
            .field("clients", &self.names())
            .finish()
    }
}

// =============================================================================
// Redirect Client
// =============================================================================

/// Indirect client redirecting to a login page of an identity provider.
///
/// The browser is sent to
/// `login_url?<redirect_parameter>=<callback_url?client_name=NAME>`.
///
/// # Example
/// ```rust,ignore
/// let client = RedirectClient::new(
///     "cas",
///     "https://cas.example.com/login",
///     "https://app.example.com/callback",
/// )
/// .redirect_parameter("service");
/// ```
#[derive(Clone, Debug)]
pub struct RedirectClient {
    name: String,
    login_url: String,
    callback_url: String,
    redirect_parameter: String,
}

impl RedirectClient {
    pub fn new(
        name: impl Into<String>,
        login_url: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        RedirectClient {
            name: name.into(),
            login_url: login_url.into(),
            callback_url: callback_url.into(),
            redirect_parameter: "redirect_uri".to_string(),
        }
    }

    /// Sets the login URL parameter carrying the callback URL (default: `redirect_uri`).
    pub fn redirect_parameter(mut self, parameter: &str) -> Self {
        self.redirect_parameter = parameter.to_string();
        self
    }

    pub fn get_login_url(&self) -> &str {
        &self.login_url
    }

    /// Callback URL identifying this client.
    pub fn computed_callback_url(&self) -> String {
        add_parameter(&self.callback_url, CLIENT_NAME_PARAMETER, &self.name)
    }

    /// Full URL the browser is redirected to.
    pub fn redirection_url(&self) -> String {
        add_parameter(
            &self.login_url,
            &self.redirect_parameter,
            &self.computed_callback_url(),
        )
    }

    /// Records a failed login through this client.
    ///
    /// Callback handlers call this when the identity provider did not
    /// authenticate the user; the next unauthenticated request then gets a
    /// `401` instead of another redirect, which would loop.
    pub fn mark_attempted_authentication(&self, ctx: &WebContext<'_>) -> Result<(), SessionError> {
        ctx.session_set(&attempted_authentication_key(&self.name), "true")
    }
}

impl Client for RedirectClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ClientKind {
        ClientKind::Indirect
    }

    fn redirection_action(
        &self,
        ctx: &mut WebContext<'_>,
        ajax_request_resolver: &dyn AjaxRequestResolver,
    ) -> Result<Outcome<HttpAction>, SessionError> {
        let url = self.redirection_url();

        if ajax_request_resolver.is_ajax(ctx) {
            tracing::debug!(client = %self.name, "ajax request detected, not redirecting");
            return Ok(Outcome::Action(
                ajax_request_resolver.build_ajax_response(&url, ctx),
            ));
        }

        if let Some(action) = take_attempted_authentication(&self.name, ctx) {
            return Ok(Outcome::Action(action));
        }

        Ok(Outcome::Continue(HttpAction::redirect(ctx, url)))
    }
}

// =============================================================================
// Basic Auth Client
// =============================================================================

/// Direct client for HTTP Basic authentication.
///
/// Never redirects; unauthenticated requests get
/// `401` with `WWW-Authenticate: Basic realm="..."`.
#[derive(Clone, Debug)]
pub struct BasicAuthClient {
    name: String,
    config: HttpBasicConfig,
}

impl BasicAuthClient {
    pub fn new(name: impl Into<String>) -> Self {
        BasicAuthClient {
            name: name.into(),
            config: HttpBasicConfig::new(),
        }
    }

    pub fn config(mut self, config: HttpBasicConfig) -> Self {
        self.config = config;
        self
    }
}

impl Client for BasicAuthClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ClientKind {
        ClientKind::Direct
    }

    fn www_authenticate(&self) -> Option<String> {
        Some(self.config.www_authenticate_header())
    }
}
