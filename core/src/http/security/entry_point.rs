//! Authentication entry points.
//!
//! # Spring Security Equivalent
//! `org.springframework.security.web.AuthenticationEntryPoint`
//!
//! An entry point is what the security middleware runs when an
//! unauthenticated principal reaches a protected resource. [`ClientEntryPoint`]
//! hands the request to a configured client: an indirect client redirects the
//! browser to its identity provider, a direct client answers `401`.
//!
//! # Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use actix_client_security_core::http::security::{
//!     ClientEntryPoint, Clients, RedirectClient, RequestMatcherAuthorizer, SecurityConfig,
//! };
//!
//! let config = Arc::new(SecurityConfig::new(
//!     Clients::new().with_client(RedirectClient::new(
//!         "sso",
//!         "https://sso.example.com/login",
//!         "https://app.example.com/callback",
//!     )),
//! ));
//!
//! let authorizer = RequestMatcherAuthorizer::new()
//!     .entry_point(Arc::new(ClientEntryPoint::try_new(config, "sso")?))
//!     .add_matcher("/admin/.*", Access::new().roles(vec!["ADMIN"]));
//! ```

use std::fmt;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{error, HttpRequest, HttpResponse};
use derive_more::{Display, Error};

use crate::http::error::AuthError;
use crate::http::security::action::HttpAction;
use crate::http::security::client::Client;
use crate::http::security::context::WebContext;
use crate::http::security::logic::{Outcome, SecurityLogic};
use crate::http::security::security_config::SecurityConfig;
use crate::http::security::session::SessionError;

/// Starts an authentication scheme for an unauthenticated request.
pub trait AuthenticationEntryPoint: Send + Sync {
    /// Produces the response sent to the unauthenticated caller.
    ///
    /// `auth_error` tells why authentication is required.
    fn commence(
        &self,
        req: &HttpRequest,
        auth_error: &AuthError,
    ) -> Result<HttpResponse, EntryPointError>;
}

/// Failure of an entry point to produce a response.
#[derive(Debug, Display, Error)]
pub enum EntryPointError {
    /// No configuration, or a blank client name.
    #[display("configuration and client name must be defined")]
    MissingConfiguration,
    /// The configured client name matches no registered client.
    #[display("Cannot find client name: {client_name}")]
    ClientNotFound { client_name: String },
    /// The session rejected a write.
    #[display("{source}")]
    Session { source: SessionError },
}

impl From<SessionError> for EntryPointError {
    fn from(source: SessionError) -> Self {
        EntryPointError::Session { source }
    }
}

impl error::ResponseError for EntryPointError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Entry point delegating to one client of a [`SecurityConfig`].
///
/// Read-only once built; share it behind an `Arc`.
#[derive(Clone, Default)]
pub struct ClientEntryPoint {
    config: Option<Arc<SecurityConfig>>,
    client_name: Option<String>,
}

impl ClientEntryPoint {
    /// Creates an entry point for the client `client_name`.
    ///
    /// Nothing is checked here; a missing client makes each request fail.
    /// See [`ClientEntryPoint::try_new`] to check the name up front.
    pub fn new(config: Arc<SecurityConfig>, client_name: impl Into<String>) -> Self {
        ClientEntryPoint {
            config: Some(config),
            client_name: Some(client_name.into()),
        }
    }

    /// Creates an entry point, failing if `client_name` is blank or not registered.
    pub fn try_new(
        config: Arc<SecurityConfig>,
        client_name: impl Into<String>,
    ) -> Result<Self, EntryPointError> {
        let client_name = client_name.into();
        if client_name.trim().is_empty() {
            return Err(EntryPointError::MissingConfiguration);
        }
        if config.get_clients().find_client(&client_name).is_none() {
            return Err(EntryPointError::ClientNotFound { client_name });
        }
        Ok(Self::new(config, client_name))
    }

    pub fn config(&self) -> Option<&Arc<SecurityConfig>> {
        self.config.as_ref()
    }

    pub fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }

    /// Chooses between a redirect to the identity provider and a `401`.
    ///
    /// An explicit action returned by the logic or the client is used as is.
    fn decide_action(
        &self,
        logic: &dyn SecurityLogic,
        ctx: &mut WebContext<'_>,
        config: &SecurityConfig,
        client: Arc<dyn Client>,
    ) -> Result<HttpAction, SessionError> {
        let clients = [client];
        let ajax_request_resolver = config.get_clients().get_ajax_request_resolver();

        let start = match logic.start_authentication(ctx, &clients) {
            Outcome::Action(action) => return Ok(explicit(action)),
            Outcome::Continue(start) => start,
        };

        if !start {
            return Ok(logic.unauthorized(ctx, &clients));
        }

        tracing::debug!("Redirecting to identity provider for login");
        logic.save_requested_url(ctx, &clients, ajax_request_resolver)?;
        match logic.redirect_to_identity_provider(ctx, &clients, ajax_request_resolver)? {
            Outcome::Action(action) => Ok(explicit(action)),
            Outcome::Continue(action) => Ok(action),
        }
    }
}

fn explicit(action: HttpAction) -> HttpAction {
    tracing::debug!(code = action.code(), "extra HTTP action required");
    action
}

impl AuthenticationEntryPoint for ClientEntryPoint {
    fn commence(
        &self,
        req: &HttpRequest,
        auth_error: &AuthError,
    ) -> Result<HttpResponse, EntryPointError> {
        let (config, client_name) = match (&self.config, self.client_name()) {
            (Some(config), Some(name)) if !name.trim().is_empty() => (config, name),
            _ => return Err(EntryPointError::MissingConfiguration),
        };

        tracing::debug!(
            client = client_name,
            path = req.path(),
            reason = %auth_error,
            "commencing authentication"
        );

        let session_store = config.find_session_store();
        let adapter = config.find_http_action_adapter();
        let logic = config.find_security_logic();
        let mut ctx = WebContext::new(req, session_store.as_ref());

        let client = config.get_clients().find_client(client_name).ok_or_else(|| {
            EntryPointError::ClientNotFound {
                client_name: client_name.to_string(),
            }
        })?;

        let action = self.decide_action(logic.as_ref(), &mut ctx, config, client)?;
        Ok(adapter.adapt(action, ctx))
    }
}

impl fmt::Display for ClientEntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#ClientEntryPoint# | config: ")?;
        match &self.config {
            Some(config) => write!(f, "{:?}", config)?,
            None => write!(f, "none")?,
        }
        write!(
            f,
            " | client_name: {} |",
            self.client_name.as_deref().unwrap_or("none")
        )
    }
}

impl fmt::Debug for ClientEntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientEntryPoint")
            .field("config", &self.config)
            .field("client_name", &self.client_name)
            .finish()
    }
}
