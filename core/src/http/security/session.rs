//! Session storage used by entry points.
//!
//! # Spring Security Equivalent
//! The `HttpSession` attributes used by `HttpSessionRequestCache`.
//!
//! # Example
//! ```rust,ignore
//! use actix_client_security_core::http::security::session::{ActixSessionStore, SessionConfig};
//! use actix_client_security_core::http::security::DefaultSavedRequestHandler;
//! use actix_session::SessionMiddleware;
//! use actix_session::storage::CookieSessionStore;
//!
//! // Configure session middleware (required for the data to survive the request)
//! let session_middleware = SessionMiddleware::new(
//!     CookieSessionStore::default(),
//!     cookie_key.clone()
//! );
//!
//! let saved_requests = DefaultSavedRequestHandler::new(
//!     SessionConfig::new().saved_request_key("original_url"),
//! );
//! let config = SecurityConfig::new(clients).session_store(ActixSessionStore);
//! ```

use actix_session::SessionExt;
use actix_web::HttpRequest;
use derive_more::{Display, Error};

// =============================================================================
// Session Configuration
// =============================================================================

/// Session keys used by the entry point and its collaborators.
///
/// # Example
/// ```rust,ignore
/// let config = SessionConfig::new()
///     .saved_request_key("original_url");
/// ```
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Session key for storing the original request URL (for redirect after login)
    saved_request_key: String,
    /// Session key for storing the authenticated user
    user_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionConfig {
    /// Create a new session configuration with default keys.
    pub fn new() -> Self {
        Self {
            saved_request_key: "security_saved_request".to_string(),
            user_key: "security_user".to_string(),
        }
    }

    /// Set the session key for saved request URL.
    pub fn saved_request_key(mut self, key: &str) -> Self {
        self.saved_request_key = key.to_string();
        self
    }

    /// Get the saved request key.
    pub fn get_saved_request_key(&self) -> &str {
        &self.saved_request_key
    }

    /// Set the session key for the authenticated user.
    pub fn user_key(mut self, key: &str) -> Self {
        self.user_key = key.to_string();
        self
    }

    pub fn get_user_key(&self) -> &str {
        &self.user_key
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// Key/value storage attached to the session of the current request.
///
/// # Spring Equivalent
/// `HttpSession.getAttribute` / `setAttribute` / `removeAttribute`
pub trait SessionStore: Send + Sync {
    /// Reads a value from the session.
    fn get(&self, req: &HttpRequest, key: &str) -> Option<String>;

    /// Writes a value to the session.
    fn set(&self, req: &HttpRequest, key: &str, value: &str) -> Result<(), SessionError>;

    /// Removes a value from the session.
    fn remove(&self, req: &HttpRequest, key: &str);
}

/// Session store backed by `actix-session`.
///
/// # Requirements
/// `SessionMiddleware` must wrap the application for values to persist
/// beyond the current request.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActixSessionStore;

impl SessionStore for ActixSessionStore {
    fn get(&self, req: &HttpRequest, key: &str) -> Option<String> {
        req.get_session().get::<String>(key).ok().flatten()
    }

    fn set(&self, req: &HttpRequest, key: &str, value: &str) -> Result<(), SessionError> {
        req.get_session()
            .insert(key, value)
            .map_err(|e| SessionError::Insert {
                message: e.to_string(),
            })
    }

    fn remove(&self, req: &HttpRequest, key: &str) {
        req.get_session().remove(key);
    }
}

// =============================================================================
// Session Error
// =============================================================================

/// Session-related errors.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Error inserting data into session
    #[display("Session insert error: {message}")]
    Insert { message: String },
}
