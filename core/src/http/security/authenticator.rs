//! Session-backed authentication.
//!
//! # Spring Security Equivalent
//! `HttpSessionSecurityContextRepository`
//!
//! Once an identity provider called back and the profile was validated, the
//! callback handler logs the user in with [`SessionAuthenticator::login`].
//! On later requests the middleware reads the user back from the session.

use actix_session::SessionExt;
use actix_web::dev::ServiceRequest;
use actix_web::HttpRequest;

use crate::http::security::config::Authenticator;
use crate::http::security::session::{SessionConfig, SessionError};
use crate::http::security::user::User;

/// Authenticator reading the [`User`] stored in the session.
///
/// # Requirements
/// `SessionMiddleware` must wrap the `SecurityTransform`.
///
/// # Example
/// ```ignore
/// App::new()
///     .wrap(SecurityTransform::new()
///         .config_authenticator(SessionAuthenticator::new())
///         .config_authorizer(authorizer))
///     .wrap(SessionMiddleware::new(CookieSessionStore::default(), key))
/// ```
#[derive(Clone, Debug, Default)]
pub struct SessionAuthenticator {
    config: SessionConfig,
}

impl SessionAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Stores `user` in the session of `req`.
    pub fn login(&self, req: &HttpRequest, user: &User) -> Result<(), SessionError> {
        tracing::debug!(user = user.get_username(), "storing user in session");
        req.get_session()
            .insert(self.config.get_user_key(), user)
            .map_err(|e| SessionError::Insert {
                message: e.to_string(),
            })
    }

    /// Removes the user from the session of `req`.
    pub fn logout(&self, req: &HttpRequest) {
        req.get_session().remove(self.config.get_user_key());
    }

    fn read_user(&self, req: &HttpRequest) -> Option<User> {
        match req.get_session().get::<User>(self.config.get_user_key()) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable user in session");
                None
            }
        }
    }
}

impl Authenticator for SessionAuthenticator {
    fn get_user(&self, req: &ServiceRequest) -> Option<User> {
        self.read_user(req.request())
    }
}
