//! Saved request handling.
//!
//! # Spring Security Equivalent
//! `RequestCache` / `SavedRequest`
//!
//! The URL the user originally asked for is saved in the session before the
//! redirect to the identity provider, so the application can send the user
//! back there once login completes.

use crate::http::security::action::HttpAction;
use crate::http::security::context::WebContext;
use crate::http::security::session::{SessionConfig, SessionError};

/// Saves and restores the originally requested URL.
pub trait SavedRequestHandler: Send + Sync {
    /// Saves the current request URL.
    fn save(&self, ctx: &mut WebContext<'_>) -> Result<(), SessionError>;

    /// Removes the saved URL and returns a redirect to it, or to `default_url`
    /// when nothing was saved.
    fn restore(&self, ctx: &mut WebContext<'_>, default_url: &str) -> HttpAction;

    /// Forgets the saved URL, if any.
    fn clear(&self, ctx: &mut WebContext<'_>);
}

/// Stores the full request URL under the configured session key.
#[derive(Clone, Debug, Default)]
pub struct DefaultSavedRequestHandler {
    config: SessionConfig,
}

impl DefaultSavedRequestHandler {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Session key the URL is stored under.
    pub fn key(&self) -> &str {
        self.config.get_saved_request_key()
    }
}

impl SavedRequestHandler for DefaultSavedRequestHandler {
    fn save(&self, ctx: &mut WebContext<'_>) -> Result<(), SessionError> {
        let requested_url = ctx.full_request_url();
        tracing::debug!(url = %requested_url, "saving requested URL");
        ctx.session_set(self.key(), &requested_url)
    }

    fn restore(&self, ctx: &mut WebContext<'_>, default_url: &str) -> HttpAction {
        let saved = ctx.session_get(self.key());
        if saved.is_some() {
            ctx.session_remove(self.key());
        }

        let location = saved.unwrap_or_else(|| default_url.to_string());
        tracing::debug!(url = %location, "restoring requested URL");
        HttpAction::redirect(ctx, location)
    }

    fn clear(&self, ctx: &mut WebContext<'_>) {
        // Leave untouched sessions unchanged so no cookie is issued.
        if ctx.session_get(self.key()).is_some() {
            ctx.session_remove(self.key());
        }
    }
}
