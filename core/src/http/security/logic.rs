//! Decision logic of the client entry point.
//!
//! The entry point does not branch on its own: it asks an injected
//! [`SecurityLogic`] whether to start an interactive login, and the logic may
//! answer with an explicit [`HttpAction`] that replaces the normal decision.

use std::sync::Arc;

use crate::http::security::action::HttpAction;
use crate::http::security::ajax::AjaxRequestResolver;
use crate::http::security::client::Client;
use crate::http::security::context::WebContext;
use crate::http::security::saved_request::{DefaultSavedRequestHandler, SavedRequestHandler};
use crate::http::security::session::SessionError;

/// Result of a decision step that may short-circuit with an explicit action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Respond with this action, skipping the remaining decision steps.
    Action(HttpAction),
    /// No explicit action; carry on with the value.
    Continue(T),
}

impl<T> Outcome<T> {
    pub fn is_action(&self) -> bool {
        matches!(self, Outcome::Action(_))
    }
}

/// Policy consulted by the entry point.
///
/// `clients` holds the clients that apply to the current request; for the
/// client entry point this is always the single configured client.
pub trait SecurityLogic: Send + Sync {
    /// Whether an interactive login should start for these clients.
    fn start_authentication(
        &self,
        ctx: &WebContext<'_>,
        clients: &[Arc<dyn Client>],
    ) -> Outcome<bool>;

    /// Saves the originally requested URL for the post-login redirect.
    fn save_requested_url(
        &self,
        ctx: &mut WebContext<'_>,
        clients: &[Arc<dyn Client>],
        ajax_request_resolver: &dyn AjaxRequestResolver,
    ) -> Result<(), SessionError>;

    /// Builds the redirect to the identity provider of the first client.
    fn redirect_to_identity_provider(
        &self,
        ctx: &mut WebContext<'_>,
        clients: &[Arc<dyn Client>],
        ajax_request_resolver: &dyn AjaxRequestResolver,
    ) -> Result<Outcome<HttpAction>, SessionError>;

    /// Builds the response for a request that cannot log in interactively.
    fn unauthorized(&self, ctx: &mut WebContext<'_>, clients: &[Arc<dyn Client>]) -> HttpAction;
}

/// Default policy: start authentication when the first client is indirect.
#[derive(Clone)]
pub struct DefaultSecurityLogic {
    saved_request_handler: Arc<dyn SavedRequestHandler>,
}

impl DefaultSecurityLogic {
    pub fn new() -> Self {
        DefaultSecurityLogic {
            saved_request_handler: Arc::new(DefaultSavedRequestHandler::default()),
        }
    }

    /// Sets the handler used to save the requested URL.
    pub fn saved_request_handler<H: SavedRequestHandler + 'static>(mut self, handler: H) -> Self {
        self.saved_request_handler = Arc::new(handler);
        self
    }

    pub fn get_saved_request_handler(&self) -> &dyn SavedRequestHandler {
        self.saved_request_handler.as_ref()
    }
}

impl Default for DefaultSecurityLogic {
    fn default() -> Self {
        Self::new()
    }
}

impl SecurityLogic for DefaultSecurityLogic {
    fn start_authentication(
        &self,
        ctx: &WebContext<'_>,
        clients: &[Arc<dyn Client>],
    ) -> Outcome<bool> {
        match clients.first() {
            Some(client) => client.check_redirect(ctx),
            None => Outcome::Continue(false),
        }
    }

    fn save_requested_url(
        &self,
        ctx: &mut WebContext<'_>,
        _clients: &[Arc<dyn Client>],
        ajax_request_resolver: &dyn AjaxRequestResolver,
    ) -> Result<(), SessionError> {
        if ajax_request_resolver.is_ajax(ctx) {
            tracing::debug!("ajax request, not saving the requested URL");
            return Ok(());
        }
        self.saved_request_handler.save(ctx)
    }

    fn redirect_to_identity_provider(
        &self,
        ctx: &mut WebContext<'_>,
        clients: &[Arc<dyn Client>],
        ajax_request_resolver: &dyn AjaxRequestResolver,
    ) -> Result<Outcome<HttpAction>, SessionError> {
        let client = match clients.first() {
            Some(client) => client,
            None => return Ok(Outcome::Action(HttpAction::unauthenticated(ctx, None))),
        };

        match client.redirection_action(ctx, ajax_request_resolver)? {
            Outcome::Action(action) => {
                // No redirect happens, the saved URL would never be consumed.
                self.saved_request_handler.clear(ctx);
                Ok(Outcome::Action(action))
            }
            redirect => Ok(redirect),
        }
    }

    fn unauthorized(&self, ctx: &mut WebContext<'_>, clients: &[Arc<dyn Client>]) -> HttpAction {
        let challenge = clients.first().and_then(|client| client.www_authenticate());
        HttpAction::unauthenticated(ctx, challenge.as_deref())
    }
}
