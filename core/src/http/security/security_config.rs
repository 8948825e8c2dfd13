//! Shared security configuration.
//!
//! Holds the client registry and the collaborators an entry point needs:
//! the session store, the action adapter and the decision logic. Every
//! collaborator is optional; an entry point falls back to the default
//! implementation when none is configured.

use std::fmt;
use std::sync::Arc;

use crate::http::security::action::{ActixHttpActionAdapter, HttpActionAdapter};
use crate::http::security::client::Clients;
use crate::http::security::logic::{DefaultSecurityLogic, SecurityLogic};
use crate::http::security::session::{ActixSessionStore, SessionStore};

/// Security configuration.
///
/// # Example
/// ```rust,ignore
/// let config = SecurityConfig::new(
///     Clients::new().with_client(RedirectClient::new("sso", login_url, callback_url)),
/// )
/// .security_logic(DefaultSecurityLogic::new());
/// ```
#[derive(Clone)]
pub struct SecurityConfig {
    clients: Clients,
    session_store: Option<Arc<dyn SessionStore>>,
    http_action_adapter: Option<Arc<dyn HttpActionAdapter>>,
    security_logic: Option<Arc<dyn SecurityLogic>>,
}

impl SecurityConfig {
    pub fn new(clients: Clients) -> Self {
        SecurityConfig {
            clients,
            session_store: None,
            http_action_adapter: None,
            security_logic: None,
        }
    }

    pub fn session_store<S: SessionStore + 'static>(mut self, store: S) -> Self {
        self.session_store = Some(Arc::new(store));
        self
    }

    pub fn http_action_adapter<A: HttpActionAdapter + 'static>(mut self, adapter: A) -> Self {
        self.http_action_adapter = Some(Arc::new(adapter));
        self
    }

    pub fn security_logic<L: SecurityLogic + 'static>(mut self, logic: L) -> Self {
        self.security_logic = Some(Arc::new(logic));
        self
    }

    pub fn get_clients(&self) -> &Clients {
        &self.clients
    }

    pub fn get_session_store(&self) -> Option<Arc<dyn SessionStore>> {
        self.session_store.clone()
    }

    pub fn get_http_action_adapter(&self) -> Option<Arc<dyn HttpActionAdapter>> {
        self.http_action_adapter.clone()
    }

    pub fn get_security_logic(&self) -> Option<Arc<dyn SecurityLogic>> {
        self.security_logic.clone()
    }

    // ===== Resolution =====

    /// Configured session store, or the actix-session backed one.
    pub fn find_session_store(&self) -> Arc<dyn SessionStore> {
        self.session_store
            .clone()
            .unwrap_or_else(|| Arc::new(ActixSessionStore))
    }

    /// Configured action adapter, or the actix-web one.
    pub fn find_http_action_adapter(&self) -> Arc<dyn HttpActionAdapter> {
        self.http_action_adapter
            .clone()
            .unwrap_or_else(|| Arc::new(ActixHttpActionAdapter))
    }

    /// Configured decision logic, or [`DefaultSecurityLogic`].
    pub fn find_security_logic(&self) -> Arc<dyn SecurityLogic> {
        self.security_logic
            .clone()
            .unwrap_or_else(|| Arc::new(DefaultSecurityLogic::new()))
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("clients", &self.clients)
            .field("session_store", &self.session_store.is_some())
            .field("http_action_adapter", &self.http_action_adapter.is_some())
            .field("security_logic", &self.security_logic.is_some())
            .finish()
    }
}
