//! Client-based security for Actix Web.
//!
//! # Spring Equivalent
//! `org.springframework.security` package, with pac4j-style clients
//!
//! # Module Structure
//!
//! - `entry_point` - Authentication entry points (ClientEntryPoint)
//! - `logic` - Decision logic consulted by entry points (DefaultSecurityLogic)
//! - `client` - Clients and their registry (RedirectClient, BasicAuthClient)
//! - `oauth2` - OAuth2 / OpenID Connect redirect client
//! - `security_config` - Shared configuration (SecurityConfig)
//! - `action` - HTTP actions and their rendering
//! - `context` - Per-request web context
//! - `ajax` - Ajax request detection
//! - `session` - Session storage
//! - `saved_request` - Requested URL saved before login
//! - `http_basic` - HTTP Basic challenge
//! - `authenticator` - Session-backed authentication (SessionAuthenticator)
//! - `authorizer` - Request authorization (RequestMatcherAuthorizer)
//! - `config` - Core traits (Authenticator, Authorizer)
//! - `extractor` - Actix Web extractors (AuthenticatedUser, OptionalUser)
//! - `middleware` - Security middleware (SecurityTransform)
//! - `user` - User model
//!
//! # Feature Flags
//! - `oauth2`: Enables `OAuth2RedirectClient` (enabled by default)

// Re-exports for convenience
pub use action::{ActixHttpActionAdapter, HttpAction, HttpActionAdapter};
pub use ajax::{AjaxRequestResolver, DefaultAjaxRequestResolver};
pub use authenticator::SessionAuthenticator;
pub use authorizer::{Access, RequestMatcherAuthorizer};
pub use client::{BasicAuthClient, Client, ClientKind, Clients, RedirectClient};
pub use config::{Authenticator, Authorizer};
pub use context::WebContext;
pub use entry_point::{AuthenticationEntryPoint, ClientEntryPoint, EntryPointError};
pub use extractor::{AuthenticatedUser, OptionalUser, SecurityExt};
pub use http_basic::HttpBasicConfig;
pub use logic::{DefaultSecurityLogic, Outcome, SecurityLogic};
pub use middleware::SecurityTransform;
#[cfg(feature = "oauth2")]
pub use self::oauth2::{ClientError, OAuth2Provider, OAuth2RedirectClient};
pub use saved_request::{DefaultSavedRequestHandler, SavedRequestHandler};
pub use security_config::SecurityConfig;
pub use session::{ActixSessionStore, SessionConfig, SessionError, SessionStore};
pub use user::User;

pub mod action;
pub mod ajax;
pub mod authenticator;
pub mod authorizer;
pub mod client;
pub mod config;
pub mod context;
pub mod entry_point;
pub mod extractor;
pub mod http_basic;
pub mod logic;
pub mod middleware;
#[cfg(feature = "oauth2")]
pub mod oauth2;
pub mod saved_request;
pub mod security_config;
pub mod session;
pub mod user;
