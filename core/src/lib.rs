//! # Actix Client Security Core
//!
//! Authentication entry points for Actix Web that hand unauthenticated
//! requests over to an authentication client: indirect clients redirect the
//! browser to an identity provider, direct clients answer `401 Unauthorized`.
//!
//! The main modules are:
//! - [`http::security::entry_point`] - `ClientEntryPoint` and the `AuthenticationEntryPoint` trait
//! - [`http::security::client`] - client abstraction and registry
//! - [`http::security::middleware`] - the security middleware that invokes entry points
//! - [`http::error`] - Error types

pub mod http;
