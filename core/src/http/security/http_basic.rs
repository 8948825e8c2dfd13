//! HTTP Basic Authentication challenge.
//!
//! # Spring Security Equivalent
//! `org.springframework.security.web.authentication.www.BasicAuthenticationEntryPoint`

use crate::http::security::action::DEFAULT_REALM;

/// HTTP Basic Authentication configuration.
///
/// # Spring Security Equivalent
/// `HttpSecurity.httpBasic()`
///
/// Provides the realm announced in the `WWW-Authenticate` challenge.
#[derive(Clone, Debug)]
pub struct HttpBasicConfig {
    realm: String,
}

impl HttpBasicConfig {
    /// Creates a new HTTP Basic configuration with default realm "Restricted".
    pub fn new() -> Self {
        HttpBasicConfig {
            realm: DEFAULT_REALM.to_string(),
        }
    }

    /// Sets the realm name for the WWW-Authenticate header.
    ///
    /// # Example
    /// ```ignore
    /// let config = HttpBasicConfig::new().realm("MyApplication");
    /// ```
    pub fn realm(mut self, realm: &str) -> Self {
        self.realm = realm.to_string();
        self
    }

    pub fn get_realm(&self) -> &str {
        &self.realm
    }

    /// Creates the WWW-Authenticate header value.
    pub fn www_authenticate_header(&self) -> String {
        format!("Basic realm=\"{}\"", self.realm)
    }
}

impl Default for HttpBasicConfig {
    fn default() -> Self {
        Self::new()
    }
}
