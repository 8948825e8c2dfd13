//! Authenticated user profile.
//!
//! # Spring Equivalent
//! `OAuth2User` / `AuthenticatedPrincipal`

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user authenticated through one of the clients.
///
/// Stored in the session once the identity provider called back, and in the
/// request extensions while a request is processed.
///
/// # Example
/// ```
/// use actix_client_security_core::http::security::User;
///
/// let user = User::new("alice")
///     .client_name("sso")
///     .roles(&["ADMIN", "USER"])
///     .authorities(&["users:read"]);
///
/// assert!(user.has_role("ADMIN"));
/// assert!(user.has_authority("users:read"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    username: String,
    #[serde(default)]
    client_name: Option<String>,
    #[serde(default)]
    roles: Vec<String>,
    #[serde(default)]
    authorities: Vec<String>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        User {
            username: username.into(),
            client_name: None,
            roles: Vec::new(),
            authorities: Vec::new(),
        }
    }

    /// Sets the name of the client that authenticated the user.
    pub fn client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = Some(client_name.into());
        self
    }

    /// Adds roles, skipping duplicates.
    pub fn roles(mut self, roles: &[&str]) -> Self {
        for role in roles {
            if !self.has_role(role) {
                self.roles.push(role.to_string());
            }
        }
        self
    }

    /// Adds authorities, skipping duplicates.
    pub fn authorities(mut self, authorities: &[&str]) -> Self {
        for authority in authorities {
            if !self.has_authority(authority) {
                self.authorities.push(authority.to_string());
            }
        }
        self
    }

    pub fn get_username(&self) -> &str {
        &self.username
    }

    pub fn get_client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }

    pub fn get_roles(&self) -> &[String] {
        &self.roles
    }

    pub fn get_authorities(&self) -> &[String] {
        &self.authorities
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Checks if the user has ANY of the specified roles (OR logic).
    pub fn has_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        roles.iter().any(|role| self.has_role(role.as_ref()))
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }

    /// Checks if the user has ANY of the specified authorities (OR logic).
    pub fn has_any_authority<S: AsRef<str>>(&self, authorities: &[S]) -> bool {
        authorities
            .iter()
            .any(|authority| self.has_authority(authority.as_ref()))
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User {{ username: {}, client: {}, roles: {:?}, authorities: {:?} }}",
            self.username,
            self.client_name.as_deref().unwrap_or("-"),
            self.roles,
            self.authorities
        )
    }
}
