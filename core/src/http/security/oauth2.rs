//! OAuth2 authorization-code redirect client.
//!
//! Sends unauthenticated browsers to the authorization endpoint of an OAuth2
//! / OpenID Connect provider. The `state` value and, with PKCE, the code
//! verifier are kept in the session for the callback handler.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use actix_client_security_core::http::security::oauth2::{OAuth2Provider, OAuth2RedirectClient};
//!
//! let google = OAuth2RedirectClient::for_provider(
//!     "google",
//!     OAuth2Provider::Google,
//!     "your-client-id",
//!     "your-client-secret",
//!     "http://localhost:8080/callback",
//! )?;
//! ```
//!
//! # Spring Security Comparison
//!
//! | Spring Security | Actix Client Security |
//! |-----------------|----------------|
//! | `ClientRegistration` | `OAuth2RedirectClient` |
//! | `CommonOAuth2Provider` | `OAuth2Provider` |
//! | `OAuth2AuthorizationRequestRedirectFilter` | `OAuth2RedirectClient::redirection_action` |

use std::fmt;

use ::oauth2::basic::BasicClient;
use ::oauth2::{
    AuthUrl, ClientId, ClientSecret, CsrfToken, PkceCodeChallenge, RedirectUrl, Scope, TokenUrl,
};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::http::security::action::HttpAction;
use crate::http::security::ajax::AjaxRequestResolver;
use crate::http::security::client::{
    add_parameter, take_attempted_authentication, Client, ClientKind, CLIENT_NAME_PARAMETER,
};
use crate::http::security::context::WebContext;
use crate::http::security::logic::Outcome;
use crate::http::security::session::SessionError;

/// Session key suffix for the `state` sent to the provider.
pub const STATE_SUFFIX: &str = "$state";

/// Session key suffix for the PKCE code verifier.
pub const PKCE_VERIFIER_SUFFIX: &str = "$pkceCodeVerifier";

/// Invalid client configuration.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// A configured URL could not be parsed.
    #[display("Configuration error: invalid {field} '{url}'")]
    InvalidUrl { field: &'static str, url: String },
    /// The provider has no known endpoint and none was configured.
    #[display("Configuration error: no {field} known for provider {provider:?}")]
    MissingEndpoint {
        field: &'static str,
        provider: OAuth2Provider,
    },
}

/// Common OAuth2/OIDC providers with pre-configured endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OAuth2Provider {
    /// Google OAuth2/OIDC
    Google,
    /// GitHub OAuth2
    GitHub,
    /// Microsoft/Azure AD OAuth2/OIDC
    Microsoft,
    /// Facebook OAuth2
    Facebook,
    /// Apple Sign In
    Apple,
    /// Custom provider (requires manual configuration)
    Custom,
}

impl OAuth2Provider {
    /// Get the authorization endpoint for this provider
    pub fn auth_url(&self) -> Option<&'static str> {
        match self {
            OAuth2Provider::Google => Some("https://accounts.google.com/o/oauth2/v2/auth"),
            OAuth2Provider::GitHub => Some("https://github.com/login/oauth/authorize"),
            OAuth2Provider::Microsoft => {
                Some("https://login.microsoftonline.com/common/oauth2/v2.0/authorize")
            }
            OAuth2Provider::Facebook => Some("https://www.facebook.com/v18.0/dialog/oauth"),
            OAuth2Provider::Apple => Some("https://appleid.apple.com/auth/authorize"),
            OAuth2Provider::Custom => None,
        }
    }

    /// Get the token endpoint for this provider
    pub fn token_url(&self) -> Option<&'static str> {
        match self {
            OAuth2Provider::Google => Some("https://oauth2.googleapis.com/token"),
            OAuth2Provider::GitHub => Some("https://github.com/login/oauth/access_token"),
            OAuth2Provider::Microsoft => {
                Some("https://login.microsoftonline.com/common/oauth2/v2.0/token")
            }
            OAuth2Provider::Facebook => Some("https://graph.facebook.com/v18.0/oauth/access_token"),
            OAuth2Provider::Apple => Some("https://appleid.apple.com/auth/token"),
            OAuth2Provider::Custom => None,
        }
    }

    /// Get default scopes for this provider
    pub fn default_scopes(&self) -> Vec<&'static str> {
        match self {
            OAuth2Provider::Google => vec!["openid", "email", "profile"],
            OAuth2Provider::GitHub => vec!["read:user", "user:email"],
            OAuth2Provider::Microsoft => vec!["openid", "email", "profile"],
            OAuth2Provider::Facebook => vec!["email", "public_profile"],
            OAuth2Provider::Apple => vec!["openid", "email", "name"],
            OAuth2Provider::Custom => vec!["openid"],
        }
    }

    /// Whether PKCE is used by default with this provider.
    pub fn default_pkce(&self) -> bool {
        !matches!(self, OAuth2Provider::GitHub | OAuth2Provider::Facebook)
    }
}

/// Indirect client starting the OAuth2 authorization-code flow.
#[derive(Clone)]
pub struct OAuth2RedirectClient {
    name: String,
    provider: OAuth2Provider,
    client: BasicClient,
    scopes: Vec<String>,
    use_pkce: bool,
    authorization_params: Vec<(String, String)>,
}

impl OAuth2RedirectClient {
    /// Creates a client with explicit endpoints.
    ///
    /// `callback_url` is the application URL the provider sends the user back
    /// to; the client name is appended to it as `client_name`.
    pub fn new(
        name: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        auth_url: &str,
        token_url: &str,
        callback_url: &str,
    ) -> Result<Self, ClientError> {
        let name = name.into();
        let auth_url =
            AuthUrl::new(auth_url.to_string()).map_err(|_| ClientError::InvalidUrl {
                field: "authorization URL",
                url: auth_url.to_string(),
            })?;
        let token_url =
            TokenUrl::new(token_url.to_string()).map_err(|_| ClientError::InvalidUrl {
                field: "token URL",
                url: token_url.to_string(),
            })?;
        let redirect = add_parameter(callback_url, CLIENT_NAME_PARAMETER, &name);
        let redirect_url =
            RedirectUrl::new(redirect).map_err(|_| ClientError::InvalidUrl {
                field: "callback URL",
                url: callback_url.to_string(),
            })?;

        let client = BasicClient::new(
            ClientId::new(client_id.into()),
            Some(ClientSecret::new(client_secret.into())),
            auth_url,
            Some(token_url),
        )
        .set_redirect_uri(redirect_url);

        Ok(OAuth2RedirectClient {
            name,
            provider: OAuth2Provider::Custom,
            client,
            scopes: vec!["openid".to_string()],
            use_pkce: true,
            authorization_params: Vec::new(),
        })
    }

    /// Creates a client for a well-known provider, with its endpoints,
    /// default scopes and PKCE setting.
    pub fn for_provider(
        name: impl Into<String>,
        provider: OAuth2Provider,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        callback_url: &str,
    ) -> Result<Self, ClientError> {
        let auth_url = provider.auth_url().ok_or(ClientError::MissingEndpoint {
            field: "authorization URL",
            provider,
        })?;
        let token_url = provider.token_url().ok_or(ClientError::MissingEndpoint {
            field: "token URL",
            provider,
        })?;

        let mut client = Self::new(
            name,
            client_id,
            client_secret,
            auth_url,
            token_url,
            callback_url,
        )?;
        client.provider = provider;
        client.scopes = provider
            .default_scopes()
            .into_iter()
            .map(String::from)
            .collect();
        client.use_pkce = provider.default_pkce();
        Ok(client)
    }

    /// Replaces the requested scopes.
    pub fn scopes(mut self, scopes: Vec<impl Into<String>>) -> Self {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn use_pkce(mut self, use_pkce: bool) -> Self {
        self.use_pkce = use_pkce;
        self
    }

    /// Adds a custom parameter to the authorization request.
    pub fn authorization_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.authorization_params.push((key.into(), value.into()));
        self
    }

    pub fn get_provider(&self) -> OAuth2Provider {
        self.provider
    }

    pub fn get_scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Session key holding the `state` of the last authorization request.
    pub fn state_key(&self) -> String {
        format!("{}{}", self.name, STATE_SUFFIX)
    }

    /// Session key holding the PKCE code verifier of the last authorization request.
    pub fn pkce_verifier_key(&self) -> String {
        format!("{}{}", self.name, PKCE_VERIFIER_SUFFIX)
    }
}

impl fmt::Debug for OAuth2RedirectClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2RedirectClient")
            .field("name", &self.name)
            .field("provider", &self.provider)
            .field("scopes", &self.scopes)
            .field("use_pkce", &self.use_pkce)
            .finish()
    }
}

impl Client for OAuth2RedirectClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ClientKind {
        ClientKind::Indirect
    }

    fn redirection_action(
        &self,
        ctx: &mut WebContext<'_>,
        ajax_request_resolver: &dyn AjaxRequestResolver,
    ) -> Result<Outcome<HttpAction>, SessionError> {
        let mut request = self.client.authorize_url(CsrfToken::new_random);
        for scope in &self.scopes {
            request = request.add_scope(Scope::new(scope.clone()));
        }
        for (key, value) in &self.authorization_params {
            request = request.add_extra_param(key.clone(), value.clone());
        }

        let verifier = if self.use_pkce {
            let (challenge, verifier) = PkceCodeChallenge::new_random_sha256();
            request = request.set_pkce_challenge(challenge);
            Some(verifier)
        } else {
            None
        };

        let (url, state) = request.url();

        if ajax_request_resolver.is_ajax(ctx) {
            tracing::debug!(client = %self.name, "ajax request detected, not redirecting");
            return Ok(Outcome::Action(
                ajax_request_resolver.build_ajax_response(url.as_str(), ctx),
            ));
        }

        if let Some(action) = take_attempted_authentication(&self.name, ctx) {
            return Ok(Outcome::Action(action));
        }

        ctx.session_set(&self.state_key(), state.secret())?;
        if let Some(verifier) = verifier {
            ctx.session_set(&self.pkce_verifier_key(), verifier.secret())?;
        }

        tracing::debug!(client = %self.name, provider = ?self.provider, "redirecting to authorization endpoint");
        Ok(Outcome::Continue(HttpAction::redirect(ctx, url.to_string())))
    }
}
