//! Request Matcher based Authorization.
//!
//! # Spring Security Equivalent
//! `org.springframework.security.web.access.intercept.RequestMatcherDelegatingAuthorizationManager`
//! together with `ExceptionTranslationFilter`

use std::future::ready;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{http, Error, HttpResponse};
use futures_util::future::LocalBoxFuture;
use regex::Regex;

use crate::http::error::AuthError;
use crate::http::security::config::Authorizer;
use crate::http::security::entry_point::AuthenticationEntryPoint;
use crate::http::security::http_basic::HttpBasicConfig;
use crate::http::security::user::User;

/// URL pattern-based authorization.
///
/// Patterns are checked in registration order; the first match decides.
/// Unauthenticated requests on protected paths are handed to the configured
/// entry point, or get an HTTP Basic challenge, or are redirected to the
/// login page, in that order of preference.
///
/// # Example
/// ```ignore
/// use actix_client_security_core::http::security::authorizer::{RequestMatcherAuthorizer, Access};
///
/// let authorizer = RequestMatcherAuthorizer::new()
///     .entry_point(Arc::new(ClientEntryPoint::try_new(config, "sso")?))
///     .add_matcher("/callback", Access::new().permit_all())
///     .add_matcher("/admin/.*", Access::new().roles(vec!["ADMIN"]))
///     .add_matcher("/api/.*", Access::new().authorities(vec!["api:read"]));
/// ```
pub struct RequestMatcherAuthorizer {
    login_url: String,
    matchers: Vec<(Regex, Access)>,
    entry_point: Option<Arc<dyn AuthenticationEntryPoint>>,
    http_basic: Option<HttpBasicConfig>,
}

impl RequestMatcherAuthorizer {
    /// Creates a new authorizer with default settings.
    pub fn new() -> Self {
        RequestMatcherAuthorizer {
            login_url: "/login".to_string(),
            matchers: Vec::new(),
            entry_point: None,
            http_basic: None,
        }
    }

    /// Adds a URL pattern with access requirements.
    ///
    /// The pattern must match the whole path. Invalid patterns are skipped
    /// with a warning.
    pub fn add_matcher(mut self, url_regex: &str, access: Access) -> Self {
        match Regex::new(&format!("^(?:{})$", url_regex)) {
            Ok(re) => self.matchers.push((re, access)),
            Err(e) => {
                tracing::warn!(pattern = url_regex, error = %e, "ignoring invalid URL pattern");
            }
        }
        self
    }

    /// Sets the login URL (default: "/login").
    ///
    /// Without entry point or HTTP Basic, unauthenticated users are
    /// redirected here.
    pub fn login_url(mut self, url: &str) -> Self {
        self.login_url = url.to_string();
        self
    }

    /// Sets the entry point commenced for unauthenticated requests.
    ///
    /// # Spring Security Equivalent
    /// `HttpSecurity.exceptionHandling().authenticationEntryPoint(..)`
    pub fn entry_point(mut self, entry_point: Arc<dyn AuthenticationEntryPoint>) -> Self {
        self.entry_point = Some(entry_point);
        self
    }

    /// Enables HTTP Basic authentication.
    ///
    /// # Spring Security Equivalent
    /// `HttpSecurity.httpBasic()`
    pub fn http_basic(mut self) -> Self {
        self.http_basic = Some(HttpBasicConfig::new());
        self
    }

    /// Enables HTTP Basic authentication with custom configuration.
    pub fn http_basic_with_config(mut self, config: HttpBasicConfig) -> Self {
        self.http_basic = Some(config);
        self
    }

    /// Returns the access rule of the first pattern matching `path`.
    pub fn matches(&self, path: &str) -> Option<&Access> {
        self.matchers
            .iter()
            .find(|(re, _)| re.is_match(path))
            .map(|(_, access)| access)
    }

    fn challenge<B: 'static>(
        &self,
        req: ServiceRequest,
    ) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
        if let Some(entry_point) = &self.entry_point {
            let res = entry_point.commence(req.request(), &AuthError::InsufficientAuthentication);
            return Box::pin(async move {
                let res = res?;
                Ok::<_, Error>(req.into_response(res.map_into_right_body()))
            });
        }

        let res = match &self.http_basic {
            Some(basic_config) => HttpResponse::Unauthorized()
                .append_header((
                    http::header::WWW_AUTHENTICATE,
                    basic_config.www_authenticate_header(),
                ))
                .finish(),
            None => HttpResponse::Found()
                .append_header((http::header::LOCATION, self.login_url.clone()))
                .finish(),
        };
        Box::pin(ready(Ok(req.into_response(res.map_into_right_body()))))
    }
}

impl Default for RequestMatcherAuthorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: 'static> Authorizer<B> for RequestMatcherAuthorizer {
    fn process(
        &self,
        req: ServiceRequest,
        user: Option<&User>,
        next: impl FnOnce(ServiceRequest) -> LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>>
            + 'static,
    ) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
        let forward = move |req: ServiceRequest| -> LocalBoxFuture<
            'static,
            Result<ServiceResponse<EitherBody<B>>, Error>,
        > {
            Box::pin(async move {
                let res = next(req).await?;
                Ok(res.map_into_left_body())
            })
        };

        let path = req.path().to_string();
        let access = self.matches(&path);

        if access.is_some_and(|access| access.permit_all) {
            return forward(req);
        }

        match user {
            Some(u) => {
                if path == self.login_url {
                    // Redirect authenticated users away from login page
                    return Box::pin(ready(Ok(req.into_response(
                        HttpResponse::Found()
                            .append_header((http::header::LOCATION, "/"))
                            .finish()
                            .map_into_right_body(),
                    ))));
                }

                match access {
                    Some(access) if !access.is_granted(u) => {
                        tracing::debug!(user = u.get_username(), path = %path, "access denied");
                        Box::pin(ready(Ok(req.into_response(
                            HttpResponse::Forbidden().finish().map_into_right_body(),
                        ))))
                    }
                    _ => forward(req),
                }
            }
            None => {
                if path == self.login_url {
                    return forward(req);
                }
                tracing::debug!(path = %path, "unauthenticated request on protected path");
                self.challenge(req)
            }
        }
    }
}

// =============================================================================
// Access Configuration
// =============================================================================

/// Access configuration for URL patterns.
///
/// # Spring Security Equivalent
/// `AuthorizeHttpRequestsConfigurer`
///
/// # Example
/// ```ignore
/// // Require ADMIN or MANAGER role
/// let management_access = Access::new().roles(vec!["ADMIN", "MANAGER"]);
///
/// // Public callback endpoint
/// let callback_access = Access::new().permit_all();
/// ```
#[derive(Clone, Debug, Default)]
pub struct Access {
    roles: Vec<String>,
    authorities: Vec<String>,
    permit_all: bool,
}

impl Access {
    /// Creates an access rule granted to any authenticated user.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires any of the specified roles.
    ///
    /// # Spring Security Equivalent
    /// `hasAnyRole("ADMIN", "USER")`
    pub fn roles(mut self, roles: Vec<&str>) -> Self {
        for role in roles {
            if !self.roles.iter().any(|r| r == role) {
                self.roles.push(role.to_string());
            }
        }
        self
    }

    /// Requires any of the specified authorities.
    ///
    /// # Spring Security Equivalent
    /// `hasAnyAuthority("users:read", "users:write")`
    pub fn authorities(mut self, authorities: Vec<&str>) -> Self {
        for authority in authorities {
            if !self.authorities.iter().any(|a| a == authority) {
                self.authorities.push(authority.to_string());
            }
        }
        self
    }

    /// Lets everyone through, authenticated or not.
    ///
    /// # Spring Security Equivalent
    /// `permitAll()`
    pub fn permit_all(mut self) -> Self {
        self.permit_all = true;
        self
    }

    /// Whether `user` satisfies this rule.
    pub fn is_granted(&self, user: &User) -> bool {
        if self.permit_all || (self.roles.is_empty() && self.authorities.is_empty()) {
            return true;
        }
        user.has_any_role(&self.roles) || user.has_any_authority(&self.authorities)
    }
}
