//! Common test utilities and configuration.
//!
//! This module provides shared test infrastructure including:
//! - Test clients and security configuration
//! - Test app builder
//! - Helper functions for redirects and session cookies

#![allow(dead_code)]

use std::sync::Arc;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{get, http, post, test, web, App, Error, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;

use actix_client_security_core::http::security::client::attempted_authentication_key;
use actix_client_security_core::http::security::{
    Access, AuthenticatedUser, BasicAuthClient, ClientEntryPoint, Clients,
    DefaultSavedRequestHandler, RedirectClient, RequestMatcherAuthorizer, SavedRequestHandler,
    SecurityConfig, SecurityTransform, SessionAuthenticator, User, WebContext,
};

pub const LOGIN_URL: &str = "https://idp.example.com/login";
pub const CALLBACK_URL: &str = "http://localhost:8080/callback";

// =============================================================================
// Test Configuration
// =============================================================================

/// Clients:
/// - sso: redirects to `LOGIN_URL`
/// - basic: HTTP Basic challenge
pub fn test_config() -> Arc<SecurityConfig> {
    Arc::new(SecurityConfig::new(
        Clients::new()
            .with_client(RedirectClient::new("sso", LOGIN_URL, CALLBACK_URL))
            .with_client(BasicAuthClient::new("basic")),
    ))
}

/// Where the sso client sends unauthenticated browsers.
pub fn sso_redirection_url() -> String {
    RedirectClient::new("sso", LOGIN_URL, CALLBACK_URL).redirection_url()
}

/// Patterns:
/// - /public/.* and /callback are open
/// - /admin/.* requires ADMIN role
pub fn web_authorizer(config: &Arc<SecurityConfig>) -> RequestMatcherAuthorizer {
    RequestMatcherAuthorizer::new()
        .entry_point(Arc::new(ClientEntryPoint::new(config.clone(), "sso")))
        .add_matcher("/public/.*", Access::new().permit_all())
        .add_matcher("/callback", Access::new().permit_all())
        .add_matcher("/admin/.*", Access::new().roles(vec!["ADMIN"]))
}

// =============================================================================
// Test Handlers
// =============================================================================

#[get("/")]
pub async fn index(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!("Welcome, {}!", user.get_username()))
}

#[get("/admin/dashboard")]
pub async fn admin_dashboard(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!("Admin: {}", user.get_username()))
}

#[post("/admin/dashboard")]
pub async fn admin_update(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!("Updated by: {}", user.get_username()))
}

#[get("/public/hello")]
pub async fn public_hello() -> impl Responder {
    HttpResponse::Ok().body("Hello")
}

#[get("/items")]
pub async fn api_items(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!("Items of {}", user.get_username()))
}

#[get("/anything")]
pub async fn broken_anything() -> impl Responder {
    HttpResponse::Ok().body("unreachable")
}

#[derive(Deserialize)]
pub struct CallbackParams {
    pub client_name: String,
    pub username: Option<String>,
}

/// Logs `username` in (as ADMIN when it is "admin"), or records a failed
/// attempt when it is missing, then restores the saved URL.
#[get("/callback")]
pub async fn callback(
    req: HttpRequest,
    params: web::Query<CallbackParams>,
    config: web::Data<SecurityConfig>,
) -> Result<HttpResponse, Error> {
    let store = config.find_session_store();
    let mut ctx = WebContext::new(&req, store.as_ref());

    match &params.username {
        Some(username) => {
            let mut user = User::new(username.as_str()).client_name(params.client_name.as_str());
            if username == "admin" {
                user = user.roles(&["ADMIN"]);
            }
            SessionAuthenticator::new()
                .login(&req, &user)
                .map_err(actix_web::error::ErrorInternalServerError)?;
        }
        None => {
            ctx.session_set(&attempted_authentication_key(&params.client_name), "true")
                .map_err(actix_web::error::ErrorInternalServerError)?;
        }
    }

    let action = DefaultSavedRequestHandler::default().restore(&mut ctx, "/");
    Ok(config.find_http_action_adapter().adapt(action, ctx))
}

// =============================================================================
// Test App Builder
// =============================================================================

/// Creates the test application:
/// - `/api` answers unauthenticated requests with the basic client
/// - `/broken` uses an entry point whose client does not exist
/// - everything else uses the sso client
pub async fn create_test_app(
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = Error> {
    let config = test_config();
    let session_key = Key::generate();

    test::init_service(
        App::new()
            .app_data(web::Data::from(config.clone()))
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                session_key,
            ))
            .service(
                web::scope("/api")
                    .wrap(
                        SecurityTransform::new()
                            .config_authenticator(SessionAuthenticator::new())
                            .config_authorizer(RequestMatcherAuthorizer::new().entry_point(
                                Arc::new(ClientEntryPoint::new(config.clone(), "basic")),
                            )),
                    )
                    .service(api_items),
            )
            .service(
                web::scope("/broken")
                    .wrap(
                        SecurityTransform::new()
                            .config_authenticator(SessionAuthenticator::new())
                            .config_authorizer(RequestMatcherAuthorizer::new().entry_point(
                                Arc::new(ClientEntryPoint::new(config.clone(), "github")),
                            )),
                    )
                    .service(broken_anything),
            )
            .service(
                web::scope("")
                    .wrap(
                        SecurityTransform::new()
                            .config_authenticator(SessionAuthenticator::new())
                            .config_authorizer(web_authorizer(&config)),
                    )
                    .service(index)
                    .service(admin_dashboard)
                    .service(admin_update)
                    .service(public_hello)
                    .service(callback),
            ),
    )
    .await
}

// =============================================================================
// Helpers
// =============================================================================

/// `Location` header of a response.
pub fn location<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get(http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(String::from)
}

/// Session cookie set by a response, if the session changed.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == "id")
        .map(|cookie| cookie.into_owned())
}
