//! Callback endpoint the identity provider sends the browser back to.

use actix_web::error::ErrorInternalServerError;
use actix_web::{get, web, Error, HttpRequest, HttpResponse};
use serde::Deserialize;

use actix_client_security_core::http::security::client::attempted_authentication_key;
use actix_client_security_core::http::security::{
    DefaultSavedRequestHandler, EntryPointError, SavedRequestHandler, SecurityConfig,
    SessionAuthenticator, User, WebContext,
};

#[derive(Deserialize)]
pub struct CallbackParams {
    pub client_name: String,
    pub username: Option<String>,
}

/// Roles granted by the demo identity provider.
pub fn demo_user(username: &str, client_name: &str) -> User {
    let user = User::new(username).client_name(client_name).roles(&["USER"]);
    if username == "admin" {
        user.roles(&["ADMIN"])
    } else {
        user
    }
}

/// Logs the user in and sends them back to the page they asked for.
///
/// Without a username the login failed: the client is marked as attempted so
/// the next protected request gets a `401` instead of another redirect.
#[get("/callback")]
pub async fn callback(
    req: HttpRequest,
    params: web::Query<CallbackParams>,
    config: web::Data<SecurityConfig>,
) -> Result<HttpResponse, Error> {
    let client = config
        .get_clients()
        .find_client(&params.client_name)
        .ok_or_else(|| EntryPointError::ClientNotFound {
            client_name: params.client_name.clone(),
        })?;

    let store = config.find_session_store();
    let mut ctx = WebContext::new(&req, store.as_ref());

    match params.username.as_deref().map(str::trim) {
        Some(username) if !username.is_empty() => {
            tracing::info!(user = username, client = client.name(), "login succeeded");
            SessionAuthenticator::new()
                .login(&req, &demo_user(username, client.name()))
                .map_err(ErrorInternalServerError)?;
        }
        _ => {
            tracing::info!(client = client.name(), "login failed");
            ctx.session_set(&attempted_authentication_key(client.name()), "true")
                .map_err(ErrorInternalServerError)?;
        }
    }

    let action = DefaultSavedRequestHandler::default().restore(&mut ctx, "/");
    Ok(config.find_http_action_adapter().adapt(action, ctx))
}
