use actix_web::{error, http::StatusCode, HttpResponse, HttpResponseBuilder};
use derive_more::{Display, Error};

/// Reason an authentication entry point is commenced.
///
/// # Spring Equivalent
/// `AuthenticationException` and its subclasses
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[display("token error")]
    TokenError,
    #[display("forbidden")]
    Forbidden,
    #[display("unauthorized")]
    Unauthorized,
    /// An anonymous principal reached a protected resource.
    #[display("full authentication is required to access this resource")]
    InsufficientAuthentication,
}

impl error::ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::TokenError => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Unauthorized | AuthError::InsufficientAuthentication => {
                StatusCode::UNAUTHORIZED
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).body(self.to_string())
    }
}
