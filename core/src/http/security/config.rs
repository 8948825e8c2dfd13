//! Traits plugged into the security middleware.
//!
//! # Spring Equivalent
//! `SecurityContextRepository` and `AuthorizationManager` interfaces

use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;

use crate::http::security::user::User;

/// Resolves the user behind a request, if any.
///
/// The returned `User` is stored in the request extensions, where the
/// extractors pick it up.
pub trait Authenticator {
    fn get_user(&self, req: &ServiceRequest) -> Option<User>;
}

/// Decides what happens to a request once its user is known.
///
/// The returned future resolves to:
/// - `EitherBody::left()` when the request reached the inner service
/// - `EitherBody::right()` for responses produced by the authorizer
///   (entry point challenges, `403`, redirects)
pub trait Authorizer<B> {
    /// # Arguments
    /// * `req` - The incoming request
    /// * `user` - The authenticated user (if any)
    /// * `next` - Calls the inner service
    fn process(
        &self,
        req: ServiceRequest,
        user: Option<&User>,
        next: impl FnOnce(ServiceRequest) -> LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>>
            + 'static,
    ) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>>;
}
