//! Application pages, protected by the web security chain.

use actix_web::{get, http, post, HttpRequest, HttpResponse, Responder};

use actix_client_security_core::http::security::{
    AuthenticatedUser, OptionalUser, SessionAuthenticator,
};

/// Home page. Anonymous visitors are sent to the identity provider first.
#[get("/")]
pub async fn index(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!(
        "Welcome, {}!\nClient: {}\nRoles: {:?}",
        user.get_username(),
        user.get_client_name().unwrap_or("-"),
        user.get_roles()
    ))
}

/// Public page; shows who is logged in, if anyone.
#[get("/profile")]
pub async fn profile(user: OptionalUser) -> impl Responder {
    match user.into_inner() {
        Some(u) => HttpResponse::Ok().body(format!("Profile for: {}", u.get_username())),
        None => HttpResponse::Ok().body("Guest profile - please login"),
    }
}

/// Requires the ADMIN role.
#[get("/admin/dashboard")]
pub async fn admin_dashboard(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!("Admin Dashboard\n\nWelcome, {}!", user.get_username()))
}

#[post("/logout")]
pub async fn logout(req: HttpRequest) -> impl Responder {
    SessionAuthenticator::new().logout(&req);
    HttpResponse::SeeOther()
        .append_header((http::header::LOCATION, "/profile"))
        .finish()
}
