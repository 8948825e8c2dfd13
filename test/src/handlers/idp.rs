//! A stand-in identity provider so the demo runs without external services.
//!
//! It asks for a username and sends it back to the callback URL. Leaving the
//! field empty simulates a failed login.

use actix_web::{get, http, post, web, HttpResponse, Responder};
use serde::Deserialize;

use actix_client_security_core::http::security::client::add_parameter;

#[derive(Deserialize)]
pub struct LoginQuery {
    pub redirect_uri: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub redirect_uri: String,
    pub username: String,
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[get("/idp/login")]
pub async fn login_page(query: web::Query<LoginQuery>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(format!(
            "<!DOCTYPE html><html><body><h1>Demo identity provider</h1>\
             <form method=\"post\" action=\"/idp/login\">\
             <input type=\"hidden\" name=\"redirect_uri\" value=\"{}\">\
             <label>Username <input name=\"username\"></label>\
             <button type=\"submit\">Sign in</button>\
             </form></body></html>",
            escape_html(&query.redirect_uri)
        ))
}

#[post("/idp/login")]
pub async fn login(form: web::Form<LoginForm>) -> impl Responder {
    let location = add_parameter(&form.redirect_uri, "username", form.username.trim());
    HttpResponse::Found()
        .append_header((http::header::LOCATION, location))
        .finish()
}
