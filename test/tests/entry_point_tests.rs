//! Client entry point tests.
//!
//! Unauthenticated requests reaching the security middleware are handed to a
//! `ClientEntryPoint`: the sso client redirects, the basic client answers 401.

mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;

use common::{create_test_app, location, session_cookie, sso_redirection_url};

// =============================================================================
// Indirect Client
// =============================================================================

#[actix_web::test]
async fn test_unauthenticated_request_is_redirected_to_identity_provider() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), Some(sso_redirection_url()));
}

#[actix_web::test]
async fn test_unauthenticated_post_is_redirected_with_see_other() {
    let app = create_test_app().await;

    let req = test::TestRequest::post().uri("/admin/dashboard").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some(sso_redirection_url()));
}

#[actix_web::test]
async fn test_requested_url_is_restored_after_login() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/admin/dashboard?tab=users")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    let cookie = session_cookie(&resp).expect("saved URL is kept in the session");

    let req = test::TestRequest::get()
        .uri("/callback?client_name=sso&username=admin")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        location(&resp).as_deref(),
        Some("http://localhost:8080/admin/dashboard?tab=users")
    );
    let cookie = session_cookie(&resp).expect("user is stored in the session");

    let req = test::TestRequest::get()
        .uri("/admin/dashboard?tab=users")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Admin: admin");
}

#[actix_web::test]
async fn test_failed_login_is_not_redirected_again() {
    let app = create_test_app().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let cookie = session_cookie(&resp).unwrap();

    // The identity provider came back without a user.
    let req = test::TestRequest::get()
        .uri("/callback?client_name=sso")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp).as_deref(), Some("http://localhost:8080/"));
    let cookie = session_cookie(&resp).unwrap();

    let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer realm=\"Restricted\""
    );
    let cookie = session_cookie(&resp).unwrap();

    // The marker is consumed: the next attempt redirects again.
    let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn test_ajax_request_gets_unauthorized_without_saving_url() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/admin/dashboard")
        .insert_header(("X-Requested-With", "XMLHttpRequest"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(location(&resp).is_none());
    assert!(session_cookie(&resp).is_none());
}

#[actix_web::test]
async fn test_faces_partial_request_gets_xml_redirect() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("Faces-Request", "partial/ajax"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let body = String::from_utf8_lossy(&body);
    assert!(body.contains("<partial-response><redirect url=\"https://idp.example.com/login?"));
}

// =============================================================================
// Direct Client
// =============================================================================

#[actix_web::test]
async fn test_direct_client_answers_unauthorized() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/api/items").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Basic realm=\"Restricted\""
    );
    assert!(location(&resp).is_none());
    assert!(session_cookie(&resp).is_none());
}

#[actix_web::test]
async fn test_logged_in_user_reaches_api() {
    let app = create_test_app().await;

    let req = test::TestRequest::get()
        .uri("/callback?client_name=sso&username=alice")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = session_cookie(&resp).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/items")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "Items of alice");
}

// =============================================================================
// Configuration Errors
// =============================================================================

#[actix_web::test]
async fn test_unknown_client_is_a_server_error() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/broken/anything").to_request();
    let err = match test::try_call_service(&app, req).await {
        Ok(resp) => panic!("unexpected response {}", resp.status()),
        Err(err) => err,
    };

    assert_eq!(
        err.as_response_error().status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(err.to_string(), "Cannot find client name: github");
}

#[actix_web::test]
async fn test_repeated_requests_get_the_same_redirect() {
    let app = create_test_app().await;

    let first = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let second = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(first.status(), second.status());
    assert_eq!(location(&first), location(&second));
}
