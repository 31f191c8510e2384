//! Registration, login and profile flows over the full API.

mod support;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::Utc;
use fitlog::domain::ports::TokenService;
use fitlog::outbound::security::JwtTokenService;
use serde_json::json;
use support::{SECRET, app, bearer, register, send, state};

#[actix_web::test]
async fn register_then_login_yields_tokens_for_the_same_user() {
    let app = actix_test::init_service(app(state())).await;
    let (register_token, id) = register(&app, "Ada Lovelace", "ada@example.com").await;

    let login = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "ada@example.com", "password": "correct horse"}))
        .to_request();
    let (status, body) = send(&app, login).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["id"], json!(id));
    assert_eq!(body["user"]["email"], json!("ada@example.com"));
    assert!(body["user"].get("password").is_none());

    let tokens = JwtTokenService::new(SECRET);
    let login_token = body["token"].as_str().expect("login token");
    for token in [register_token.as_str(), login_token] {
        let subject = tokens.verify(token, Utc::now()).expect("token verifies");
        assert_eq!(subject.to_string(), id);
    }
}

#[actix_web::test]
async fn duplicate_registration_is_rejected() {
    let app = actix_test::init_service(app(state())).await;
    register(&app, "Ada", "ada@example.com").await;

    let again = actix_test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"name": "Imposter", "email": "ada@example.com", "password": "pw"}))
        .to_request();
    let (status, body) = send(&app, again).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("user already exists"));
}

#[actix_web::test]
async fn me_and_profile_report_the_caller() {
    let app = actix_test::init_service(app(state())).await;
    let (token, id) = register(&app, "Ada", "ada@example.com").await;

    for uri in ["/api/auth/me", "/api/users/me"] {
        let req = actix_test::TestRequest::get()
            .uri(uri)
            .insert_header(bearer(&token))
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["user"]["id"], json!(id), "{uri}");
        assert_eq!(body["user"]["name"], json!("Ada"), "{uri}");
    }
}

#[actix_web::test]
async fn password_change_replaces_the_old_credential() {
    let app = actix_test::init_service(app(state())).await;
    let (token, _) = register(&app, "Ada", "ada@example.com").await;

    let update = actix_test::TestRequest::put()
        .uri("/api/users/me")
        .insert_header(bearer(&token))
        .set_json(json!({"password": "battery staple"}))
        .to_request();
    let (status, body) = send(&app, update).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], json!("Ada"));

    let login = |password: &'static str| {
        actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": "ada@example.com", "password": password}))
            .to_request()
    };
    let (old_status, _) = send(&app, login("correct horse")).await;
    let (new_status, _) = send(&app, login("battery staple")).await;

    assert_eq!(old_status, StatusCode::UNAUTHORIZED);
    assert_eq!(new_status, StatusCode::OK);
}
