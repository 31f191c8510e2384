//! Shared helpers for the HTTP integration suites.
//!
//! Every suite drives the full `/api` surface over the in-memory adapters,
//! with the real JWT and Argon2 implementations.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, HeaderName};
use actix_web::{App, test as actix_test, web};
use argon2::Params;
use fitlog::Trace;
use fitlog::inbound::http::configure_api;
use fitlog::inbound::http::state::HttpState;
use fitlog::outbound::memory::memory_repositories;
use fitlog::outbound::security::{Argon2CredentialHasher, JwtTokenService};
use mockable::DefaultClock;
use serde_json::{Value, json};

/// Signing secret used by every suite.
pub const SECRET: &[u8] = b"integration-secret-integration-secret";

/// State over fresh in-memory stores with cheap password hashing.
pub fn state() -> HttpState {
    let params = Params::new(8, 1, 1, None).unwrap_or_default();
    HttpState::from_repositories(
        memory_repositories(),
        Arc::new(JwtTokenService::new(SECRET)),
        Arc::new(Argon2CredentialHasher::with_params(params)),
        Arc::new(DefaultClock),
    )
}

/// App wired the way the server wires it.
pub fn app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure_api)
}

/// `Authorization` header for `token`.
pub fn bearer(token: &str) -> (HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

/// Send `req` and decode the JSON body, tolerating empty bodies.
pub async fn send<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = actix_test::call_service(app, req).await;
    let status = res.status();
    let bytes = actix_test::read_body(res).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// Register an account and return `(token, user id)`.
pub async fn register<S, B>(app: &S, name: &str, email: &str) -> (String, String)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = actix_test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({"name": name, "email": email, "password": "correct horse"}))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    let token = body["token"].as_str().expect("token").to_owned();
    let id = body["user"]["id"].as_str().expect("user id").to_owned();
    (token, id)
}
