//! Bearer token extraction for protected handlers.
//!
//! Handlers take an [`AuthenticatedUser`] argument; extraction fails with
//! `401` before the handler body runs when the `Authorization` header is
//! missing, is not a bearer credential, or carries a token that does not
//! verify.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};

use crate::domain::{Error, UserId};
use crate::inbound::http::state::HttpState;

/// Message returned when no usable bearer token is present.
pub const NO_TOKEN: &str = "not authorized, no token";

const BEARER_PREFIX: &str = "Bearer ";

/// Caller identity established from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    /// Identifier of the calling user.
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then_some(token)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let token = bearer_token(req).ok_or_else(|| Error::unauthorized(NO_TOKEN))?;
    state.authenticator.authenticate(token).map(AuthenticatedUser)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::inbound::http::test_utils::{StaticAuthenticator, VALID_TOKEN, state_with_authenticator};

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id().to_string())
    }

    async fn call(header: Option<&str>) -> (StatusCode, String) {
        let state = state_with_authenticator(StaticAuthenticator::new());
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route("/", web::get().to(whoami)),
        )
        .await;
        let mut request = actix_test::TestRequest::get().uri("/");
        if let Some(value) = header {
            request = request.insert_header((AUTHORIZATION, value));
        }
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    fn message(body: &str) -> Option<String> {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic abc"))]
    #[case(Some("Bearer "))]
    #[case(Some("bearer good-token"))]
    #[actix_web::test]
    async fn missing_or_malformed_header_has_no_token(#[case] header: Option<&str>) {
        let (status, body) = call(header).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message(&body).as_deref(), Some(NO_TOKEN));
    }

    #[rstest]
    #[actix_web::test]
    async fn rejected_token_fails_verification() {
        let (status, body) = call(Some("Bearer forged")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            message(&body).as_deref(),
            Some(StaticAuthenticator::REJECTED)
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn verified_token_yields_caller() {
        let header = format!("Bearer {VALID_TOKEN}");
        let (status, body) = call(Some(&header)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, StaticAuthenticator::user_id().to_string());
    }
}
