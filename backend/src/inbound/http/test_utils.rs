//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, web};
use argon2::Params;
use mockable::DefaultClock;

use crate::Trace;
use crate::domain::ports::Authenticator;
use crate::domain::{Error, UserId};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::memory_repositories;
use crate::outbound::security::{Argon2CredentialHasher, JwtTokenService};

/// Signing secret shared by HTTP tests.
pub const TEST_SECRET: &[u8] = b"test-secret-test-secret-test-sec";

/// Token accepted by [`StaticAuthenticator`].
pub const VALID_TOKEN: &str = "good-token";

/// Authenticator accepting exactly [`VALID_TOKEN`].
#[derive(Default)]
pub struct StaticAuthenticator;

impl StaticAuthenticator {
    /// Message returned for any other token.
    pub const REJECTED: &'static str = "not authorized, token failed";

    pub fn new() -> Self {
        Self
    }

    /// Identity behind [`VALID_TOKEN`].
    pub fn user_id() -> UserId {
        UserId::from_uuid(uuid::Uuid::from_u128(0x1111_1111_1111_1111_1111_1111_1111_1111))
    }
}

impl Authenticator for StaticAuthenticator {
    fn authenticate(&self, token: &str) -> Result<UserId, Error> {
        if token == VALID_TOKEN {
            Ok(Self::user_id())
        } else {
            Err(Error::unauthorized(Self::REJECTED))
        }
    }
}

/// `Authorization` header carrying [`VALID_TOKEN`].
pub fn bearer() -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {VALID_TOKEN}"))
}

/// Another caller's identity, for ownership checks.
pub fn other_user_id() -> UserId {
    UserId::from_uuid(uuid::Uuid::from_u128(0x2222_2222_2222_2222_2222_2222_2222_2222))
}

/// State over fresh in-memory stores with cheap password hashing.
pub fn memory_state() -> HttpState {
    let params = Params::new(8, 1, 1, None).unwrap_or_default();
    HttpState::from_repositories(
        memory_repositories(),
        Arc::new(JwtTokenService::new(TEST_SECRET)),
        Arc::new(Argon2CredentialHasher::with_params(params)),
        Arc::new(DefaultClock),
    )
}

/// [`memory_state`] with the authenticator replaced.
pub fn state_with_authenticator(authenticator: impl Authenticator + 'static) -> HttpState {
    HttpState {
        authenticator: Arc::new(authenticator),
        ..memory_state()
    }
}

/// App exposing every API route over `state`.
pub fn test_app(
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
