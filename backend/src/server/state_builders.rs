//! Builders for the HTTP state from the selected store.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use fitlog::inbound::http::state::HttpState;
use fitlog::outbound::memory::memory_repositories;
use fitlog::outbound::persistence::diesel_repositories;
use fitlog::outbound::security::{Argon2CredentialHasher, JwtTokenService};

use super::ServerConfig;

/// Wire services over the Diesel repositories when a pool is configured,
/// otherwise over the in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let repositories = match &config.db_pool {
        Some(pool) => diesel_repositories(pool),
        None => {
            warn!("no database configured; records are kept in memory and lost on restart");
            memory_repositories()
        }
    };
    web::Data::new(HttpState::from_repositories(
        repositories,
        Arc::new(JwtTokenService::new(&config.signing_secret)),
        Arc::new(Argon2CredentialHasher::new()),
        Arc::new(DefaultClock),
    ))
}
