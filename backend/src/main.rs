//! Backend entry-point: loads settings, connects the store and serves the
//! REST API with its OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use fitlog::inbound::http::health::HealthState;
use fitlog::outbound::persistence::PoolConfig;
use server::settings::AppSettings;
use server::{ServerConfig, create_server, database, secret};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let allow_ephemeral = cfg!(debug_assertions) || settings.allow_ephemeral_secret;
    let signing_secret =
        secret::resolve_signing_secret(settings.jwt_secret.as_deref(), allow_ephemeral)?;
    let bind_addr = settings.bind_addr()?;

    let health_state = web::Data::new(HealthState::new());
    let mut config = ServerConfig::new(bind_addr, signing_secret);
    let mut pending_reconnect = None;

    if let Some(url) = settings.database_url() {
        let max_size = settings.db_max_connections();
        let pool_config = PoolConfig::new(url)
            .with_max_size(max_size)
            .with_min_idle(Some(max_size.min(2)));
        let startup = database::connect(pool_config.clone()).await;
        if !startup.ready {
            warn!("starting without a reachable database; readiness reports 503");
            pending_reconnect = Some((startup.pool.clone(), pool_config));
        }
        config = config.with_db_pool(startup.pool, startup.ready);
    }

    let server = create_server(health_state.clone(), config)?;
    if let Some((pool, pool_config)) = pending_reconnect {
        database::spawn_reconnect(pool, pool_config, health_state.clone());
    }

    info!(%bind_addr, "listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
