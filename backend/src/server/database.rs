//! Database startup: bounded connection retries, migrations and background
//! reconnection.

use std::future::Future;
use std::time::Duration;

use actix_web::web;
use tracing::{error, info, warn};

use fitlog::inbound::http::health::HealthState;
use fitlog::outbound::persistence::{DbPool, PoolConfig, PoolError, run_migrations};

/// Connection attempts made before the server starts without a database.
pub const CONNECT_ATTEMPTS: u32 = 5;
/// Interval between background reconnection attempts.
pub const RECONNECT_INTERVAL: Duration = Duration::from_secs(30);

const BACKOFF_STEP: Duration = Duration::from_secs(5);
const BACKOFF_CAP: Duration = Duration::from_secs(30);

/// Delay after the given failed attempt: `min(5s × attempt, 30s)`.
pub fn backoff(attempt: u32) -> Duration {
    BACKOFF_STEP.saturating_mul(attempt).min(BACKOFF_CAP)
}

/// Outcome of the startup connection phase.
pub struct DatabaseStartup {
    pub pool: DbPool,
    /// Whether the database answered and migrations were applied.
    pub ready: bool,
}

/// Retry `attempt` up to [`CONNECT_ATTEMPTS`] times, sleeping with
/// [`backoff`] between failures.
pub async fn retry_with_backoff<T, E, F, Fut, S, SFut>(mut attempt: F, mut sleep: S) -> Option<T>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    S: FnMut(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    for n in 1..=CONNECT_ATTEMPTS {
        match attempt().await {
            Ok(value) => return Some(value),
            Err(err) if n < CONNECT_ATTEMPTS => {
                let delay = backoff(n);
                warn!(attempt = n, error = %err, delay_secs = delay.as_secs(), "database connection failed; retrying");
                sleep(delay).await;
            }
            Err(err) => {
                error!(attempt = n, error = %err, "database connection failed; giving up");
            }
        }
    }
    None
}

async fn connect_once(config: &PoolConfig) -> Result<DbPool, PoolError> {
    let pool = DbPool::new(config.clone()).await?;
    pool.ping().await?;
    Ok(pool)
}

async fn migrate(config: &PoolConfig) -> bool {
    match run_migrations(config.database_url()).await {
        Ok(()) => true,
        Err(err) => {
            error!(error = %err, "applying migrations failed");
            false
        }
    }
}

/// Connect with bounded retries, falling back to a lazily-connecting pool.
pub async fn connect(config: PoolConfig) -> DatabaseStartup {
    let connected = retry_with_backoff(|| connect_once(&config), tokio::time::sleep).await;
    match connected {
        Some(pool) => {
            let ready = migrate(&config).await;
            DatabaseStartup { pool, ready }
        }
        None => DatabaseStartup {
            pool: DbPool::new_lazy(config),
            ready: false,
        },
    }
}

/// Poll the database every [`RECONNECT_INTERVAL`] until it answers, then
/// apply migrations and mark the service ready.
pub fn spawn_reconnect(pool: DbPool, config: PoolConfig, health_state: web::Data<HealthState>) {
    actix_web::rt::spawn(async move {
        loop {
            tokio::time::sleep(RECONNECT_INTERVAL).await;
            if let Err(err) = pool.ping().await {
                warn!(error = %err, "database still unreachable");
                continue;
            }
            if migrate(&config).await {
                info!("database reachable; marking ready");
                health_state.mark_ready();
                break;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 5)]
    #[case(2, 10)]
    #[case(5, 25)]
    #[case(6, 30)]
    #[case(40, 30)]
    fn backoff_grows_linearly_then_caps(#[case] attempt: u32, #[case] secs: u64) {
        assert_eq!(backoff(attempt), Duration::from_secs(secs));
    }

    #[tokio::test]
    async fn retry_stops_at_first_success() {
        let calls = Cell::new(0_u32);
        let slept = RefCell::new(Vec::new());

        let result = retry_with_backoff(
            || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move { if n < 3 { Err("refused") } else { Ok(n) } }
            },
            |delay| {
                slept.borrow_mut().push(delay);
                async {}
            },
        )
        .await;

        assert_eq!(result, Some(3));
        assert_eq!(
            slept.into_inner(),
            vec![Duration::from_secs(5), Duration::from_secs(10)]
        );
    }

    #[tokio::test]
    async fn retry_gives_up_after_bounded_attempts() {
        let calls = Cell::new(0_u32);
        let sleeps = Cell::new(0_u32);

        let result: Option<()> = retry_with_backoff(
            || {
                calls.set(calls.get() + 1);
                async { Err("refused") }
            },
            |_| {
                sleeps.set(sleeps.get() + 1);
                async {}
            },
        )
        .await;

        assert!(result.is_none());
        assert_eq!(calls.get(), CONNECT_ATTEMPTS);
        assert_eq!(sleeps.get(), CONNECT_ATTEMPTS - 1);
    }
}
