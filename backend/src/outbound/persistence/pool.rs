//! bb8 pool of `diesel-async` PostgreSQL connections.
//!
//! Startup builds the pool eagerly and pings it. When PostgreSQL is down the
//! server falls back to [`DbPool::new_lazy`], which defers every connection
//! attempt to the first checkout.

use std::time::Duration;

use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::define_port_error;

/// Connections kept when no limit is configured.
pub const DEFAULT_MAX_SIZE: u32 = 10;
/// Idle connections bb8 keeps warm.
pub const DEFAULT_MIN_IDLE: u32 = 2;
/// How long a checkout waits before failing.
pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

define_port_error! {
    /// Failures building the pool or checking out a connection.
    pub enum PoolError {
        /// No connection became available.
        Checkout { message: String } => "failed to get connection from pool: {message}",
        /// The pool could not be built.
        Build { message: String } => "failed to build connection pool: {message}",
    }
}

/// Pool sizing and the database to connect to.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Configuration for `database_url` with the default sizing.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            min_idle: Some(DEFAULT_MIN_IDLE),
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
        }
    }

    /// Cap on open connections.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Idle connections to keep open; `None` keeps none.
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Target database.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    fn manager(&self) -> AsyncDieselConnectionManager<AsyncPgConnection> {
        AsyncDieselConnectionManager::new(self.database_url.as_str())
    }
}

/// Shared handle to the connection pool; clones share connections.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool, opening `min_idle` connections up front.
    ///
    /// # Errors
    ///
    /// [`PoolError::Build`] when the initial connections cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(config.manager())
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Build the pool without touching the database.
    pub fn new_lazy(config: PoolConfig) -> Self {
        let inner = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build_unchecked(config.manager());
        Self { inner }
    }

    /// Round-trip `SELECT 1` through a pooled connection.
    ///
    /// # Errors
    ///
    /// [`PoolError::Checkout`] when the database cannot be reached.
    pub async fn ping(&self) -> Result<(), PoolError> {
        let mut conn = self.get().await?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))?;
        Ok(())
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// [`PoolError::Checkout`] when none is available within the timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
