//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use fitlog::outbound::persistence::DbPool;
use zeroize::Zeroizing;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) signing_secret: Zeroizing<Vec<u8>>,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) database_ready: bool,
}

impl ServerConfig {
    /// Construct a configuration backed by the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, signing_secret: Zeroizing<Vec<u8>>) -> Self {
        Self {
            bind_addr,
            signing_secret,
            db_pool: None,
            database_ready: false,
        }
    }

    /// Attach a database connection pool for the Diesel adapters.
    ///
    /// `ready` records whether the database answered during startup; when
    /// false the server starts unready and a reconnect task flips it later.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool, ready: bool) -> Self {
        self.db_pool = Some(pool);
        self.database_ready = ready;
        self
    }

    /// Whether the backing store can serve requests once the listener binds.
    #[must_use]
    pub fn store_ready(&self) -> bool {
        self.db_pool.is_none() || self.database_ready
    }
}
