//! Application settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `FITLOG_*` environment variables over config
//! files.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Runtime settings for the HTTP server.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FITLOG")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL; absent selects the in-memory store.
    pub database_url: Option<String>,
    /// HS256 signing secret, at least 32 bytes.
    pub jwt_secret: Option<String>,
    /// Permit a random per-process secret when none is configured.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| ".."))
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| ".."))
            .field("allow_ephemeral_secret", &self.allow_ephemeral_secret)
            .field("db_max_connections", &self.db_max_connections)
            .finish()
    }
}

impl AppSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:5000`.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw:?}: {err}"),
            )
        })
    }

    /// Configured pool size, defaulting to 10.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
            .max(1)
    }

    /// Database URL with blank values treated as absent.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "FITLOG_BIND_ADDR",
        "FITLOG_DATABASE_URL",
        "FITLOG_JWT_SECRET",
        "FITLOG_ALLOW_EPHEMERAL_SECRET",
        "FITLOG_DB_MAX_CONNECTIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("fitlog")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default address"),
            SocketAddr::from(([0, 0, 0, 0], 5000))
        );
        assert!(settings.database_url().is_none());
        assert!(settings.jwt_secret.is_none());
        assert!(!settings.allow_ephemeral_secret);
        assert_eq!(settings.db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("FITLOG_BIND_ADDR", Some("127.0.0.1:8080".to_owned())),
            (
                "FITLOG_DATABASE_URL",
                Some("postgres://fitlog@localhost/fitlog".to_owned()),
            ),
            ("FITLOG_JWT_SECRET", Some("s".repeat(32))),
            ("FITLOG_ALLOW_EPHEMERAL_SECRET", Some("true".to_owned())),
            ("FITLOG_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("configured address"),
            SocketAddr::from(([127, 0, 0, 1], 8080))
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://fitlog@localhost/fitlog")
        );
        assert!(settings.allow_ephemeral_secret);
        assert_eq!(settings.db_max_connections(), 4);
    }

    #[rstest]
    fn malformed_bind_address_is_rejected() {
        let _guard = lock_env([("FITLOG_BIND_ADDR", Some("localhost".to_owned()))]);

        let settings = load_from_empty_args();

        assert!(settings.bind_addr().is_err());
    }

    #[rstest]
    fn debug_output_redacts_secrets() {
        let _guard = lock_env([
            ("FITLOG_JWT_SECRET", Some("top-secret-top-secret-top-secret".to_owned())),
            ("FITLOG_DATABASE_URL", Some("postgres://u:pw@db/fitlog".to_owned())),
        ]);

        let rendered = format!("{:?}", load_from_empty_args());

        assert!(!rendered.contains("top-secret"));
        assert!(!rendered.contains("pw@db"));
    }
}
