//! Driving port used by the HTTP authentication gate.

use crate::domain::{Error, UserId};

/// Resolves a presented bearer token to the caller's identity.
pub trait Authenticator: Send + Sync {
    /// Verify `token`, returning an `unauthorized` error when it is
    /// malformed, tampered with or expired.
    fn authenticate(&self, token: &str) -> Result<UserId, Error>;
}
