//! Port for issuing and verifying bearer tokens.

use chrono::{DateTime, Utc};

use crate::domain::{AccessToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// Signature, structure or subject did not verify.
        Invalid { message: String } => "token rejected: {message}",
        /// The token's expiry has passed.
        Expired => "token expired",
        /// A token could not be produced.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Signs and verifies access tokens carrying a user id.
///
/// `now` is supplied by the caller so expiry follows the service clock.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token for `user` valid from `now` for [`crate::domain::TOKEN_TTL`].
    fn issue(&self, user: &UserId, now: DateTime<Utc>) -> Result<AccessToken, TokenError>;

    /// Verify `token` at `now` and return its subject.
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenError>;
}
