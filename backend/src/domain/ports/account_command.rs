//! Driving port for account lifecycle use-cases: sign-up, login and profile
//! changes.

use async_trait::async_trait;

use crate::domain::{AuthSession, Error, LoginCredentials, ProfileUpdate, Registration, User, UserId};

/// Domain use-case port for account mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account and issue its first token.
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error>;

    /// Verify credentials and issue a token.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error>;

    /// Apply a partial profile change for the caller.
    async fn update_profile(&self, user_id: &UserId, update: ProfileUpdate)
    -> Result<User, Error>;
}
