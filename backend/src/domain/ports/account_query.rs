//! Driving port for reading the caller's own account.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for account lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Return the caller's account without its credential.
    async fn current_user(&self, user_id: &UserId) -> Result<User, Error>;
}
