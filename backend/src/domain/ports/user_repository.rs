//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{PasswordDigest, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email address.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// An account together with its stored credential.
#[derive(Debug, Clone)]
pub struct StoredAccount {
    /// Public account data.
    pub user: User,
    /// Hash of the account password.
    pub password: PasswordDigest,
}

/// Storage for user accounts keyed by id and by normalised email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with `DuplicateEmail` when the email is
    /// already registered.
    async fn create(&self, account: &StoredAccount) -> Result<(), UserPersistenceError>;

    /// Fetch an account and its credential by normalised email.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredAccount>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Persist a changed name and, when given, a replacement credential.
    ///
    /// Returns `false` when no account with the user's id exists.
    async fn update(
        &self,
        user: &User,
        password: Option<PasswordDigest>,
    ) -> Result<bool, UserPersistenceError>;
}
