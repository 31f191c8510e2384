//! Account service: registration, login, profile changes and bearer token
//! verification.
//!
//! Password hashing is CPU bound, so it runs on the blocking pool rather
//! than on the request executor.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccountCommand, AccountQuery, Authenticator, CredentialHashError, CredentialHasher,
    StoredAccount, TokenError, TokenService, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AuthSession, Error, LoginCredentials, PasswordDigest, ProfileUpdate, Registration, User,
    UserId,
};

/// Message returned for any failed login, whichever part was wrong.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";
/// Message returned when a presented token does not verify.
pub const TOKEN_FAILED: &str = "not authorized, token failed";
/// Message returned when registering an email that is taken.
pub const USER_EXISTS: &str = "user already exists";

/// Map account persistence failures to domain errors.
pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => {
            Error::invalid_request(USER_EXISTS).with_details(json!({ "field": "email", "value": email }))
        }
    }
}

fn map_hash_error(error: CredentialHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_token_issue_error(error: TokenError) -> Error {
    Error::internal(error.to_string())
}

fn user_not_found() -> Error {
    Error::not_found("user not found")
}

/// Account service implementing the account driving ports.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    /// Create a service over its collaborators.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }

    async fn hash_password(&self, password: &str) -> Result<PasswordDigest, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hash_error)
    }

    async fn password_matches(
        &self,
        password: &str,
        digest: PasswordDigest,
    ) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(password.as_str(), &digest))
            .await
            .map_err(|err| Error::internal(format!("password check task failed: {err}")))?
            .map_err(map_hash_error)
    }

    fn start_session(&self, user: User) -> Result<AuthSession, Error> {
        let token = self
            .tokens
            .issue(user.id(), self.clock.utc())
            .map_err(map_token_issue_error)?;
        Ok(AuthSession { user, token })
    }
}

#[async_trait]
impl AccountCommand for AccountService {
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error> {
        let existing = self
            .users
            .find_by_email(registration.email().as_ref())
            .await
            .map_err(map_user_persistence_error)?;
        if existing.is_some() {
            return Err(Error::invalid_request(USER_EXISTS)
                .with_details(json!({ "field": "email" })));
        }

        let password = self.hash_password(registration.password()).await?;
        let user = User::new(
            UserId::random(),
            registration.name().clone(),
            registration.email().clone(),
            self.clock.utc(),
        );
        let account = StoredAccount {
            user: user.clone(),
            password,
        };
        self.users
            .create(&account)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id(), "account registered");
        self.start_session(user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error> {
        let Some(account) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_persistence_error)?
        else {
            debug!("login for unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let StoredAccount { user, password } = account;
        if !self.password_matches(credentials.password(), password).await? {
            debug!(user_id = %user.id(), "login with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        self.start_session(user)
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<User, Error> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(user_not_found)?;

        if let Some(name) = update.name() {
            user.rename(name.clone());
        }
        let password = match update.password() {
            Some(password) => Some(self.hash_password(password).await?),
            None => None,
        };

        let stored = self
            .users
            .update(&user, password)
            .await
            .map_err(map_user_persistence_error)?;
        if !stored {
            return Err(user_not_found());
        }
        Ok(user)
    }
}

#[async_trait]
impl AccountQuery for AccountService {
    async fn current_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(user_not_found)
    }
}

impl Authenticator for AccountService {
    fn authenticate(&self, token: &str) -> Result<UserId, Error> {
        self.tokens.verify(token, self.clock.utc()).map_err(|err| {
            debug!(reason = %err, "bearer token rejected");
            Error::unauthorized(TOKEN_FAILED)
        })
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
