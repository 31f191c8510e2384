//! In-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{StoredAccount, UserPersistenceError, UserRepository};
use crate::domain::{PasswordDigest, User, UserId};

fn poisoned() -> UserPersistenceError {
    UserPersistenceError::query("user store lock poisoned")
}

/// Account storage keyed by user id.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    accounts: RwLock<HashMap<UserId, StoredAccount>>,
}

impl MemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, account: &StoredAccount) -> Result<(), UserPersistenceError> {
        let mut accounts = self.accounts.write().map_err(|_| poisoned())?;
        let email = account.user.email();
        if accounts.values().any(|stored| stored.user.email() == email) {
            return Err(UserPersistenceError::duplicate_email(email.as_ref()));
        }
        accounts.insert(account.user.id().clone(), account.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredAccount>, UserPersistenceError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        Ok(accounts
            .values()
            .find(|stored| stored.user.email().as_ref() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let accounts = self.accounts.read().map_err(|_| poisoned())?;
        Ok(accounts.get(id).map(|stored| stored.user.clone()))
    }

    async fn update(
        &self,
        user: &User,
        password: Option<PasswordDigest>,
    ) -> Result<bool, UserPersistenceError> {
        let mut accounts = self.accounts.write().map_err(|_| poisoned())?;
        let Some(stored) = accounts.get_mut(user.id()) else {
            return Ok(false);
        };
        stored.user = user.clone();
        if let Some(password) = password {
            stored.password = password;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{EmailAddress, PersonName};

    #[fixture]
    fn account() -> StoredAccount {
        let created = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        StoredAccount {
            user: User::new(
                UserId::random(),
                PersonName::new("Ada").expect("name"),
                EmailAddress::new("ada@example.com").expect("email"),
                created,
            ),
            password: PasswordDigest::new("digest"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn second_account_with_same_email_is_rejected(account: StoredAccount) {
        let repo = MemoryUserRepository::new();
        repo.create(&account).await.expect("first insert");

        let mut twin = account.clone();
        twin.user = User::new(
            UserId::random(),
            PersonName::new("Twin").expect("name"),
            account.user.email().clone(),
            account.user.created_at(),
        );
        let err = repo.create(&twin).await.expect_err("duplicate email");

        assert_eq!(err, UserPersistenceError::duplicate_email("ada@example.com"));
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_password_when_absent(account: StoredAccount) {
        let repo = MemoryUserRepository::new();
        repo.create(&account).await.expect("insert");
        let mut renamed = account.user.clone();
        renamed.rename(PersonName::new("Countess").expect("name"));

        assert!(repo.update(&renamed, None).await.expect("update"));

        let stored = repo
            .find_by_email("ada@example.com")
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(stored.user.name().as_ref(), "Countess");
        assert_eq!(stored.password.as_str(), "digest");
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_unknown_user_reports_false(account: StoredAccount) {
        let repo = MemoryUserRepository::new();
        assert!(!repo.update(&account.user, None).await.expect("update"));
    }
}
