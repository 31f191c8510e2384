//! Argon2id password digests in PHC string format.

use argon2::{Algorithm, Argon2, Params, Version};
use argon2::password_hash::{
    Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use rand::rngs::OsRng;

use crate::domain::PasswordDigest;
use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// Credential hasher using Argon2id.
///
/// New digests use the configured cost parameters; verification reads the
/// parameters embedded in each stored digest.
#[derive(Debug, Default, Clone)]
pub struct Argon2CredentialHasher {
    params: Params,
}

impl Argon2CredentialHasher {
    /// Create a hasher with the default (OWASP recommended) parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hasher with explicit cost parameters.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, CredentialHashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordDigest::new(hash.to_string()))
            .map_err(|err| CredentialHashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, CredentialHashError> {
        let parsed = PasswordHash::new(digest.as_str())
            .map_err(|err| CredentialHashError::malformed_digest(err.to_string()))?;
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(err) => Err(CredentialHashError::hash(err.to_string())),
        }
    }
}
