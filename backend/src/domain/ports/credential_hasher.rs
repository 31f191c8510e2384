//! Port for one-way password hashing.

use crate::domain::PasswordDigest;

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hashing adapters.
    pub enum CredentialHashError {
        /// Hashing failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored digest could not be parsed.
        MalformedDigest { message: String } => "stored password digest is malformed: {message}",
    }
}

/// Hashes passwords and checks candidates against stored digests.
///
/// Implementations are CPU bound; callers run them off the async executor.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    fn hash(&self, password: &str) -> Result<PasswordDigest, CredentialHashError>;

    /// Whether `password` matches `digest`.
    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, CredentialHashError>;
}
