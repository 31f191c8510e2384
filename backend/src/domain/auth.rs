//! Authentication primitives: registration, login and profile payloads plus
//! the issued access token.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;
use std::time::Duration;

use zeroize::Zeroizing;

use super::user::{EmailAddress, PersonName, User, UserValidationError};

/// Lifetime of an issued access token.
pub const TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Domain error returned when authentication payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
    /// A present value failed identity validation.
    Identity(UserValidationError),
}

impl CredentialsValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyEmail => "email",
            Self::EmptyPassword => "password",
            Self::Identity(inner) => match inner {
                UserValidationError::EmptyId | UserValidationError::InvalidId => "id",
                UserValidationError::EmptyName | UserValidationError::NameTooLong { .. } => "name",
                UserValidationError::EmptyEmail
                | UserValidationError::InvalidEmail
                | UserValidationError::EmailTooLong { .. } => "email",
            },
        }
    }
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name is required"),
            Self::EmptyEmail => write!(f, "email is required"),
            Self::EmptyPassword => write!(f, "password is required"),
            Self::Identity(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

impl From<UserValidationError> for CredentialsValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::Identity(value)
    }
}

fn required_password(password: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if password.is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated sign-up payload.
///
/// # Examples
/// ```
/// use fitlog::domain::Registration;
///
/// let reg = Registration::try_from_parts("Ada", "Ada@Example.com", "pw").unwrap();
/// assert_eq!(reg.email().as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: PersonName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw request values.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        if name.trim().is_empty() {
            return Err(CredentialsValidationError::EmptyName);
        }
        if email.trim().is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        let password = required_password(password)?;
        Ok(Self {
            name: PersonName::new(name)?,
            email: EmailAddress::new(email)?,
            password,
        })
    }

    /// Account holder's name.
    pub fn name(&self) -> &PersonName {
        &self.name
    }

    /// Normalised login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plain-text password, zeroed on drop.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated login credentials used by the account service.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and non-empty. It is not checked
///   against the address pattern: unknown emails fail as bad credentials.
/// - `password` is non-empty and keeps caller-provided whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let normalised = email.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        Ok(Self {
            email: normalised,
            password: required_password(password)?,
        })
    }

    /// Normalised email used for the account lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Partial profile change requested by the account holder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    name: Option<PersonName>,
    password: Option<Zeroizing<String>>,
}

impl ProfileUpdate {
    /// Build an update from optional raw values; absent values are kept.
    pub fn try_from_parts(
        name: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let name = name.map(PersonName::new).transpose()?;
        let password = password.map(required_password).transpose()?;
        Ok(Self { name, password })
    }

    /// Replacement name, if any.
    pub fn name(&self) -> Option<&PersonName> {
        self.name.as_ref()
    }

    /// Replacement password, if any.
    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|value| value.as_str())
    }
}

/// One-way hash of a password in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a PHC-formatted hash produced by a credential hasher.
    pub fn new(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// PHC string for storage.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Signed bearer token handed to clients.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded token string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

impl From<AccessToken> for String {
    fn from(value: AccessToken) -> Self {
        value.0
    }
}

/// Result of a successful registration or login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Authenticated account.
    pub user: User,
    /// Token to present on subsequent requests.
    pub token: AccessToken,
}
