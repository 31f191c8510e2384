//! HS256 JSON Web Tokens carrying the user id as `sub`.
//!
//! Expiry is checked against the caller-supplied `now` instead of the system
//! clock, so `exp` validation in `jsonwebtoken` is switched off.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{AccessToken, TOKEN_TTL, UserId};

/// Shortest accepted signing secret in bytes.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Token service signing with a shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl JwtTokenService {
    /// Build a service from the raw signing secret with the standard lifetime.
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, TOKEN_TTL)
    }

    /// Build a service issuing tokens that live for `ttl`.
    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &UserId, now: DateTime<Utc>) -> Result<AccessToken, TokenError> {
        let ttl = i64::try_from(self.ttl.as_secs())
            .map_err(|_| TokenError::signing("token lifetime out of range"))?;
        let iat = now.timestamp();
        let claims = Claims {
            sub: user.to_string(),
            iat,
            exp: iat.saturating_add(ttl),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Self::validation()).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::invalid(err.to_string()),
            }
        })?;
        if data.claims.exp <= now.timestamp() {
            return Err(TokenError::expired());
        }
        UserId::new(&data.claims.sub).map_err(|err| TokenError::invalid(err.to_string()))
    }
}
