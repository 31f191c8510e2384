//! Credential and token adapters.
//!
//! - **jwt**: HS256 bearer tokens via `jsonwebtoken`
//! - **argon2**: PHC-formatted password digests via `argon2`

mod argon2_hasher;
mod jwt_token_service;

pub use argon2_hasher::Argon2CredentialHasher;
pub use jwt_token_service::{JwtTokenService, MIN_SECRET_LEN};
