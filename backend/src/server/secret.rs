//! Signing secret resolution for bearer tokens.

use rand::RngCore;
use rand::rngs::OsRng;
use tracing::warn;
use zeroize::Zeroizing;

use fitlog::outbound::security::MIN_SECRET_LEN;

/// Bytes generated for an ephemeral secret.
const EPHEMERAL_SECRET_LEN: usize = 64;

/// Choose the token signing secret.
///
/// A configured secret must be at least [`MIN_SECRET_LEN`] bytes. Without
/// one, a random per-process secret is generated when `allow_ephemeral` is
/// set; tokens then stop verifying on restart.
///
/// # Errors
/// Returns [`std::io::Error`] when the configured secret is too short, or
/// when no secret is configured and ephemeral secrets are not allowed.
pub fn resolve_signing_secret(
    configured: Option<&str>,
    allow_ephemeral: bool,
) -> std::io::Result<Zeroizing<Vec<u8>>> {
    match configured {
        Some(secret) if secret.len() >= MIN_SECRET_LEN => {
            Ok(Zeroizing::new(secret.as_bytes().to_vec()))
        }
        Some(secret) => Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!(
                "FITLOG_JWT_SECRET must be at least {MIN_SECRET_LEN} bytes, got {}",
                secret.len()
            ),
        )),
        None if allow_ephemeral => {
            warn!("no FITLOG_JWT_SECRET configured; using an ephemeral secret (dev only)");
            let mut bytes = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
            OsRng.fill_bytes(bytes.as_mut_slice());
            Ok(bytes)
        }
        None => Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "FITLOG_JWT_SECRET is required; set FITLOG_ALLOW_EPHEMERAL_SECRET=1 for development",
        )),
    }
}
