//! API credentials for authenticated requests
//!
//! # Security
//!
//! Secret keys are stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox};
use sha2::Sha256;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// API credentials for authenticated requests
///
/// The secret key is automatically zeroized when the Credentials are
/// dropped, preventing sensitive data from remaining in memory. Credentials
/// are immutable once constructed and are never persisted by this crate.
pub struct Credentials {
    /// Access key (public half of the key pair)
    access_key: String,
    /// Secret key (symmetric signing key, zeroized on drop)
    secret_key: SecretBox<String>,
}

impl Credentials {
    /// Create new credentials from an access key and secret key
    ///
    /// Both keys are trimmed; an empty key after trimming is a
    /// configuration error, reported before any request is attempted.
    pub fn new(access_key: impl AsRef<str>, secret_key: impl AsRef<str>) -> AuthResult<Self> {
        let access_key = access_key.as_ref().trim().to_string();
        let secret_key = secret_key.as_ref().trim().to_string();

        if access_key.is_empty() {
            return Err(AuthError::MissingCredentials("access_key"));
        }
        if secret_key.is_empty() {
            return Err(AuthError::MissingCredentials("secret_key"));
        }

        Ok(Self {
            access_key,
            secret_key: SecretBox::new(Box::new(secret_key)),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `UPBIT_ACCESS_KEY` and `UPBIT_SECRET_KEY` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let access_key = std::env::var("UPBIT_ACCESS_KEY")
            .map_err(|_| AuthError::EnvVarNotSet("UPBIT_ACCESS_KEY".to_string()))?;
        let secret_key = std::env::var("UPBIT_SECRET_KEY")
            .map_err(|_| AuthError::EnvVarNotSet("UPBIT_SECRET_KEY".to_string()))?;

        Self::new(access_key, secret_key)
    }

    /// Get the access key
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// HMAC-SHA256 over `message` keyed by the secret key
    ///
    /// This is the HS256 primitive used to sign token payloads;
    /// `expose_secret()` keeps key access inside this module.
    pub(crate) fn hmac_sha256(&self, message: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(message);
        mac.finalize().into_bytes().to_vec()
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates a new SecretBox with the same content)
    fn clone(&self) -> Self {
        Self {
            access_key: self.access_key.clone(),
            secret_key: SecretBox::new(Box::new(self.secret_key.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "access_key",
                &format!("{}...", &self.access_key[..8.min(self.access_key.len())]),
            )
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
