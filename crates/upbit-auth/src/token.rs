//! Per-request JWT construction
//!
//! Upbit authenticates each call with a compact JWS (HS256) whose claims
//! are the access key, a unique nonce, and — for state-mutating calls —
//! the SHA-512 hash of the canonical query string. Tokens are built fresh
//! per request and never cached or reused.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64URL, Engine};
use serde::Serialize;
use uuid::Uuid;

use crate::credentials::Credentials;
use crate::error::{AuthError, AuthResult};

/// Digest algorithm name carried alongside `query_hash`
pub const QUERY_HASH_ALG: &str = "SHA512";

/// Fixed JOSE header for HS256 tokens
const JWT_HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Claims signed into the per-request bearer token
///
/// Read-only calls carry `{access_key, nonce}`; write calls additionally
/// bind the request body through `query_hash` / `query_hash_alg`. A payload
/// is constructed per outbound call and must not be reused — the exchange
/// rejects replayed nonces.
#[derive(Debug, Clone, Serialize)]
pub struct AuthPayload {
    /// Access key of the signing account
    pub access_key: String,
    /// Per-request unique value (UUID v4)
    pub nonce: String,
    /// Hex-encoded SHA-512 digest of the canonical query string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_hash: Option<String>,
    /// Digest algorithm name, always "SHA512" when a hash is present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_hash_alg: Option<&'static str>,
}

impl AuthPayload {
    /// Build the payload for a read-only call
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            access_key: credentials.access_key().to_string(),
            nonce: Uuid::new_v4().to_string(),
            query_hash: None,
            query_hash_alg: None,
        }
    }

    /// Build the payload for a write call, binding the query hash
    pub fn with_query_hash(credentials: &Credentials, query_hash: impl Into<String>) -> Self {
        Self {
            access_key: credentials.access_key().to_string(),
            nonce: Uuid::new_v4().to_string(),
            query_hash: Some(query_hash.into()),
            query_hash_alg: Some(QUERY_HASH_ALG),
        }
    }

    /// Replace the generated nonce (deterministic signing in tests)
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = nonce.into();
        self
    }

    /// Sign the payload into a compact JWS
    ///
    /// `base64url(header) . base64url(claims) . base64url(hmac_sha256(...))`
    /// with the secret key as the symmetric signing key. Signing is a pure
    /// transform; it cannot fail once credentials passed their presence
    /// check.
    pub fn to_jwt(&self, credentials: &Credentials) -> AuthResult<String> {
        let claims =
            serde_json::to_vec(self).map_err(|e| AuthError::Serialize(e.to_string()))?;

        let mut token = String::new();
        token.push_str(&BASE64URL.encode(JWT_HEADER.as_bytes()));
        token.push('.');
        token.push_str(&BASE64URL.encode(&claims));

        let signature = credentials.hmac_sha256(token.as_bytes());
        token.push('.');
        token.push_str(&BASE64URL.encode(signature));

        Ok(token)
    }

    /// Sign the payload and wrap it as a bearer credential
    pub fn authorization(&self, credentials: &Credentials) -> AuthResult<String> {
        Ok(format!("Bearer {}", self.to_jwt(credentials)?))
    }
}
