//! Credentials and JWT request signing for the Upbit API
//!
//! Every privileged Upbit call carries an `Authorization: Bearer <jwt>`
//! header. The token is a short-lived JWS signed with the account's secret
//! key, carrying the access key, a per-request nonce, and — for write
//! operations — a SHA-512 hash of the request's canonical query string.
//!
//! # Example
//!
//! ```no_run
//! use upbit_auth::{AuthPayload, Credentials};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let creds = Credentials::from_env()?;
//!
//! // Read-only call: access key + nonce only
//! let header = AuthPayload::new(&creds).authorization(&creds)?;
//! assert!(header.starts_with("Bearer "));
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
mod token;

pub use credentials::Credentials;
pub use error::{AuthError, AuthResult};
pub use token::{AuthPayload, QUERY_HASH_ALG};
