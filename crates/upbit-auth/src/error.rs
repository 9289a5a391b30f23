//! Error types for authentication operations

/// Errors that can occur during authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Access key or secret key missing or empty
    #[error("Upbit credentials are not configured: {0}")]
    MissingCredentials(&'static str),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Failed to serialize the token payload
    #[error("Serialize error: {0}")]
    Serialize(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
