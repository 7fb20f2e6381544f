//! Error types for authentication operations

/// Errors that can occur while building or signing a request
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Caller-supplied parameters collide with a reserved payload key
    ///
    /// The `request` and `nonce` keys bind the signature to the endpoint
    /// being called; allowing a caller to overwrite them would produce a
    /// signature that does not protect the intended path.
    #[error("Reserved payload key supplied by caller: {0}")]
    ReservedParameter(String),

    /// Failed to serialize the canonical payload
    #[error("Payload serialization failed: {0}")]
    Serialize(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
