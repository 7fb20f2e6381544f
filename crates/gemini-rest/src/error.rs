//! Error types for REST API operations

use gemini_auth::AuthError;

use crate::types::ApiErrorBody;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Client configuration is unusable (bad environment tag, HTTP client
    /// build failure); raised before any network call
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Missing API credentials for a private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Payload construction or signing failed
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// DNS, connect, or I/O failure before a response arrived
    #[error("Connection error: {0}")]
    Connection(String),

    /// The exchange returned a non-2xx status; body preserved verbatim
    #[error("API error {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body (usually Gemini's error envelope)
        body: String,
    },

    /// Failed to parse a response body
    #[error("Parse error: {0}")]
    Parse(String),
}

impl RestError {
    /// Whether this error occurred before or during the HTTP exchange itself
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout | Self::Connection(_))
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Api { status: 429, .. })
    }

    /// Check if this error is worth retrying by the caller
    ///
    /// The client never retries internally; this is advisory.
    pub fn is_retryable(&self) -> bool {
        self.is_transport() || self.is_rate_limited() || matches!(self, Self::Api { status, .. } if *status >= 500)
    }

    /// Decode Gemini's structured error envelope, if the body carries one
    ///
    /// Gemini error bodies look like
    /// `{"result":"error","reason":"InvalidNonce","message":"..."}`. The raw
    /// body stays available on the `Api` variant regardless.
    pub fn api_error_body(&self) -> Option<ApiErrorBody> {
        match self {
            Self::Api { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Connection(err.to_string())
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(RestError::Timeout.is_transport());
        assert!(RestError::Connection("refused".to_string()).is_transport());
        assert!(!RestError::AuthRequired.is_transport());
        assert!(!RestError::Api {
            status: 404,
            body: String::new()
        }
        .is_transport());
    }

    #[test]
    fn test_retryable() {
        assert!(RestError::Timeout.is_retryable());
        assert!(RestError::Api {
            status: 429,
            body: String::new()
        }
        .is_retryable());
        assert!(RestError::Api {
            status: 502,
            body: String::new()
        }
        .is_retryable());
        assert!(!RestError::Api {
            status: 400,
            body: String::new()
        }
        .is_retryable());
        assert!(!RestError::AuthRequired.is_retryable());
    }

    #[test]
    fn test_api_error_body_decoding() {
        let err = RestError::Api {
            status: 400,
            body: r#"{"result":"error","reason":"InvalidNonce","message":"Nonce was too small"}"#
                .to_string(),
        };

        let decoded = err.api_error_body().unwrap();
        assert_eq!(decoded.reason, "InvalidNonce");
        assert_eq!(decoded.message, "Nonce was too small");

        let opaque = RestError::Api {
            status: 502,
            body: "<html>bad gateway</html>".to_string(),
        };
        assert!(opaque.api_error_body().is_none());
    }
}
