//! Gemini environment selection
//!
//! Sandbox and production are distinct hosts with distinct credentials.
//! Sending production credentials to the sandbox host (or vice versa) is a
//! safety-critical misconfiguration, so an unrecognized tag is a hard error,
//! never a silent default.

use std::fmt;
use std::str::FromStr;

use crate::error::RestError;

/// Gemini deployment target
///
/// There is deliberately no `Default` impl: an environment is chosen either
/// explicitly or by strict parsing, and the only default lives in
/// `ClientConfig::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment (real money)
    Production,
    /// Sandbox environment (test funds)
    Sandbox,
}

impl Environment {
    /// REST API base URL, no trailing slash
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Production => "https://api.gemini.com",
            Self::Sandbox => "https://api.sandbox.gemini.com",
        }
    }

    /// Returns true if this is the production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Returns true if this is the sandbox environment
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Self::Sandbox)
    }

    /// Load the environment from the `GEMINI_ENVIRONMENT` variable
    ///
    /// # Errors
    /// Fails if the variable is missing or carries an unrecognized tag.
    /// Callers that want a default should pass an explicit `Environment`
    /// through `ClientConfig` instead.
    pub fn from_env() -> Result<Self, RestError> {
        let tag = std::env::var("GEMINI_ENVIRONMENT").map_err(|_| {
            RestError::Configuration("GEMINI_ENVIRONMENT is not set".to_string())
        })?;
        tag.parse()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Sandbox => write!(f, "sandbox"),
        }
    }
}

impl FromStr for Environment {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "sandbox" => Ok(Self::Sandbox),
            other => Err(RestError::Configuration(format!(
                "invalid environment '{}', expected 'production' or 'sandbox'",
                other
            ))),
        }
    }
}
