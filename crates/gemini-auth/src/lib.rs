//! Request signing and nonce generation for the Gemini exchange API
//!
//! This crate implements the authentication scheme required by Gemini's
//! private REST endpoints: a canonical JSON payload carrying the request
//! path, a strictly increasing nonce, and the endpoint parameters, signed
//! with HMAC-SHA384 and transported entirely in headers.
//!
//! # Example
//!
//! ```no_run
//! use gemini_auth::{build_payload, sign_payload, Credentials, NonceGenerator};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load credentials from environment
//!     let creds = Credentials::from_env()?;
//!
//!     // One generator per credential set
//!     let nonces = NonceGenerator::new();
//!
//!     let params = serde_json::Map::new();
//!     let canonical = build_payload("/v1/balances", nonces.next(), &params)?;
//!     let signed = sign_payload(&canonical, &creds)?;
//!
//!     println!("X-GEMINI-PAYLOAD: {}", signed.encoded);
//!     println!("X-GEMINI-SIGNATURE: {}", signed.signature);
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;
mod nonce;
mod payload;
mod signer;

pub use credentials::Credentials;
pub use error::{AuthError, AuthResult};
pub use nonce::NonceGenerator;
pub use payload::build_payload;
pub use signer::{sign_payload, SignedPayload};
