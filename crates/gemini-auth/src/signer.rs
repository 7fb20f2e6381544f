//! HMAC-SHA384 request signing
//!
//! Gemini's signing scheme, in order and bit-exact:
//! 1. Serialize the canonical payload map to JSON
//! 2. Base64-encode the UTF-8 JSON bytes
//! 3. HMAC-SHA384 over the base64 bytes, keyed with the API secret
//! 4. Hex-encode the MAC in lowercase
//!
//! The base64 string travels in `X-GEMINI-PAYLOAD`, the hex signature in
//! `X-GEMINI-SIGNATURE`; the HTTP body of a signed POST is always empty.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::Sha384;

use crate::credentials::Credentials;
use crate::error::{AuthError, AuthResult};

type HmacSha384 = Hmac<Sha384>;

/// A payload ready for header transport
///
/// Derived deterministically from the canonical map and the credentials;
/// lives only for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    /// Base64 of the canonical payload JSON (`X-GEMINI-PAYLOAD`)
    pub encoded: String,
    /// Lowercase hex HMAC-SHA384 signature (`X-GEMINI-SIGNATURE`)
    pub signature: String,
}

/// Sign a canonical payload map
///
/// Identical inputs always yield identical output; any change to a single
/// field (including the nonce) changes the signature.
pub fn sign_payload(
    canonical: &Map<String, Value>,
    credentials: &Credentials,
) -> AuthResult<SignedPayload> {
    let json = serde_json::to_vec(canonical).map_err(|e| AuthError::Serialize(e.to_string()))?;
    let encoded = BASE64.encode(&json);

    let mut mac = HmacSha384::new_from_slice(credentials.secret_bytes())
        .expect("HMAC can take key of any size");
    mac.update(encoded.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    Ok(SignedPayload { encoded, signature })
}
