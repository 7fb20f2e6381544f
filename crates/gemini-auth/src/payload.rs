//! Canonical payload construction
//!
//! Every private request is signed over a canonical JSON object containing
//! the endpoint path (`request`), the nonce, and the endpoint parameters.
//! The signature binds the request to that exact path, so the reserved keys
//! must never be overwritten by caller data.

use serde_json::{Map, Value};

use crate::error::{AuthError, AuthResult};

/// Keys owned by the signing core
const RESERVED_KEYS: [&str; 2] = ["request", "nonce"];

/// Build the canonical payload map for a private request
///
/// Merges `{"request": path, "nonce": nonce}` with the endpoint parameters.
/// The `path` must be the literal endpoint path, never a query-decorated URL.
///
/// # Arguments
/// * `path` - Endpoint path (e.g., "/v1/order/new")
/// * `nonce` - Unique strictly-increasing nonce for this request
/// * `params` - Endpoint-specific body parameters
///
/// # Errors
/// Returns `AuthError::ReservedParameter` if `params` contains `request` or
/// `nonce`. That is a programming error in the caller; accepting it would
/// corrupt the signature's binding to the intended endpoint.
pub fn build_payload(
    path: &str,
    nonce: u64,
    params: &Map<String, Value>,
) -> AuthResult<Map<String, Value>> {
    for key in RESERVED_KEYS {
        if params.contains_key(key) {
            return Err(AuthError::ReservedParameter(key.to_string()));
        }
    }

    let mut payload = Map::with_capacity(params.len() + 2);
    payload.insert("request".to_string(), Value::String(path.to_string()));
    payload.insert("nonce".to_string(), Value::from(nonce));
    for (key, value) in params {
        payload.insert(key.clone(), value.clone());
    }

    Ok(payload)
}
