//! Main REST client implementation
//!
//! All requests, public and private, flow through the dispatch pipeline in
//! this module: build the canonical payload, sign it, attach the transport
//! headers, issue the call, classify the outcome. Endpoint modules are thin
//! wrappers over these primitives.

use gemini_auth::{build_payload, sign_payload, Credentials, NonceGenerator};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::endpoints::{AccountEndpoints, FundEndpoints, MarketEndpoints, OrderEndpoints};
use crate::environment::Environment;
use crate::error::{RestError, RestResult};

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Gemini REST API client
///
/// Provides access to both public and private endpoints. All configuration
/// (credentials, environment, timeout) is held explicitly on the client; a
/// process may run any number of clients with distinct accounts or
/// environments side by side.
///
/// # Example
///
/// ```no_run
/// use gemini_rest::{Credentials, Environment, GeminiRestClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = GeminiRestClient::new()?;
///     let symbols = client.market().symbols().await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = GeminiRestClient::with_credentials(creds)?;
///     let balances = auth_client.account()?.balances().await?;
///
///     Ok(())
/// }
/// ```
pub struct GeminiRestClient {
    http_client: Client,
    base_url: String,
    environment: Environment,
    credentials: Option<Credentials>,
    // Shared across clones so every request signed with the same credentials
    // draws from one strictly increasing sequence.
    nonces: Arc<NonceGenerator>,
}

impl GeminiRestClient {
    /// Create a new production client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new production client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or("gemini-rest/0.1.0"))
            .build()
            .map_err(|e| RestError::Configuration(format!("HTTP client build failed: {}", e)))?;

        info!(environment = %config.environment, "Created Gemini REST client");

        let base_url = config
            .base_url
            .as_deref()
            .unwrap_or_else(|| config.environment.base_url());

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            environment: config.environment,
            credentials: config.credentials,
            nonces: Arc::new(NonceGenerator::new()),
        })
    }

    /// The environment this client targets
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// The resolved base URL, no trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Full URL for an endpoint path
    ///
    /// Slashes are normalized so double or missing slashes never occur.
    pub fn endpoint_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    // ========================================================================
    // Endpoint Groups
    // ========================================================================

    /// Public market data endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Private order management endpoints (requires credentials)
    pub fn order(&self) -> RestResult<OrderEndpoints<'_>> {
        self.require_credentials()?;
        Ok(OrderEndpoints::new(self))
    }

    /// Private account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        self.require_credentials()?;
        Ok(AccountEndpoints::new(self))
    }

    /// Private deposit/withdrawal endpoints (requires credentials)
    pub fn fund(&self) -> RestResult<FundEndpoints<'_>> {
        self.require_credentials()?;
        Ok(FundEndpoints::new(self))
    }

    fn require_credentials(&self) -> RestResult<&Credentials> {
        self.credentials.as_ref().ok_or(RestError::AuthRequired)
    }

    // ========================================================================
    // Dispatch Core
    // ========================================================================

    /// Make an unauthenticated GET request
    ///
    /// # Arguments
    /// * `path` - Endpoint path (e.g., "/v1/symbols")
    /// * `query` - Query parameters, URL-encoded and appended unsigned
    pub async fn get_public<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> RestResult<T> {
        let body = self.get_public_raw(path, query).await?;
        serde_json::from_str(&body).map_err(|e| RestError::Parse(e.to_string()))
    }

    /// Make an unauthenticated GET request, returning the body unparsed
    pub async fn get_public_raw(&self, path: &str, query: &[(&str, String)]) -> RestResult<String> {
        let url = self.endpoint_url(path);
        debug!(url = %url, "GET request");

        let mut request = self.http_client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        classify(status, body)
    }

    /// Make an authenticated GET request
    ///
    /// Auth headers carry a signed payload of `{request, nonce}`; query
    /// parameters travel unsigned in the URL.
    pub async fn get_private<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> RestResult<T> {
        let url = self.endpoint_url(path);
        let (encoded, signature, api_key) = self.sign_request(path, &Map::new())?;

        debug!(path = %path, "Authenticated GET request");

        let mut request = self.http_client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .header("X-GEMINI-APIKEY", api_key)
            .header("X-GEMINI-PAYLOAD", encoded)
            .header("X-GEMINI-SIGNATURE", signature)
            .header("Cache-Control", "no-cache")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        let body = classify(status, body)?;
        serde_json::from_str(&body).map_err(|e| RestError::Parse(e.to_string()))
    }

    /// Make an authenticated POST request
    ///
    /// The HTTP body is always empty; the signed payload travels entirely in
    /// headers. Timed-out requests surface as `RestError::Timeout` and their
    /// nonce is considered consumed.
    pub async fn post_private<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &Map<String, Value>,
    ) -> RestResult<T> {
        let url = self.endpoint_url(path);
        let (encoded, signature, api_key) = self.sign_request(path, params)?;

        debug!(path = %path, "Authenticated POST request");

        let response = self
            .http_client
            .post(&url)
            .header("X-GEMINI-APIKEY", api_key)
            .header("X-GEMINI-PAYLOAD", encoded)
            .header("X-GEMINI-SIGNATURE", signature)
            .header("Content-Type", "text/plain")
            .header("Content-Length", "0")
            .header("Cache-Control", "no-cache")
            .body("")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        let body = classify(status, body)?;
        serde_json::from_str(&body).map_err(|e| RestError::Parse(e.to_string()))
    }

    /// Build the auth header values for one request
    ///
    /// Draws a fresh nonce; the nonce is spent whether or not the request
    /// ultimately reaches the exchange.
    fn sign_request(
        &self,
        path: &str,
        params: &Map<String, Value>,
    ) -> RestResult<(String, String, &str)> {
        let credentials = self.require_credentials()?;
        let canonical = build_payload(path, self.nonces.next(), params)?;
        let signed = sign_payload(&canonical, credentials)?;
        Ok((signed.encoded, signed.signature, credentials.api_key()))
    }
}

impl Clone for GeminiRestClient {
    fn clone(&self) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            environment: self.environment,
            credentials: self.credentials.clone(),
            nonces: Arc::clone(&self.nonces),
        }
    }
}

impl std::fmt::Debug for GeminiRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiRestClient")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Classify an HTTP outcome
///
/// 2xx passes the body through verbatim; anything else is an `Api` error
/// that preserves the body for caller inspection. Transport failures never
/// reach this function (they surface from `reqwest` as `Timeout` or
/// `Connection`).
fn classify(status: u16, body: String) -> RestResult<String> {
    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(RestError::Api { status, body })
    }
}

/// Client configuration
#[derive(Debug)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Target environment
    pub environment: Environment,
    /// Base URL override for proxies and tests; the environment's URL is
    /// used when unset
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            environment: Environment::Production,
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the target environment
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Override the base URL (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
