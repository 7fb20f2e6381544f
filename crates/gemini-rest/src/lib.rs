//! REST API client for the Gemini cryptocurrency exchange
//!
//! This crate provides a typed client for Gemini's REST API, covering market
//! data, order management, and account/fund operations.
//!
//! # Authentication
//!
//! Private endpoints use Gemini's header-based scheme: the request body is
//! always empty, and a base64 JSON payload carrying the endpoint path, a
//! strictly increasing nonce, and the request parameters travels in
//! `X-GEMINI-PAYLOAD`, signed with HMAC-SHA384 in `X-GEMINI-SIGNATURE`.
//! Signing and nonce generation live in the `gemini-auth` crate.
//!
//! # Environments
//!
//! Sandbox and production are distinct hosts selected explicitly at client
//! construction; an unrecognized environment tag is a hard error, never a
//! silent default.
//!
//! # Example
//!
//! ```no_run
//! use gemini_rest::{ClientConfig, Credentials, Environment, GeminiRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = GeminiRestClient::new()?;
//!     let ticker = client.market().ticker("btcusd").await?;
//!     println!("BTC/USD: {:?}", ticker.last_price());
//!
//!     // Private endpoints against the sandbox
//!     let creds = Credentials::from_env()?;
//!     let config = ClientConfig::new()
//!         .with_credentials(creds)
//!         .with_environment(Environment::Sandbox);
//!     let auth_client = GeminiRestClient::with_config(config)?;
//!     let balances = auth_client.account()?.balances().await?;
//!     println!("Balances: {:?}", balances);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every call resolves to a typed `RestResult`: success bodies, API errors
//! (non-2xx, body preserved verbatim), and transport failures (timeout,
//! connect) are never conflated, and the client never retries internally.

pub mod client;
pub mod endpoints;
pub mod environment;
pub mod error;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, GeminiRestClient};
pub use environment::Environment;
pub use error::{RestError, RestResult};

// Re-export the auth surface for constructing clients
pub use gemini_auth::{Credentials, NonceGenerator};

// Re-export endpoint-specific types
pub use types::{
    // Market data
    ApiErrorBody, AuctionInfo, BookEntry, OrderbookData, TickerInfo, TradeData,
    // Account
    Balance, Heartbeat, NotionalVolume, Transfer,
    // Fund
    DepositAddress, WithdrawalResult,
    // Trading
    CancelAllDetails, CancelAllResult, ExecutionOption, OrderRequest, OrderSide, OrderStatus,
    PastTrade,
};
