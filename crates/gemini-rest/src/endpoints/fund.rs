//! Private deposit and withdrawal endpoints
//!
//! These endpoints require authentication, and the API key must carry the
//! fund manager role for withdrawals.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::client::GeminiRestClient;
use crate::error::RestResult;
use crate::types::{DepositAddress, WithdrawalResult};

/// Private deposit/withdrawal endpoints
pub struct FundEndpoints<'a> {
    client: &'a GeminiRestClient,
}

impl<'a> FundEndpoints<'a> {
    pub fn new(client: &'a GeminiRestClient) -> Self {
        Self { client }
    }

    /// Generate a new deposit address
    ///
    /// # Arguments
    /// * `currency` - Currency code (e.g., "btc", "eth")
    /// * `label` - Optional label for the address
    #[instrument(skip(self))]
    pub async fn new_deposit_address(
        &self,
        currency: &str,
        label: Option<&str>,
    ) -> RestResult<DepositAddress> {
        let mut params = Map::new();
        if let Some(label) = label {
            params.insert("label".to_string(), Value::String(label.to_string()));
        }

        debug!("Requesting new {} deposit address", currency);
        self.client
            .post_private(&format!("/v1/deposit/{}/newAddress", currency), &params)
            .await
    }

    /// Withdraw funds to an approved address
    ///
    /// # Arguments
    /// * `currency` - Currency code
    /// * `address` - Destination address (must be whitelisted)
    /// * `amount` - Amount to withdraw
    #[instrument(skip(self), fields(currency = %currency))]
    pub async fn withdraw(
        &self,
        currency: &str,
        address: &str,
        amount: Decimal,
    ) -> RestResult<WithdrawalResult> {
        let mut params = Map::new();
        params.insert("address".to_string(), Value::String(address.to_string()));
        params.insert("amount".to_string(), Value::String(amount.to_string()));

        debug!("Withdrawing {} {}", amount, currency);
        self.client
            .post_private(&format!("/v1/withdraw/{}", currency), &params)
            .await
    }
}
