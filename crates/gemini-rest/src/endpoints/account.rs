//! Private account endpoints
//!
//! These endpoints require authentication.

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::client::GeminiRestClient;
use crate::error::RestResult;
use crate::types::{Balance, Heartbeat, NotionalVolume, Transfer};

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a GeminiRestClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a GeminiRestClient) -> Self {
        Self { client }
    }

    /// Get available balances for all currencies
    #[instrument(skip(self))]
    pub async fn balances(&self) -> RestResult<Vec<Balance>> {
        debug!("Fetching balances");
        self.client.post_private("/v1/balances", &Map::new()).await
    }

    /// Get 30-day notional volume and the current fee tier
    #[instrument(skip(self))]
    pub async fn notional_volume(&self) -> RestResult<NotionalVolume> {
        self.client
            .post_private("/v1/notionalvolume", &Map::new())
            .await
    }

    /// Get deposit and withdrawal history
    ///
    /// # Arguments
    /// * `limit` - Maximum number of transfers (default 10, max 50)
    /// * `since` - Only return transfers after this timestamp (milliseconds)
    #[instrument(skip(self))]
    pub async fn transfers(
        &self,
        limit: Option<u32>,
        since: Option<u64>,
    ) -> RestResult<Vec<Transfer>> {
        let mut params = Map::new();
        if let Some(limit) = limit {
            params.insert("limit_transfers".to_string(), Value::from(limit));
        }
        if let Some(since) = since {
            params.insert("timestamp".to_string(), Value::from(since));
        }

        self.client.post_private("/v1/transfers", &params).await
    }

    /// Prevent a session with `heartbeat` enabled from cancelling its orders
    ///
    /// Must be called at least every 30 seconds for such sessions.
    #[instrument(skip(self))]
    pub async fn heartbeat(&self) -> RestResult<Heartbeat> {
        self.client.post_private("/v1/heartbeat", &Map::new()).await
    }
}
