//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use tracing::{debug, instrument};

use crate::client::GeminiRestClient;
use crate::error::RestResult;
use crate::types::{AuctionInfo, OrderbookData, TickerInfo, TradeData};

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a GeminiRestClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a GeminiRestClient) -> Self {
        Self { client }
    }

    /// Get all trading symbols
    #[instrument(skip(self))]
    pub async fn symbols(&self) -> RestResult<Vec<String>> {
        debug!("Fetching symbols");
        self.client.get_public("/v1/symbols", &[]).await
    }

    /// Get ticker information for a symbol
    ///
    /// # Arguments
    /// * `symbol` - Trading symbol (e.g., "btcusd")
    #[instrument(skip(self))]
    pub async fn ticker(&self, symbol: &str) -> RestResult<TickerInfo> {
        debug!("Fetching ticker for {}", symbol);
        self.client
            .get_public(&format!("/v1/pubticker/{}", symbol), &[])
            .await
    }

    /// Get the current order book for a symbol
    ///
    /// # Arguments
    /// * `symbol` - Trading symbol
    /// * `limit_bids` - Maximum bid levels (0 returns all)
    /// * `limit_asks` - Maximum ask levels (0 returns all)
    #[instrument(skip(self))]
    pub async fn book(
        &self,
        symbol: &str,
        limit_bids: Option<u32>,
        limit_asks: Option<u32>,
    ) -> RestResult<OrderbookData> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(bids) = limit_bids {
            query.push(("limit_bids", bids.to_string()));
        }
        if let Some(asks) = limit_asks {
            query.push(("limit_asks", asks.to_string()));
        }

        debug!("Fetching order book for {}", symbol);
        self.client
            .get_public(&format!("/v1/book/{}", symbol), &query)
            .await
    }

    /// Get recent trades for a symbol
    ///
    /// # Arguments
    /// * `symbol` - Trading symbol
    /// * `since` - Only return trades after this timestamp
    /// * `limit` - Maximum number of trades (default 50, max 500)
    #[instrument(skip(self))]
    pub async fn trades(
        &self,
        symbol: &str,
        since: Option<u64>,
        limit: Option<u32>,
    ) -> RestResult<Vec<TradeData>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(since) = since {
            query.push(("timestamp", since.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit_trades", limit.to_string()));
        }

        debug!("Fetching trades for {}", symbol);
        self.client
            .get_public(&format!("/v1/trades/{}", symbol), &query)
            .await
    }

    /// Get the current auction state for a symbol
    #[instrument(skip(self))]
    pub async fn current_auction(&self, symbol: &str) -> RestResult<AuctionInfo> {
        debug!("Fetching auction state for {}", symbol);
        self.client
            .get_public(&format!("/v1/auction/{}", symbol), &[])
            .await
    }
}
