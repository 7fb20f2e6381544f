//! Private order management endpoints
//!
//! These endpoints require authentication.

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::client::GeminiRestClient;
use crate::error::RestResult;
use crate::types::{CancelAllResult, OrderRequest, OrderStatus, PastTrade};

/// Private order management endpoints
pub struct OrderEndpoints<'a> {
    client: &'a GeminiRestClient,
}

impl<'a> OrderEndpoints<'a> {
    pub fn new(client: &'a GeminiRestClient) -> Self {
        Self { client }
    }

    /// Place a new order
    ///
    /// # Arguments
    /// * `order` - Order request with all parameters
    ///
    /// # Returns
    /// The order's initial status as reported by the exchange.
    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = %order.side))]
    pub async fn new_order(&self, order: &OrderRequest) -> RestResult<OrderStatus> {
        debug!(
            "Placing {} order for {} {} at {}",
            order.side, order.amount, order.symbol, order.price
        );
        self.client
            .post_private("/v1/order/new", &order.to_params())
            .await
    }

    /// Cancel an order
    ///
    /// # Arguments
    /// * `order_id` - Exchange order ID to cancel
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<OrderStatus> {
        let mut params = Map::new();
        params.insert("order_id".to_string(), Value::from(order_id));

        debug!("Cancelling order {}", order_id);
        self.client.post_private("/v1/order/cancel", &params).await
    }

    /// Cancel all orders opened by this API session
    #[instrument(skip(self))]
    pub async fn cancel_session_orders(&self) -> RestResult<CancelAllResult> {
        debug!("Cancelling session orders");
        self.client
            .post_private("/v1/order/cancel/session", &Map::new())
            .await
    }

    /// Cancel all outstanding orders on the account
    #[instrument(skip(self))]
    pub async fn cancel_all_orders(&self) -> RestResult<CancelAllResult> {
        debug!("Cancelling all orders");
        self.client
            .post_private("/v1/order/cancel/all", &Map::new())
            .await
    }

    /// Get the status of an order
    ///
    /// # Arguments
    /// * `order_id` - Exchange order ID
    #[instrument(skip(self))]
    pub async fn order_status(&self, order_id: u64) -> RestResult<OrderStatus> {
        let mut params = Map::new();
        params.insert("order_id".to_string(), Value::from(order_id));

        self.client.post_private("/v1/order/status", &params).await
    }

    /// Get all live orders for the account
    #[instrument(skip(self))]
    pub async fn active_orders(&self) -> RestResult<Vec<OrderStatus>> {
        self.client.post_private("/v1/orders", &Map::new()).await
    }

    /// Get the caller's past trades
    ///
    /// # Arguments
    /// * `symbol` - Trading symbol
    /// * `limit` - Maximum number of trades (default 50, max 500)
    /// * `since` - Only return trades after this timestamp (milliseconds)
    #[instrument(skip(self))]
    pub async fn past_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
        since: Option<u64>,
    ) -> RestResult<Vec<PastTrade>> {
        let mut params = Map::new();
        params.insert("symbol".to_string(), Value::String(symbol.to_string()));
        if let Some(limit) = limit {
            params.insert("limit_trades".to_string(), Value::from(limit));
        }
        if let Some(since) = since {
            params.insert("timestamp".to_string(), Value::from(since));
        }

        self.client.post_private("/v1/mytrades", &params).await
    }
}
