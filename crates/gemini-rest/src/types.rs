//! Types for Gemini REST API requests and responses

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

// ============================================================================
// Error Envelope
// ============================================================================

/// Structured error body returned by Gemini on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Always "error"
    pub result: String,
    /// Machine-readable reason (e.g., "InvalidNonce", "InsufficientFunds")
    pub reason: String,
    /// Human-readable message
    pub message: String,
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Ticker information for a symbol
#[derive(Debug, Clone, Deserialize)]
pub struct TickerInfo {
    /// Highest bid price
    pub bid: String,
    /// Lowest ask price
    pub ask: String,
    /// Last trade price
    pub last: String,
    /// Volume keyed by currency, plus a "timestamp" entry
    #[serde(default)]
    pub volume: HashMap<String, Value>,
}

impl TickerInfo {
    /// Get the current bid price
    pub fn bid_price(&self) -> Option<Decimal> {
        self.bid.parse().ok()
    }

    /// Get the current ask price
    pub fn ask_price(&self) -> Option<Decimal> {
        self.ask.parse().ok()
    }

    /// Get the last trade price
    pub fn last_price(&self) -> Option<Decimal> {
        self.last.parse().ok()
    }

    /// Get the mid price (average of bid and ask)
    pub fn mid_price(&self) -> Option<Decimal> {
        let ask = self.ask_price()?;
        let bid = self.bid_price()?;
        Some((ask + bid) / Decimal::TWO)
    }
}

/// A single price level in the order book
#[derive(Debug, Clone, Deserialize)]
pub struct BookEntry {
    /// Price
    pub price: String,
    /// Quantity at this price
    pub amount: String,
}

impl BookEntry {
    /// Price as a decimal
    pub fn price_decimal(&self) -> Option<Decimal> {
        self.price.parse().ok()
    }

    /// Amount as a decimal
    pub fn amount_decimal(&self) -> Option<Decimal> {
        self.amount.parse().ok()
    }
}

/// Order book snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct OrderbookData {
    /// Bid levels, best first
    pub bids: Vec<BookEntry>,
    /// Ask levels, best first
    pub asks: Vec<BookEntry>,
}

impl OrderbookData {
    /// Get the best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first()?.price_decimal()
    }

    /// Get the best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first()?.price_decimal()
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

/// A public trade
#[derive(Debug, Clone, Deserialize)]
pub struct TradeData {
    /// Unix timestamp (seconds)
    pub timestamp: u64,
    /// Unix timestamp (milliseconds)
    pub timestampms: u64,
    /// Trade ID
    pub tid: u64,
    /// Price
    pub price: String,
    /// Quantity
    pub amount: String,
    /// Always "gemini"
    pub exchange: String,
    /// "buy", "sell", or "auction"
    #[serde(rename = "type")]
    pub side: String,
}

/// Current auction state for a symbol
#[derive(Debug, Clone, Deserialize)]
pub struct AuctionInfo {
    /// Time of the next event (milliseconds)
    pub closed_until_ms: Option<u64>,
    /// Time of the next auction run (milliseconds)
    pub next_auction_ms: Option<u64>,
    /// Last auction result price
    pub last_auction_price: Option<String>,
    /// Last auction quantity
    pub last_auction_quantity: Option<String>,
    /// Highest bid at last auction
    pub last_highest_bid_price: Option<String>,
    /// Lowest ask at last auction
    pub last_lowest_ask_price: Option<String>,
    /// Most recent indicative price
    pub most_recent_indicative_price: Option<String>,
    /// Most recent indicative quantity
    pub most_recent_indicative_quantity: Option<String>,
}

// ============================================================================
// Account Types
// ============================================================================

/// Account balance for one currency
#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    /// Currency code (e.g., "BTC", "USD")
    pub currency: String,
    /// Total amount
    pub amount: String,
    /// Amount available for trading
    pub available: String,
    /// Amount available for withdrawal
    #[serde(rename = "availableForWithdrawal")]
    pub available_for_withdrawal: String,
    /// Account type, usually "exchange"
    #[serde(rename = "type")]
    pub account_type: Option<String>,
}

impl Balance {
    /// Total amount as a decimal
    pub fn amount_decimal(&self) -> Option<Decimal> {
        self.amount.parse().ok()
    }

    /// Available amount as a decimal
    pub fn available_decimal(&self) -> Option<Decimal> {
        self.available.parse().ok()
    }
}

/// 30-day notional volume and fee tier
#[derive(Debug, Clone, Deserialize)]
pub struct NotionalVolume {
    /// Maker fee in basis points
    pub api_maker_fee_bps: u32,
    /// Taker fee in basis points
    pub api_taker_fee_bps: u32,
    /// Auction fee in basis points
    pub api_auction_fee_bps: u32,
    /// 30-day notional volume in USD
    pub notional_30d_volume: f64,
    /// Last update (milliseconds)
    pub last_updated_ms: u64,
    /// UTC date of the snapshot
    pub date: String,
}

/// A deposit or withdrawal record
#[derive(Debug, Clone, Deserialize)]
pub struct Transfer {
    /// "Deposit" or "Withdrawal"
    #[serde(rename = "type")]
    pub kind: String,
    /// Transfer status (e.g., "Advanced", "Complete")
    pub status: String,
    /// Unix timestamp (milliseconds)
    pub timestampms: u64,
    /// Event ID
    pub eid: u64,
    /// Currency code
    pub currency: String,
    /// Amount transferred
    pub amount: String,
    /// Transfer method (e.g., "ACH", "Wire"), if applicable
    pub method: Option<String>,
    /// On-chain transaction hash, if applicable
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
}

/// Heartbeat acknowledgement
#[derive(Debug, Clone, Deserialize)]
pub struct Heartbeat {
    /// Always "ok"
    pub result: String,
}

// ============================================================================
// Fund Types
// ============================================================================

/// A newly generated deposit address
#[derive(Debug, Clone, Deserialize)]
pub struct DepositAddress {
    /// Currency code
    pub currency: String,
    /// The deposit address
    pub address: String,
    /// Optional caller-supplied label
    pub label: Option<String>,
}

/// Result of a withdrawal request
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalResult {
    /// Destination address
    pub address: String,
    /// Amount withdrawn
    pub amount: String,
    /// On-chain transaction hash, once available
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    /// Withdrawal ID, if assigned
    #[serde(rename = "withdrawalId")]
    pub withdrawal_id: Option<String>,
    /// Informational message, if any
    pub message: Option<String>,
}

// ============================================================================
// Trading Types
// ============================================================================

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Order execution option
///
/// At most one may be set per order; Gemini rejects conflicting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionOption {
    /// Post-only: cancel instead of taking liquidity
    #[serde(rename = "maker-or-cancel")]
    MakerOrCancel,
    /// Fill what is possible immediately, cancel the rest
    #[serde(rename = "immediate-or-cancel")]
    ImmediateOrCancel,
    /// Fill completely immediately or cancel
    #[serde(rename = "fill-or-kill")]
    FillOrKill,
    /// Rest on the auction book only
    #[serde(rename = "auction-only")]
    AuctionOnly,
    /// Indication of interest
    #[serde(rename = "indication-of-interest")]
    IndicationOfInterest,
}

impl ExecutionOption {
    /// Wire representation of this option
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MakerOrCancel => "maker-or-cancel",
            Self::ImmediateOrCancel => "immediate-or-cancel",
            Self::FillOrKill => "fill-or-kill",
            Self::AuctionOnly => "auction-only",
            Self::IndicationOfInterest => "indication-of-interest",
        }
    }
}

impl std::fmt::Display for ExecutionOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request to place a new order
///
/// Only populated optional fields enter the signed payload.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    /// Trading symbol (e.g., "btcusd")
    pub symbol: String,
    /// Quantity to buy or sell
    pub amount: Decimal,
    /// Limit price
    pub price: Decimal,
    /// Order side
    pub side: OrderSide,
    /// Client-assigned order ID
    pub client_order_id: Option<String>,
    /// Stop price; turns the order into an exchange stop limit
    pub stop_price: Option<Decimal>,
    /// Execution options
    pub options: Vec<ExecutionOption>,
}

impl OrderRequest {
    /// Create a limit order
    ///
    /// Gemini supports only limit orders over REST; market behavior is
    /// approximated with an aggressive price plus `ImmediateOrCancel`.
    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            amount,
            price,
            side,
            client_order_id: None,
            stop_price: None,
            options: Vec::new(),
        }
    }

    /// Set a client order ID
    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }

    /// Set a stop price, making this an exchange stop limit order
    pub fn with_stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    /// Add an execution option
    pub fn with_option(mut self, option: ExecutionOption) -> Self {
        self.options.push(option);
        self
    }

    /// Build the body parameters for `/v1/order/new`
    ///
    /// Absent optional fields are omitted entirely rather than sent as null.
    pub fn to_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("symbol".to_string(), Value::String(self.symbol.clone()));
        params.insert("amount".to_string(), Value::String(self.amount.to_string()));
        params.insert("price".to_string(), Value::String(self.price.to_string()));
        params.insert("side".to_string(), Value::String(self.side.to_string()));

        let order_type = if self.stop_price.is_some() {
            "exchange stop limit"
        } else {
            "exchange limit"
        };
        params.insert("type".to_string(), Value::String(order_type.to_string()));

        if let Some(id) = &self.client_order_id {
            params.insert("client_order_id".to_string(), Value::String(id.clone()));
        }
        if let Some(stop) = &self.stop_price {
            params.insert("stop_price".to_string(), Value::String(stop.to_string()));
        }
        if !self.options.is_empty() {
            let options: Vec<Value> = self
                .options
                .iter()
                .map(|o| Value::String(o.as_str().to_string()))
                .collect();
            params.insert("options".to_string(), Value::Array(options));
        }

        params
    }
}

/// Order state as reported by the exchange
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatus {
    /// Exchange order ID
    pub order_id: String,
    /// Client-assigned order ID, if one was supplied
    pub client_order_id: Option<String>,
    /// Trading symbol
    pub symbol: String,
    /// Always "gemini"
    pub exchange: String,
    /// Limit price
    pub price: Option<String>,
    /// Volume-weighted average fill price
    pub avg_execution_price: Option<String>,
    /// Order side
    pub side: OrderSide,
    /// Order type string (e.g., "exchange limit")
    #[serde(rename = "type")]
    pub order_type: String,
    /// Unix timestamp (seconds, as a string)
    pub timestamp: String,
    /// Unix timestamp (milliseconds)
    pub timestampms: u64,
    /// Whether the order is still on the book
    pub is_live: bool,
    /// Whether the order has been cancelled
    pub is_cancelled: bool,
    /// Whether the order is hidden
    pub is_hidden: Option<bool>,
    /// Whether the order was forced by the exchange
    pub was_forced: Option<bool>,
    /// Quantity executed so far
    pub executed_amount: Option<String>,
    /// Quantity still open
    pub remaining_amount: Option<String>,
    /// Original quantity
    pub original_amount: Option<String>,
    /// Execution options in effect
    #[serde(default)]
    pub options: Vec<String>,
}

impl OrderStatus {
    /// Executed quantity as a decimal
    pub fn executed(&self) -> Option<Decimal> {
        self.executed_amount.as_ref()?.parse().ok()
    }

    /// Remaining quantity as a decimal
    pub fn remaining(&self) -> Option<Decimal> {
        self.remaining_amount.as_ref()?.parse().ok()
    }

    /// Whether the order has been completely filled
    pub fn is_filled(&self) -> bool {
        matches!(self.remaining(), Some(r) if r.is_zero()) && !self.is_cancelled
    }
}

/// Result of cancelling all (or session) orders
#[derive(Debug, Clone, Deserialize)]
pub struct CancelAllResult {
    /// Always "ok"
    pub result: String,
    /// Per-order breakdown
    pub details: CancelAllDetails,
}

/// Breakdown of a bulk cancel
#[derive(Debug, Clone, Deserialize)]
pub struct CancelAllDetails {
    /// Orders cancelled by this request
    #[serde(rename = "cancelledOrders")]
    pub cancelled_orders: Vec<u64>,
    /// Orders that could not be cancelled
    #[serde(rename = "cancelRejects")]
    pub cancel_rejects: Vec<u64>,
}

/// One of the caller's own past trades
#[derive(Debug, Clone, Deserialize)]
pub struct PastTrade {
    /// Fill price
    pub price: String,
    /// Fill quantity
    pub amount: String,
    /// Unix timestamp (seconds)
    pub timestamp: u64,
    /// Unix timestamp (milliseconds)
    pub timestampms: u64,
    /// Order side
    #[serde(rename = "type")]
    pub side: String,
    /// Whether the caller was the aggressor
    pub aggressor: bool,
    /// Currency the fee was charged in
    pub fee_currency: String,
    /// Fee amount
    pub fee_amount: String,
    /// Trade ID
    pub tid: u64,
    /// Exchange order ID this fill belongs to
    pub order_id: String,
}
