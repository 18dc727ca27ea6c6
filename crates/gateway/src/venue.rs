//! Venue client port
//!
//! Authenticated REST operations consumed from the Gatecoin client. The wire
//! protocol, request signing, and transport concerns are owned by the
//! embedding application; this gateway only consumes the trait. Tests drive
//! the gateway through scripted implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Failure reported by the venue client. Every operation may fail with a
/// message; the gateway carries it upward without inspecting it.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct VenueError {
    pub message: String,
}

impl VenueError {
    pub fn new(message: impl Into<String>) -> Self {
        VenueError {
            message: message.into(),
        }
    }
}

pub type VenueResult<T> = Result<T, VenueError>;

/// Raw trade from the venue trade-history endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrade {
    pub price: Decimal,
    pub quantity: Decimal,
    /// Epoch seconds, sent as a string on the wire
    pub transaction_time: String,
    /// Aggressor side tag: "bid" or "ask"
    pub way: String,
}

/// Raw order book: levels are [price, size] pairs in venue order.
/// The gateway preserves that ordering verbatim.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOrderBook {
    pub bids: Vec<[Decimal; 2]>,
    pub asks: Vec<[Decimal; 2]>,
}

/// Raw balance entry for one currency
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawBalance {
    pub free: Decimal,
    pub used: Decimal,
    pub total: Decimal,
}

/// Open order as reported by the venue's order list
#[derive(Debug, Clone, Deserialize)]
pub struct VenueOrder {
    /// Venue-assigned order id
    pub order_id: String,
    /// Venue symbol the order trades, e.g. "BTCUSD"
    pub code: String,
    pub price: Decimal,
    pub initial_quantity: Decimal,
    pub remaining_quantity: Decimal,
    /// Human-readable status text, e.g. "New" or "Working"
    pub status_desc: String,
}

/// Recent OHLC sample attached to a venue symbol listing
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OhlcSample {
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

/// One entry of the venue market listing
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolDetails {
    pub symbol: String,
    pub info: OhlcSample,
}

/// Acknowledgment of a create-order request
#[derive(Debug, Clone, Deserialize)]
pub struct OrderAck {
    pub id: String,
}

/// Authenticated REST operations against the venue
#[async_trait]
pub trait VenueApi: Send + Sync {
    async fn fetch_trades(&self, symbol: &str) -> VenueResult<Vec<RawTrade>>;

    async fn fetch_order_book(&self, symbol: &str) -> VenueResult<RawOrderBook>;

    async fn fetch_balance(&self) -> VenueResult<HashMap<String, RawBalance>>;

    async fn create_limit_buy_order(
        &self,
        symbol: &str,
        quantity: Decimal,
        price: Decimal,
    ) -> VenueResult<OrderAck>;

    async fn create_limit_sell_order(
        &self,
        symbol: &str,
        quantity: Decimal,
        price: Decimal,
    ) -> VenueResult<OrderAck>;

    async fn cancel_order(&self, exchange_id: &str) -> VenueResult<()>;

    /// The venue's authoritative list of this account's open orders,
    /// across all symbols
    async fn fetch_open_orders(&self) -> VenueResult<Vec<VenueOrder>>;

    /// Symbol metadata listing, fetched once at startup
    async fn load_markets(&self) -> VenueResult<Vec<SymbolDetails>>;
}
