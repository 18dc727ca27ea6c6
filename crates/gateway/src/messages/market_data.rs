//! Market data event types

use chrono::{DateTime, Utc};
use hermes_core::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order book level (price + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: Decimal,
    pub size: Decimal,
}

impl BookLevel {
    /// Create a new book level
    pub fn new(price: Decimal, size: Decimal) -> Self {
        Self { price, size }
    }
}

/// Full order book snapshot. Each snapshot replaces the previous one
/// wholesale; the gateway performs no incremental diffing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
    pub time: DateTime<Utc>,
}

impl MarketSnapshot {
    pub fn new(bids: Vec<BookLevel>, asks: Vec<BookLevel>, time: DateTime<Utc>) -> Self {
        Self { bids, asks, time }
    }

    /// Best bid, if the venue reported any
    pub fn best_bid(&self) -> Option<&BookLevel> {
        self.bids.first()
    }

    /// Best ask, if the venue reported any
    pub fn best_ask(&self) -> Option<&BookLevel> {
        self.asks.first()
    }
}

/// Normalized trade from the venue tape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketTrade {
    pub price: Decimal,
    pub size: Decimal,
    pub time: DateTime<Utc>,
    pub side: Side,
    /// True only for the first poll batch after gateway start: those trades
    /// are a backfill, not newly occurring.
    pub historical: bool,
}

impl MarketTrade {
    /// Notional value of the trade
    pub fn notional(&self) -> Decimal {
        self.price * self.size
    }
}
