//! Market data polling and normalization
//!
//! Converts raw venue order-book and trade payloads into canonical
//! [`MarketSnapshot`] and [`MarketTrade`] events. Level ordering comes from
//! the venue and is preserved verbatim; no validation of ordering or price
//! monotonicity is performed, so malformed venue data propagates as-is.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use hermes_core::Side;
use log::warn;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::GatewayError;
use crate::messages::{BookLevel, MarketSnapshot, MarketTrade};
use crate::rate_limit::RateLimitMonitor;
use crate::venue::{RawOrderBook, RawTrade, VenueApi};

/// Decode the venue's trade-side tag
fn decode_side(tag: &str) -> Side {
    match tag {
        "bid" => Side::Bid,
        "ask" => Side::Ask,
        _ => Side::Unknown,
    }
}

fn to_level(pair: &[Decimal; 2]) -> BookLevel {
    BookLevel::new(pair[0], pair[1])
}

/// Polls the venue order book and trade tape for one symbol
pub struct MarketDataFeed {
    venue: Arc<dyn VenueApi>,
    monitor: Arc<RateLimitMonitor>,
    symbol: String,
    snapshots: UnboundedSender<MarketSnapshot>,
    trades: UnboundedSender<MarketTrade>,
    /// Set after the first trade poll completes. While `None`, incoming
    /// trades are a historical backfill.
    watermark: Mutex<Option<DateTime<Utc>>>,
}

impl MarketDataFeed {
    pub fn new(
        venue: Arc<dyn VenueApi>,
        monitor: Arc<RateLimitMonitor>,
        symbol: String,
        snapshots: UnboundedSender<MarketSnapshot>,
        trades: UnboundedSender<MarketTrade>,
    ) -> Self {
        MarketDataFeed {
            venue,
            monitor,
            symbol,
            snapshots,
            trades,
            watermark: Mutex::new(None),
        }
    }

    /// Fetch the order book and publish one full snapshot
    pub async fn poll_order_book(&self) -> Result<(), GatewayError> {
        self.monitor.record();
        let book = self.venue.fetch_order_book(&self.symbol).await?;
        self.on_order_book(&book);
        Ok(())
    }

    /// Fetch recent trades and publish them
    pub async fn poll_trades(&self) -> Result<(), GatewayError> {
        self.monitor.record();
        let trades = self.venue.fetch_trades(&self.symbol).await?;
        self.on_trades(&trades);
        Ok(())
    }

    fn on_order_book(&self, raw: &RawOrderBook) {
        let snapshot = MarketSnapshot::new(
            raw.bids.iter().map(to_level).collect(),
            raw.asks.iter().map(to_level).collect(),
            Utc::now(),
        );

        if self.snapshots.send(snapshot).is_err() {
            warn!("market snapshot receiver dropped");
        }
    }

    fn on_trades(&self, raw: &[RawTrade]) {
        // The historical flag is per batch, not per trade: only the very
        // first poll since gateway start is a backfill. Later batches may
        // still repeat trades at or before the watermark; deduplication is
        // the consumer's concern.
        let historical = self.watermark.lock().is_none();

        for trade in raw {
            let time = trade
                .transaction_time
                .parse::<i64>()
                .ok()
                .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
                .unwrap_or_else(Utc::now);

            let event = MarketTrade {
                price: trade.price,
                size: trade.quantity,
                time,
                side: decode_side(&trade.way),
                historical,
            };

            if self.trades.send(event).is_err() {
                warn!("market trade receiver dropped");
                break;
            }
        }

        *self.watermark.lock() = Some(Utc::now());
    }
}
