//! Order entry and order status event types

use chrono::{DateTime, Utc};
use hermes_core::{OrderStatus, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Limit order submission from the trading core
#[derive(Debug, Clone)]
pub struct OrderSubmission {
    /// Client-assigned order id for correlation
    pub order_id: String,
    pub side: Side,
    pub price: Decimal,
    pub quantity: Decimal,
    /// When the trading core created the order; drives the latency update
    pub time: DateTime<Utc>,
}

impl OrderSubmission {
    pub fn new(
        order_id: impl Into<String>,
        side: Side,
        price: Decimal,
        quantity: Decimal,
        time: DateTime<Utc>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            side,
            price,
            quantity,
            time,
        }
    }
}

/// Cancel request from the trading core. Cancels reference the
/// venue-assigned id.
#[derive(Debug, Clone)]
pub struct CancelOrder {
    pub order_id: String,
    pub exchange_id: String,
    /// When the trading core requested the cancel; drives the latency update
    pub time: DateTime<Utc>,
}

impl CancelOrder {
    pub fn new(
        order_id: impl Into<String>,
        exchange_id: impl Into<String>,
        time: DateTime<Utc>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            exchange_id: exchange_id.into(),
            time,
        }
    }
}

/// Order status update emitted to the trading core.
///
/// Field presence mirrors what the triggering event actually knows: a
/// latency update carries only the latency, a reconciliation update carries
/// quantities, a rejection carries the venue's message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    /// Client-assigned order id
    pub order_id: String,
    /// Venue-assigned order id, once known
    pub exchange_id: Option<String>,
    pub status: Option<OrderStatus>,
    /// Venue failure message for rejections
    pub reject_message: Option<String>,
    /// Set when a cancel (rather than a submit) was rejected
    pub cancel_rejected: bool,
    /// Cumulative filled quantity (initial minus remaining)
    pub cum_quantity: Option<Decimal>,
    /// Quantity still open at the venue
    pub leaves_quantity: Option<Decimal>,
    /// Milliseconds between the trading core creating the request and the
    /// gateway dispatching it
    pub computational_latency_ms: Option<i64>,
    pub time: DateTime<Utc>,
}

impl OrderUpdate {
    fn base(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            exchange_id: None,
            status: None,
            reject_message: None,
            cancel_rejected: false,
            cum_quantity: None,
            leaves_quantity: None,
            computational_latency_ms: None,
            time: Utc::now(),
        }
    }

    /// Local computational-latency update, emitted before the venue call
    pub fn latency(order_id: impl Into<String>, latency_ms: i64) -> Self {
        Self {
            computational_latency_ms: Some(latency_ms),
            ..Self::base(order_id)
        }
    }

    /// Submit acknowledged by the venue
    pub fn accepted(order_id: impl Into<String>, exchange_id: impl Into<String>) -> Self {
        Self {
            exchange_id: Some(exchange_id.into()),
            status: Some(OrderStatus::New),
            ..Self::base(order_id)
        }
    }

    /// Submit rejected by the venue
    pub fn rejected(order_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: Some(OrderStatus::Rejected),
            reject_message: Some(message.into()),
            ..Self::base(order_id)
        }
    }

    /// Cancel rejected by the venue
    pub fn cancel_rejected(order_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            cancel_rejected: true,
            ..Self::rejected(order_id, message)
        }
    }

    /// Cancel acknowledged by the venue
    pub fn cancelled(order_id: impl Into<String>) -> Self {
        Self {
            status: Some(OrderStatus::Cancelled),
            ..Self::base(order_id)
        }
    }

    /// State decoded from the venue's open-order list during reconciliation
    pub fn reconciled(
        order_id: impl Into<String>,
        exchange_id: impl Into<String>,
        status: OrderStatus,
        cum_quantity: Decimal,
        leaves_quantity: Decimal,
    ) -> Self {
        Self {
            exchange_id: Some(exchange_id.into()),
            status: Some(status),
            cum_quantity: Some(cum_quantity),
            leaves_quantity: Some(leaves_quantity),
            ..Self::base(order_id)
        }
    }

    /// Terminal update for an order the venue stopped reporting
    pub fn completed(order_id: impl Into<String>, exchange_id: impl Into<String>) -> Self {
        Self {
            exchange_id: Some(exchange_id.into()),
            status: Some(OrderStatus::Complete),
            ..Self::base(order_id)
        }
    }

    /// True when no further updates are expected for this order
    pub fn is_terminal(&self) -> bool {
        self.status.is_some_and(|s| s.is_terminal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_latency_update_carries_only_latency() {
        let update = OrderUpdate::latency("ord-1", 12);
        assert_eq!(update.computational_latency_ms, Some(12));
        assert!(update.status.is_none());
        assert!(update.exchange_id.is_none());
        assert!(!update.is_terminal());
    }

    #[test]
    fn test_cancel_rejected_sets_flag_and_message() {
        let update = OrderUpdate::cancel_rejected("ord-1", "order not found");
        assert!(update.cancel_rejected);
        assert_eq!(update.status, Some(OrderStatus::Rejected));
        assert_eq!(update.reject_message.as_deref(), Some("order not found"));
        assert!(update.is_terminal());
    }

    #[test]
    fn test_reconciled_update() {
        let update = OrderUpdate::reconciled("ord-1", "ex-9", OrderStatus::Working, dec!(6), dec!(4));
        assert_eq!(update.cum_quantity, Some(dec!(6)));
        assert_eq!(update.leaves_quantity, Some(dec!(4)));
        assert!(!update.is_terminal());
    }
}
