//! Order entry and polling-driven lifecycle reconciliation
//!
//! The reconciler owns the gateway's view of open orders. There is no fill
//! stream from this venue: the periodic open-order poll is the only channel
//! through which fills and external cancellations become visible. An order
//! that disappears from the venue's open-order list is inferred `Complete` -
//! the venue gives no way to distinguish "filled" from "vanished", and the
//! reconciler deliberately does not guess.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use hermes_core::{OrderStatus, Side};
use log::{info, warn};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::error::GatewayError;
use crate::messages::{CancelOrder, OrderSubmission, OrderUpdate};
use crate::rate_limit::RateLimitMonitor;
use crate::venue::{VenueApi, VenueError, VenueOrder};

/// How long a replace waits for its cancel acknowledgment before assuming
/// the ack was lost and submitting the replacement anyway
const REPLACE_CANCEL_TIMEOUT: Duration = Duration::from_secs(5);

/// Locally tracked open order
#[derive(Debug, Clone)]
pub struct OrderRecord {
    /// Client-assigned id
    pub order_id: String,
    /// Venue-assigned id
    pub exchange_id: String,
    pub side: Side,
    pub price: Decimal,
    pub quantity: Decimal,
    pub leaves_quantity: Decimal,
    pub status: OrderStatus,
}

/// Outcome of a cancel request, used by replace to sequence the follow-up
/// submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Acknowledged,
    Rejected,
}

/// Decode the venue's order status text
fn decode_order_status(status: &str) -> OrderStatus {
    match status {
        "New" => OrderStatus::New,
        "Working" => OrderStatus::Working,
        _ => OrderStatus::Other,
    }
}

fn elapsed_ms(since: DateTime<Utc>) -> i64 {
    (Utc::now() - since).num_milliseconds()
}

/// Submits and cancels orders at the venue and reconciles local order state
/// against the venue's authoritative open-order list
pub struct OrderReconciler {
    venue: Arc<dyn VenueApi>,
    monitor: Arc<RateLimitMonitor>,
    symbol: String,
    updates: UnboundedSender<OrderUpdate>,
    /// Venue order id -> record. Holds only non-terminal orders; every key
    /// came back from a successful submit. The lock is never held across an
    /// await.
    open_orders: Mutex<HashMap<String, OrderRecord>>,
}

impl OrderReconciler {
    pub fn new(
        venue: Arc<dyn VenueApi>,
        monitor: Arc<RateLimitMonitor>,
        symbol: String,
        updates: UnboundedSender<OrderUpdate>,
    ) -> Self {
        OrderReconciler {
            venue,
            monitor,
            symbol,
            updates,
            open_orders: Mutex::new(HashMap::new()),
        }
    }

    /// Client order ids are generated gateway-side
    pub fn generate_client_order_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Venue ids of all currently tracked open orders
    pub fn open_exchange_ids(&self) -> Vec<String> {
        self.open_orders.lock().keys().cloned().collect()
    }

    /// Submit a limit order. A computational-latency update is emitted
    /// before the venue call; the result is reported as `New` (tracked from
    /// then on) or `Rejected` (never tracked).
    pub async fn submit(&self, order: OrderSubmission) {
        self.emit(OrderUpdate::latency(&order.order_id, elapsed_ms(order.time)));

        self.monitor.record();
        let ack = match order.side {
            Side::Bid => {
                self.venue
                    .create_limit_buy_order(&self.symbol, order.quantity, order.price)
                    .await
            }
            Side::Ask => {
                self.venue
                    .create_limit_sell_order(&self.symbol, order.quantity, order.price)
                    .await
            }
            Side::Unknown => Err(VenueError::new("cannot submit an order without a side")),
        };

        match ack {
            Ok(ack) => {
                info!("order accepted: {} -> {}", order.order_id, ack.id);
                self.open_orders.lock().insert(
                    ack.id.clone(),
                    OrderRecord {
                        order_id: order.order_id.clone(),
                        exchange_id: ack.id.clone(),
                        side: order.side,
                        price: order.price,
                        quantity: order.quantity,
                        leaves_quantity: order.quantity,
                        status: OrderStatus::New,
                    },
                );
                self.emit(OrderUpdate::accepted(order.order_id, ack.id));
            }
            Err(e) => {
                warn!("order rejected: {} - {}", order.order_id, e);
                self.emit(OrderUpdate::rejected(order.order_id, e.to_string()));
            }
        }
    }

    /// Cancel a tracked order by its venue id. On rejection the tracked
    /// entry is deliberately left in place: the order may or may not still
    /// be live at the venue, and the next reconciliation poll settles it.
    pub async fn cancel(&self, cancel: CancelOrder) -> CancelOutcome {
        self.emit(OrderUpdate::latency(&cancel.order_id, elapsed_ms(cancel.time)));

        self.monitor.record();
        match self.venue.cancel_order(&cancel.exchange_id).await {
            Ok(()) => {
                self.open_orders.lock().remove(&cancel.exchange_id);
                self.emit(OrderUpdate::cancelled(cancel.order_id));
                CancelOutcome::Acknowledged
            }
            Err(e) => {
                warn!("cancel rejected: {} - {}", cancel.order_id, e);
                self.emit(OrderUpdate::cancel_rejected(cancel.order_id, e.to_string()));
                CancelOutcome::Rejected
            }
        }
    }

    /// Replace an order: cancel, then submit the replacement, sequenced.
    ///
    /// The submit is issued only after the cancel resolves or the wait times
    /// out (the ack may merely be lost), so a stale order and its
    /// replacement never knowingly coexist. An explicit cancel rejection
    /// aborts the replace: the original order is still live and submitting
    /// the replacement would double the exposure.
    pub async fn replace(&self, cancel: CancelOrder, replacement: OrderSubmission) {
        let cancelled_id = cancel.exchange_id.clone();

        match tokio::time::timeout(REPLACE_CANCEL_TIMEOUT, self.cancel(cancel)).await {
            Ok(CancelOutcome::Acknowledged) => {}
            Ok(CancelOutcome::Rejected) => {
                warn!(
                    "replace aborted: cancel of {} was rejected, keeping the original order",
                    cancelled_id
                );
                return;
            }
            Err(_) => {
                warn!(
                    "replace: no cancel ack for {} within {:?}, submitting replacement anyway",
                    cancelled_id, REPLACE_CANCEL_TIMEOUT
                );
            }
        }

        self.submit(replacement).await;
    }

    /// Reconcile local state against the venue's open-order list
    pub async fn poll_order_statuses(&self) -> Result<(), GatewayError> {
        self.monitor.record();
        let venue_orders = self.venue.fetch_open_orders().await?;
        self.reconcile(&venue_orders);
        Ok(())
    }

    fn reconcile(&self, venue_orders: &[VenueOrder]) {
        let mut events = Vec::new();
        let mut seen = HashSet::new();

        {
            let mut open_orders = self.open_orders.lock();

            for venue_order in venue_orders.iter().filter(|o| o.code == self.symbol) {
                let Some(record) = open_orders.get_mut(&venue_order.order_id) else {
                    continue;
                };

                let status = decode_order_status(&venue_order.status_desc);
                let cum_quantity = venue_order.initial_quantity - venue_order.remaining_quantity;
                record.status = status;
                record.leaves_quantity = venue_order.remaining_quantity;
                seen.insert(venue_order.order_id.as_str());

                events.push(OrderUpdate::reconciled(
                    record.order_id.clone(),
                    record.exchange_id.clone(),
                    status,
                    cum_quantity,
                    venue_order.remaining_quantity,
                ));
            }

            // Every tracked order the venue no longer reports is done. The
            // poll cannot tell a fill from an order the venue stopped
            // reporting; both surface as Complete.
            let missing: Vec<String> = open_orders
                .keys()
                .filter(|id| !seen.contains(id.as_str()))
                .cloned()
                .collect();

            for exchange_id in missing {
                if let Some(record) = open_orders.remove(&exchange_id) {
                    info!("order no longer reported by venue, inferring complete: {}", exchange_id);
                    events.push(OrderUpdate::completed(record.order_id, exchange_id));
                }
            }
        }

        for event in events {
            self.emit(event);
        }
    }

    fn emit(&self, update: OrderUpdate) {
        if self.updates.send(update).is_err() {
            warn!("order update receiver dropped");
        }
    }
}
