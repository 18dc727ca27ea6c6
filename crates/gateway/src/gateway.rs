//! Gatecoin gateway assembly
//!
//! Wires the venue client, rate monitor, polling scheduler, and the three
//! feeds into one gateway instance. Event plumbing is explicit: one typed
//! channel per stream, created here and handed to the trading core; the
//! polling loops live exactly as long as the gateway value.

use std::sync::Arc;
use std::time::Duration;

use hermes_core::ConnectivityStatus;
use log::{info, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::market_data::MarketDataFeed;
use crate::messages::{CancelOrder, MarketSnapshot, MarketTrade, OrderSubmission, OrderUpdate, PositionUpdate};
use crate::orders::OrderReconciler;
use crate::positions::PositionFeed;
use crate::precision::{resolve_symbol_precision, SymbolPrecision};
use crate::rate_limit::RateLimitMonitor;
use crate::scheduler::PollingScheduler;
use crate::venue::VenueApi;

pub const VENUE_NAME: &str = "Gatecoin";

/// REST poll cadences
const MARKET_DATA_INTERVAL: Duration = Duration::from_secs(5);
const TRADES_INTERVAL: Duration = Duration::from_secs(15);
const ORDER_STATUS_INTERVAL: Duration = Duration::from_secs(8);
const POSITIONS_INTERVAL: Duration = Duration::from_secs(15);

/// Observational rate-limit sizing for the venue's REST API
const RATE_LIMIT_MAX_REQUESTS: usize = 60;
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Static venue metadata exposed to the trading core
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VenueDetails {
    pub make_fee: Decimal,
    pub take_fee: Decimal,
    pub has_self_trade_prevention: bool,
    /// Minimum price movement, resolved from venue symbol metadata at startup
    pub min_tick_increment: Decimal,
}

impl VenueDetails {
    fn new(min_tick_increment: Decimal) -> Self {
        VenueDetails {
            make_fee: dec!(0.0025),
            take_fee: dec!(0.0035),
            has_self_trade_prevention: false,
            min_tick_increment,
        }
    }

    pub fn name(&self) -> &'static str {
        VENUE_NAME
    }
}

/// Receiving ends of the gateway's event streams, handed to the trading core
pub struct GatewayEvents {
    pub connectivity: UnboundedReceiver<ConnectivityStatus>,
    pub market_data: UnboundedReceiver<MarketSnapshot>,
    pub trades: UnboundedReceiver<MarketTrade>,
    pub order_updates: UnboundedReceiver<OrderUpdate>,
    pub positions: UnboundedReceiver<PositionUpdate>,
}

/// The assembled Gatecoin gateway
pub struct GatecoinGateway {
    details: VenueDetails,
    precision: SymbolPrecision,
    /// Present only when order entry is routed to this venue
    reconciler: Option<Arc<OrderReconciler>>,
    order_updates: UnboundedSender<OrderUpdate>,
    connectivity: UnboundedSender<ConnectivityStatus>,
    scheduler: PollingScheduler,
}

impl GatecoinGateway {
    /// Construct the gateway and start polling.
    ///
    /// Symbol precision is resolved first; a pair the venue does not list is
    /// fatal and nothing is started. Market-data, trade and position polls
    /// fire immediately; the order-status poll first fires after one
    /// interval.
    pub async fn connect(
        config: &GatewayConfig,
        venue: Arc<dyn VenueApi>,
    ) -> Result<(GatecoinGateway, GatewayEvents), GatewayError> {
        let symbol = config.pair.symbol();

        let precision = resolve_symbol_precision(venue.as_ref(), &symbol).await?;
        info!(
            "{}: resolved {} precision to {} digits (tick {})",
            VENUE_NAME, symbol, precision.precision, precision.tick_increment
        );

        let monitor = Arc::new(RateLimitMonitor::new(
            RATE_LIMIT_MAX_REQUESTS,
            RATE_LIMIT_WINDOW,
        ));

        let (connectivity_tx, connectivity_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = mpsc::unbounded_channel();
        let (trade_tx, trade_rx) = mpsc::unbounded_channel();
        let (order_tx, order_rx) = mpsc::unbounded_channel();
        let (position_tx, position_rx) = mpsc::unbounded_channel();

        let mut scheduler = PollingScheduler::new();

        let market_data = Arc::new(MarketDataFeed::new(
            venue.clone(),
            monitor.clone(),
            symbol.clone(),
            snapshot_tx,
            trade_tx,
        ));
        {
            let feed = market_data.clone();
            scheduler.register("market-data", MARKET_DATA_INTERVAL, true, move || {
                let feed = feed.clone();
                async move { feed.poll_order_book().await }
            });
        }
        {
            let feed = market_data;
            scheduler.register("trades", TRADES_INTERVAL, true, move || {
                let feed = feed.clone();
                async move { feed.poll_trades().await }
            });
        }

        let positions = Arc::new(PositionFeed::new(
            venue.clone(),
            monitor.clone(),
            position_tx,
        ));
        scheduler.register("positions", POSITIONS_INTERVAL, true, move || {
            let feed = positions.clone();
            async move { feed.poll_positions().await }
        });

        let reconciler = if config.order_entry_enabled() {
            let reconciler = Arc::new(OrderReconciler::new(
                venue,
                monitor,
                symbol,
                order_tx.clone(),
            ));
            let poller = reconciler.clone();
            scheduler.register("order-status", ORDER_STATUS_INTERVAL, false, move || {
                let poller = poller.clone();
                async move { poller.poll_order_statuses().await }
            });
            Some(reconciler)
        } else {
            info!(
                "{}: order entry routed to {:?}; submissions are rejected locally",
                VENUE_NAME, config.order_destination
            );
            None
        };

        // REST polling has no persistent connection to monitor; report
        // Connected once construction succeeded.
        let _ = connectivity_tx.send(ConnectivityStatus::Connected);

        let gateway = GatecoinGateway {
            details: VenueDetails::new(precision.tick_increment),
            precision,
            reconciler,
            order_updates: order_tx,
            connectivity: connectivity_tx,
            scheduler,
        };

        let events = GatewayEvents {
            connectivity: connectivity_rx,
            market_data: snapshot_rx,
            trades: trade_rx,
            order_updates: order_rx,
            positions: position_rx,
        };

        Ok((gateway, events))
    }

    pub fn details(&self) -> &VenueDetails {
        &self.details
    }

    pub fn precision(&self) -> SymbolPrecision {
        self.precision
    }

    /// Cancels must reference the venue-assigned order id
    pub fn cancels_by_client_order_id(&self) -> bool {
        false
    }

    pub fn supports_cancel_all_open_orders(&self) -> bool {
        false
    }

    pub fn generate_client_order_id(&self) -> String {
        OrderReconciler::generate_client_order_id()
    }

    /// Submit a limit order, if order entry is active for this venue
    pub async fn submit(&self, order: OrderSubmission) {
        match &self.reconciler {
            Some(reconciler) => reconciler.submit(order).await,
            None => self.reject_inactive(order.order_id),
        }
    }

    /// Cancel an order, if order entry is active for this venue
    pub async fn cancel(&self, cancel: CancelOrder) {
        match &self.reconciler {
            Some(reconciler) => {
                reconciler.cancel(cancel).await;
            }
            None => self.reject_inactive(cancel.order_id),
        }
    }

    /// Replace an order, if order entry is active for this venue
    pub async fn replace(&self, cancel: CancelOrder, replacement: OrderSubmission) {
        match &self.reconciler {
            Some(reconciler) => reconciler.replace(cancel, replacement).await,
            None => self.reject_inactive(replacement.order_id),
        }
    }

    /// Stop all polling and report the gateway as disconnected
    pub fn shutdown(self) {
        let _ = self.connectivity.send(ConnectivityStatus::Disconnected);
        drop(self.scheduler);
    }

    fn reject_inactive(&self, order_id: String) {
        warn!(
            "{}: order entry is not active for this venue, rejecting {} locally",
            VENUE_NAME, order_id
        );
        let _ = self.order_updates.send(OrderUpdate::rejected(
            order_id,
            "order entry is not active for this venue",
        ));
    }
}
