//! Hermes Gatecoin Gateway
//!
//! Venue adapter for the Gatecoin exchange. Polls venue REST state on fixed
//! cadences, normalizes responses into the canonical market/order/position
//! model, and reconciles locally tracked orders against the venue's
//! authoritative open-order list.
//!
//! ## Architecture
//!
//! ```text
//! Gatecoin REST (behind VenueApi)
//!         │ polled on fixed cadences
//!    ┌────▼─────────────────────────────┐
//!    │ Gateway                          │
//!    │  market data  orders  positions  │
//!    └────┬─────────────────────────────┘
//!         │ typed event channels:
//!         │ snapshots, trades, order updates, positions, connectivity
//!    ┌────▼────┐
//!    │ Trading │
//!    │  Core   │
//!    └─────────┘
//! ```
//!
//! The venue wire protocol and authentication live behind the
//! [`venue::VenueApi`] trait; the trading core consumes the typed event
//! streams returned by [`gateway::GatecoinGateway::connect`].

pub mod config;
pub mod error;
pub mod gateway;
pub mod market_data;
pub mod messages;
pub mod orders;
pub mod positions;
pub mod precision;
pub mod rate_limit;
pub mod scheduler;
pub mod venue;

// Re-export commonly used types
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use gateway::{GatecoinGateway, GatewayEvents, VenueDetails, VENUE_NAME};
pub use messages::{
    market_data::{BookLevel, MarketSnapshot, MarketTrade},
    order::{CancelOrder, OrderSubmission, OrderUpdate},
    position::PositionUpdate,
};
pub use orders::{OrderReconciler, OrderRecord};
pub use precision::{resolve_symbol_precision, SymbolPrecision};
pub use rate_limit::RateLimitMonitor;
pub use scheduler::PollingScheduler;
