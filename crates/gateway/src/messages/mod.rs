//! Outbound domain events consumed by the trading core

pub mod market_data;
pub mod order;
pub mod position;

pub use market_data::{BookLevel, MarketSnapshot, MarketTrade};
pub use order::{CancelOrder, OrderSubmission, OrderUpdate};
pub use position::PositionUpdate;
