//! Hermes Core Domain
//!
//! Pure domain types shared by the Hermes venue adapters.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{ConnectivityStatus, Currency, CurrencyPair, OrderStatus, Side};
pub use values::{Price, Quantity, Timestamp};
