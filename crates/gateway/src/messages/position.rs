//! Position event types

use chrono::{DateTime, Utc};
use hermes_core::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Position for one currency, rebuilt in full on every balance poll
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub currency: Currency,
    /// Total amount held at the venue
    pub amount: Decimal,
    /// Portion locked by resting orders
    pub held: Decimal,
    pub time: DateTime<Utc>,
}

impl PositionUpdate {
    pub fn new(currency: impl Into<Currency>, amount: Decimal, held: Decimal) -> Self {
        Self {
            currency: currency.into(),
            amount,
            held,
            time: Utc::now(),
        }
    }

    /// Amount not locked by resting orders
    pub fn available(&self) -> Decimal {
        self.amount - self.held
    }
}
