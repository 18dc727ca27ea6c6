use serde::{Deserialize, Serialize};

/// Market side, following the venue tape convention (bid/ask)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Bid,
    Ask,
    /// Venue reported a side tag the gateway does not recognize
    Unknown,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
            Side::Unknown => Side::Unknown,
        }
    }
}
