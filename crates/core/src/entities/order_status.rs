use serde::{Deserialize, Serialize};

/// Order lifecycle status as tracked by a venue gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Created locally, optimistically, before the venue acknowledged it
    Submitted,
    /// Acknowledged by the venue but not yet on the book
    New,
    /// Live on the venue's book
    Working,
    /// Cancelled on request
    Cancelled,
    /// Submit or cancel was rejected by the venue
    Rejected,
    /// The venue stopped reporting the order. With a polling-only feed this
    /// cannot be told apart from a fill, so both surface as Complete.
    Complete,
    /// Venue reported a status the gateway does not map
    Other,
}

impl OrderStatus {
    /// Returns true if the order is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Cancelled | OrderStatus::Rejected | OrderStatus::Complete
        )
    }

    /// Returns true if the order is still live at the venue
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            OrderStatus::Submitted | OrderStatus::New | OrderStatus::Working
        )
    }
}
