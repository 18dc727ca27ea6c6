use serde::{Deserialize, Serialize};

/// Connectivity of a venue gateway as seen by the trading core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectivityStatus {
    Connected,
    Disconnected,
}
