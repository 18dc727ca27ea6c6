//! Gateway configuration

use std::fs;
use std::path::Path;

use hermes_core::CurrencyPair;
use serde::Deserialize;

use crate::error::GatewayError;
use crate::gateway::VENUE_NAME;

/// Configuration consumed by the Gatecoin gateway
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// API credentials handed to the venue client
    pub api_key: String,
    pub api_secret: String,
    /// Venue name that order entry is routed to. Order submission through
    /// this gateway is only active when it selects Gatecoin.
    pub order_destination: String,
    /// The trading pair this gateway instance serves
    pub pair: CurrencyPair,
}

impl GatewayConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let raw = fs::read_to_string(path).map_err(|e| GatewayError::Config(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| GatewayError::Config(e.to_string()))
    }

    /// True when order entry is active for this venue
    pub fn order_entry_enabled(&self) -> bool {
        self.order_destination == VENUE_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let raw = r#"{
            "api_key": "key",
            "api_secret": "secret",
            "order_destination": "Gatecoin",
            "pair": { "base": "BTC", "quote": "USD" }
        }"#;

        let config: GatewayConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.pair.symbol(), "BTCUSD");
        assert!(config.order_entry_enabled());
    }

    #[test]
    fn test_order_entry_routed_elsewhere() {
        let raw = r#"{
            "api_key": "key",
            "api_secret": "secret",
            "order_destination": "Null",
            "pair": { "base": "BTC", "quote": "USD" }
        }"#;

        let config: GatewayConfig = serde_json::from_str(raw).unwrap();
        assert!(!config.order_entry_enabled());
    }
}
