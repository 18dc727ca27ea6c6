//! Error types for the gateway crate

use thiserror::Error;

use crate::venue::VenueError;

/// Gateway-level errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Venue request failed: {0}")]
    Venue(String),

    #[error("Cannot match pair to a venue symbol: {0}")]
    SymbolNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<VenueError> for GatewayError {
    fn from(e: VenueError) -> Self {
        GatewayError::Venue(e.to_string())
    }
}
