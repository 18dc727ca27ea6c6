//! Balance polling and position normalization
//!
//! Emits one [`PositionUpdate`] per currency on every balance poll. Full
//! replace each cycle: no delta computation and no state retained here; a
//! failed fetch is logged by the scheduler and the consumer keeps whatever
//! it last cached.

use std::sync::Arc;

use log::warn;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::GatewayError;
use crate::messages::PositionUpdate;
use crate::rate_limit::RateLimitMonitor;
use crate::venue::VenueApi;

/// Polls venue balances and publishes position updates
pub struct PositionFeed {
    venue: Arc<dyn VenueApi>,
    monitor: Arc<RateLimitMonitor>,
    positions: UnboundedSender<PositionUpdate>,
}

impl PositionFeed {
    pub fn new(
        venue: Arc<dyn VenueApi>,
        monitor: Arc<RateLimitMonitor>,
        positions: UnboundedSender<PositionUpdate>,
    ) -> Self {
        PositionFeed {
            venue,
            monitor,
            positions,
        }
    }

    /// Fetch balances for all tracked currencies and emit one update each
    pub async fn poll_positions(&self) -> Result<(), GatewayError> {
        self.monitor.record();
        let balances = self.venue.fetch_balance().await?;

        for (currency, balance) in balances {
            let update = PositionUpdate::new(currency, balance.total, balance.used);
            if self.positions.send(update).is_err() {
                warn!("position receiver dropped");
                break;
            }
        }

        Ok(())
    }
}
