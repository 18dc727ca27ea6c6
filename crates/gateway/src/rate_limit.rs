//! Sliding-window request-rate monitor
//!
//! Observational safety net, not a limiter: it detects and logs overruns but
//! never delays or rejects a request. Callers invoke
//! [`RateLimitMonitor::record`] themselves around each outbound venue
//! request.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::error;
use parking_lot::Mutex;

/// Tracks request timestamps over a trailing window and reports overruns
pub struct RateLimitMonitor {
    max_requests: usize,
    window: Duration,
    /// Oldest-first; every retained entry is within the trailing window
    timestamps: Mutex<VecDeque<Instant>>,
}

impl RateLimitMonitor {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        RateLimitMonitor {
            max_requests,
            window,
            timestamps: Mutex::new(VecDeque::new()),
        }
    }

    /// Record one outbound request at the current instant
    pub fn record(&self) {
        self.record_at(Instant::now());
    }

    /// Record one outbound request at `now`. Evicts entries older than the
    /// trailing window, then returns true (and logs) when the retained count
    /// exceeds the configured maximum.
    pub fn record_at(&self, now: Instant) -> bool {
        let mut timestamps = self.timestamps.lock();

        while let Some(oldest) = timestamps.front() {
            if now.duration_since(*oldest) > self.window {
                timestamps.pop_front();
            } else {
                break;
            }
        }

        timestamps.push_back(now);

        if timestamps.len() > self.max_requests {
            error!(
                "Exceeded rate limit: {} requests in the last {:?} (max {})",
                timestamps.len(),
                self.window,
                self.max_requests
            );
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.timestamps.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retains_only_timestamps_inside_window() {
        let monitor = RateLimitMonitor::new(10, Duration::from_secs(60));
        let base = Instant::now();

        monitor.record_at(base);
        monitor.record_at(base + Duration::from_secs(30));
        monitor.record_at(base + Duration::from_secs(61));

        // The first entry is 61s old and falls out of the window
        assert_eq!(monitor.len(), 2);
    }

    #[test]
    fn test_timestamp_exactly_at_window_edge_is_retained() {
        let monitor = RateLimitMonitor::new(10, Duration::from_secs(60));
        let base = Instant::now();

        monitor.record_at(base);
        monitor.record_at(base + Duration::from_secs(60));

        assert_eq!(monitor.len(), 2);
    }

    #[test]
    fn test_overrun_fires_iff_count_exceeds_max() {
        let monitor = RateLimitMonitor::new(2, Duration::from_secs(60));
        let base = Instant::now();

        assert!(!monitor.record_at(base));
        assert!(!monitor.record_at(base + Duration::from_secs(1)));
        assert!(monitor.record_at(base + Duration::from_secs(2)));
    }

    #[test]
    fn test_eviction_clears_the_overrun() {
        let monitor = RateLimitMonitor::new(2, Duration::from_secs(10));
        let base = Instant::now();

        monitor.record_at(base);
        monitor.record_at(base + Duration::from_secs(1));
        assert!(monitor.record_at(base + Duration::from_secs(2)));

        // All earlier entries have aged out by now
        assert!(!monitor.record_at(base + Duration::from_secs(30)));
        assert_eq!(monitor.len(), 1);
    }
}
