//! Periodic polling scheduler
//!
//! Each registered task runs on its own fixed cadence. Ticks are issued in
//! wall-clock order, but every tick spawns the fetch as its own task: a slow
//! fetch never delays the next tick, and overlapping invocations of the same
//! task are possible (at-least-once semantics). Completions may arrive out
//! of order relative to issuance.
//!
//! A failed fetch is logged and never stops subsequent invocations of that
//! or any other task. Dropping the scheduler aborts all polling loops.

use std::future::Future;
use std::time::Duration;

use log::{debug, warn};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::error::GatewayError;

#[derive(Default)]
pub struct PollingScheduler {
    tasks: Vec<JoinHandle<()>>,
}

impl PollingScheduler {
    pub fn new() -> Self {
        PollingScheduler { tasks: Vec::new() }
    }

    /// Register a periodic task. With `immediate` the first invocation fires
    /// right away, otherwise after one full `period`.
    pub fn register<F, Fut>(&mut self, name: &'static str, period: Duration, immediate: bool, fetch: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), GatewayError>> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let first_tick = if immediate {
                time::Instant::now()
            } else {
                time::Instant::now() + period
            };
            let mut interval = time::interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                debug!("poll tick: {}", name);

                let fut = fetch();
                tokio::spawn(async move {
                    if let Err(e) = fut.await {
                        warn!("{} poll failed: {}", name, e);
                    }
                });
            }
        });

        self.tasks.push(handle);
    }
}

impl Drop for PollingScheduler {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_immediate_task_fires_at_registration() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut scheduler = PollingScheduler::new();

        let counter = count.clone();
        scheduler.register("immediate", Duration::from_secs(5), true, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_task_waits_one_period() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut scheduler = PollingScheduler::new();

        let counter = count.clone();
        scheduler.register("delayed", Duration::from_secs(5), false, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_does_not_stop_the_cadence() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut scheduler = PollingScheduler::new();

        let counter = count.clone();
        scheduler.register("failing", Duration::from_secs(1), true, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(GatewayError::Venue("boom".into()))
            }
        });

        time::sleep(Duration::from_millis(3500)).await;
        assert!(count.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_fetch_does_not_delay_the_next_tick() {
        let started = Arc::new(AtomicUsize::new(0));
        let mut scheduler = PollingScheduler::new();

        let counter = started.clone();
        scheduler.register("slow", Duration::from_secs(1), true, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                // Far longer than the cadence
                time::sleep(Duration::from_secs(60)).await;
                Ok(())
            }
        });

        time::sleep(Duration::from_millis(3500)).await;
        // Overlapping invocations: ticks keep firing while earlier fetches
        // are still in flight
        assert!(started.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_polling() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut scheduler = PollingScheduler::new();

        let counter = count.clone();
        scheduler.register("aborted", Duration::from_secs(1), true, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        time::sleep(Duration::from_millis(1500)).await;
        drop(scheduler);
        let after_drop = count.load(Ordering::SeqCst);

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }
}
