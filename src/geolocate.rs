//! Geolocation provider seam and background position watcher.
//!
//! The platform capability (browser geolocation, OS location services, a
//! GPS daemon) sits behind [`GeolocationProvider`]. A missing capability is
//! expressed as `None` fixes and degrades to silence, never to an error.

use crate::core::geo::LngLat;
use async_trait::async_trait;
use crossbeam_channel::{unbounded, Receiver};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A geolocation fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub lng: f64,
    pub lat: f64,
    /// Reported accuracy radius in meters, when the platform provides one
    pub accuracy: Option<f64>,
}

impl Position {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self {
            lng,
            lat,
            accuracy: None,
        }
    }

    /// Gets the fix as a coordinate
    pub fn lng_lat(&self) -> LngLat {
        LngLat::new(self.lng, self.lat)
    }
}

/// Access to the platform's geolocation capability
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Gets the current position, or `None` when no fix is available
    async fn current_position(&self) -> Option<Position>;
}

/// Periodic geolocation poll tied to the controller's lifetime.
///
/// The first poll fires immediately on spawn, covering the initial "where
/// is the user" read; later polls follow the configured interval. The
/// watcher stops on [`stop`](Self::stop) and when dropped.
pub struct GeolocationWatcher {
    shutdown: Arc<AtomicBool>,
    handle: tokio::task::JoinHandle<()>,
}

impl GeolocationWatcher {
    /// Spawns the poll task. Must be called within a tokio runtime.
    ///
    /// Fixes are delivered on the returned channel; the host pumps them
    /// into the controller on its own execution context, so slot and store
    /// writes stay single-threaded.
    pub fn spawn(
        provider: Arc<dyn GeolocationProvider>,
        interval: Duration,
    ) -> (Self, Receiver<Position>) {
        let (tx, rx) = unbounded();
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = shutdown.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                if let Some(position) = provider.current_position().await {
                    log::trace!("geolocation fix at ({}, {})", position.lng, position.lat);
                    if tx.send(position).is_err() {
                        // Receiver gone, nobody left to deliver to
                        break;
                    }
                }
            }
        });

        (Self { shutdown, handle }, rx)
    }

    /// Stops the poll task
    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.handle.abort();
    }

    /// Checks whether the watcher has been stopped
    pub fn is_stopped(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst) || self.handle.is_finished()
    }
}

impl Drop for GeolocationWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
