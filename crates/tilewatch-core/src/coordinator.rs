// ── Polling coordinator ──
//
// Owns the tile dataset and refreshes it on a schedule or on demand.
// The rest of the core only sees the `Coordinator` trait, so an
// embedding application may substitute its own polling engine.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::TrackerConfig;
use crate::error::CoreError;
use crate::model::TileDataset;
use crate::ports::TileSource;
use crate::store::DatasetStore;

/// Read side and refresh trigger of a polling engine.
#[async_trait]
pub trait Coordinator: Send + Sync {
    /// The dataset installed by the most recent completed cycle.
    fn dataset(&self) -> Arc<TileDataset>;

    /// Bumped after every completed refresh cycle, success or failure.
    fn subscribe(&self) -> watch::Receiver<u64>;

    /// Run a refresh cycle now, outside the schedule. Returns once the
    /// cycle has completed; failures are reflected in the dataset.
    async fn request_refresh(&self);
}

// ── TileCoordinator ──────────────────────────────────────────────

/// Default coordinator: polls a [`TileSource`] into a [`DatasetStore`].
///
/// Cheaply cloneable. Refresh cycles are serialised so that two
/// overlapping requests never interleave their installs.
#[derive(Clone)]
pub struct TileCoordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    source: Arc<dyn TileSource>,
    store: DatasetStore,
    refresh_interval: Duration,
    cycle: Mutex<()>,
}

impl TileCoordinator {
    pub fn new(source: Arc<dyn TileSource>, config: &TrackerConfig) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                source,
                store: DatasetStore::new(),
                refresh_interval: config.refresh_interval,
                cycle: Mutex::new(()),
            }),
        }
    }

    pub fn store(&self) -> &DatasetStore {
        &self.inner.store
    }

    /// Fetch every tile on the account and install the result.
    ///
    /// On failure the previous tiles stay in place with the success flag
    /// cleared, and the error is returned to the caller.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let _cycle = self.inner.cycle.lock().await;

        match self.inner.source.fetch_tiles().await {
            Ok(tiles) => {
                let count = tiles.len();
                self.inner.store.install(tiles);
                debug!(tiles = count, "tile refresh complete");
                Ok(())
            }
            Err(e) => {
                self.inner.store.mark_failed();
                warn!(error = %e, "tile refresh failed");
                Err(CoreError::Refresh {
                    message: e.to_string(),
                })
            }
        }
    }

    /// Spawn the periodic refresh loop. Returns `None` when polling is
    /// disabled by a zero interval.
    pub fn spawn_polling(&self, cancel: CancellationToken) -> Option<JoinHandle<()>> {
        let interval = self.inner.refresh_interval;
        if interval.is_zero() {
            debug!("periodic refresh disabled");
            return None;
        }
        Some(tokio::spawn(polling_task(self.clone(), interval, cancel)))
    }
}

#[async_trait]
impl Coordinator for TileCoordinator {
    fn dataset(&self) -> Arc<TileDataset> {
        self.inner.store.current()
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.store.subscribe()
    }

    async fn request_refresh(&self) {
        // Already logged and reflected into the dataset.
        let _ = self.refresh().await;
    }
}

// ── Background task ──────────────────────────────────────────────

async fn polling_task(coordinator: TileCoordinator, interval: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let _ = coordinator.refresh().await;
            }
        }
    }
    debug!("periodic refresh stopped");
}
