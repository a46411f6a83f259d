// ── Swap-on-refresh dataset store ──
//
// Readers load an `Arc<TileDataset>` without locking; each refresh
// installs a whole new dataset in one atomic swap. Every completed
// cycle, successful or not, bumps a generation counter on a `watch`
// channel so subscribers can react.

use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::Utc;
use tokio::sync::watch;

use crate::model::{TileDataset, TileId, TileSnapshot};

/// Current dataset plus change notification.
pub struct DatasetStore {
    current: ArcSwap<TileDataset>,
    generation: watch::Sender<u64>,
}

impl DatasetStore {
    pub fn new() -> Self {
        let (generation, _) = watch::channel(0u64);
        Self {
            current: ArcSwap::from_pointee(TileDataset::default()),
            generation,
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// The dataset as of now. Stays valid after later refreshes.
    pub fn current(&self) -> Arc<TileDataset> {
        self.current.load_full()
    }

    pub fn get(&self, id: &TileId) -> Option<Arc<TileSnapshot>> {
        self.current.load().get(id)
    }

    pub fn refresh_ok(&self) -> bool {
        self.current.load().refresh_ok()
    }

    /// Number of completed refresh cycles.
    pub fn generation(&self) -> u64 {
        *self.generation.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Replace the dataset with the result of a successful refresh.
    pub fn install(&self, tiles: Vec<TileSnapshot>) {
        let dataset = TileDataset::from_tiles(tiles, Utc::now());
        self.current.store(Arc::new(dataset));
        self.bump();
    }

    /// Record a failed refresh. The previous tiles stay readable.
    pub fn mark_failed(&self) {
        let stale = self.current.load().stale();
        self.current.store(Arc::new(stale));
        self.bump();
    }

    fn bump(&self) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.generation.send_modify(|g| *g += 1);
    }
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new()
    }
}
