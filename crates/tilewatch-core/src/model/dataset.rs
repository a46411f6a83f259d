// ── Tile dataset ──
//
// One refresh cycle's view of the account: every known tile keyed by id,
// plus whether that cycle succeeded. A failed cycle keeps the previous
// map and only clears the flag.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::tile::TileSnapshot;
use super::tile_id::TileId;

/// Immutable mapping of tile id to its latest snapshot.
///
/// Cheap to clone: the map itself sits behind an `Arc` so a failed refresh
/// can republish it without copying.
#[derive(Debug, Clone, Default)]
pub struct TileDataset {
    tiles: Arc<HashMap<TileId, Arc<TileSnapshot>>>,
    refresh_ok: bool,
    refreshed_at: Option<DateTime<Utc>>,
}

impl TileDataset {
    /// Build the dataset a successful refresh produces.
    pub fn from_tiles(tiles: impl IntoIterator<Item = TileSnapshot>, at: DateTime<Utc>) -> Self {
        let tiles: HashMap<TileId, Arc<TileSnapshot>> = tiles
            .into_iter()
            .map(|tile| (tile.id.clone(), Arc::new(tile)))
            .collect();
        Self {
            tiles: Arc::new(tiles),
            refresh_ok: true,
            refreshed_at: Some(at),
        }
    }

    /// The same tiles, marked as coming from a failed refresh.
    pub fn stale(&self) -> Self {
        Self {
            tiles: Arc::clone(&self.tiles),
            refresh_ok: false,
            refreshed_at: self.refreshed_at,
        }
    }

    pub fn get(&self, id: &TileId) -> Option<Arc<TileSnapshot>> {
        self.tiles.get(id).cloned()
    }

    pub fn contains(&self, id: &TileId) -> bool {
        self.tiles.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &TileId> {
        self.tiles.keys()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Arc<TileSnapshot>> {
        self.tiles.values()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether the refresh that produced this dataset succeeded.
    pub fn refresh_ok(&self) -> bool {
        self.refresh_ok
    }

    /// Time of the last successful refresh, carried across failures.
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }
}
