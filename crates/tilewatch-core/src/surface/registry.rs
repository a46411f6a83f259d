// ── Control surface set ──
//
// Every surface ever created, keyed by unique id. Nothing is ever
// removed: a tile that leaves the dataset keeps its surfaces, which
// simply report unavailable.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::ControlSurface;
use crate::model::{TileDataset, TileId};

#[derive(Default)]
pub struct SurfaceRegistry {
    by_unique_id: DashMap<String, Arc<ControlSurface>>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert surfaces, skipping any whose unique id is already taken.
    /// Returns only the surfaces that were actually added.
    pub fn register(
        &self,
        surfaces: impl IntoIterator<Item = ControlSurface>,
    ) -> Vec<Arc<ControlSurface>> {
        let mut added = Vec::new();
        for surface in surfaces {
            if let Entry::Vacant(slot) = self.by_unique_id.entry(surface.unique_id()) {
                let surface = Arc::new(surface);
                slot.insert(Arc::clone(&surface));
                added.push(surface);
            }
        }
        added
    }

    pub fn get(&self, unique_id: &str) -> Option<Arc<ControlSurface>> {
        self.by_unique_id.get(unique_id).map(|r| Arc::clone(r.value()))
    }

    /// Tiles that already have surfaces, derived from what is registered.
    pub fn tile_ids(&self) -> HashSet<TileId> {
        self.by_unique_id
            .iter()
            .filter_map(|r| r.value().tile_id().cloned())
            .collect()
    }

    pub fn surfaces_for(&self, id: &TileId) -> Vec<Arc<ControlSurface>> {
        self.by_unique_id
            .iter()
            .filter(|r| r.value().tile_id() == Some(id))
            .map(|r| Arc::clone(r.value()))
            .collect()
    }

    /// Surfaces whose tile is no longer in `dataset`. They stay
    /// registered; this only lets a host flag them.
    pub fn orphaned(&self, dataset: &TileDataset) -> Vec<Arc<ControlSurface>> {
        self.by_unique_id
            .iter()
            .filter(|r| r.value().tile_id().is_some_and(|id| !dataset.contains(id)))
            .map(|r| Arc::clone(r.value()))
            .collect()
    }

    pub fn all(&self) -> Vec<Arc<ControlSurface>> {
        self.by_unique_id.iter().map(|r| Arc::clone(r.value())).collect()
    }

    pub fn len(&self) -> usize {
        self.by_unique_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_unique_id.is_empty()
    }
}
