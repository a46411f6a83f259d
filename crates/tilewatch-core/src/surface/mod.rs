// ── Control surfaces ──
//
// One pressable handle per (tile, action kind), plus one account-wide
// refresh. Surfaces hold no tile state: name, grouping, and availability
// are read through to the live dataset on every call.

mod availability;
mod registry;

use std::sync::Arc;

pub use availability::{AvailabilityInputs, availability};
pub use registry::SurfaceRegistry;

use crate::model::{DeviceInfo, TileId};
use crate::router::{ActionKind, ActionRouter};

/// What a surface acts on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SurfaceTarget {
    Tile { id: TileId, kind: ActionKind },
    Fleet { account_id: String },
}

/// A persistent, pressable handle exposed to the host platform.
pub struct ControlSurface {
    target: SurfaceTarget,
    router: Arc<ActionRouter>,
    force_scan: bool,
}

impl ControlSurface {
    pub fn for_tile(
        id: TileId,
        kind: ActionKind,
        router: Arc<ActionRouter>,
        force_scan: bool,
    ) -> Self {
        Self {
            target: SurfaceTarget::Tile { id, kind },
            router,
            force_scan,
        }
    }

    pub fn fleet_refresh(account_id: impl Into<String>, router: Arc<ActionRouter>) -> Self {
        Self {
            target: SurfaceTarget::Fleet {
                account_id: account_id.into(),
            },
            router,
            force_scan: false,
        }
    }

    /// The locate, refresh, and scan surfaces for one tile.
    pub fn triple(id: &TileId, router: &Arc<ActionRouter>, force_scan: bool) -> [Self; 3] {
        [ActionKind::Locate, ActionKind::Refresh, ActionKind::Scan]
            .map(|kind| Self::for_tile(id.clone(), kind, Arc::clone(router), force_scan))
    }

    // ── Identity ─────────────────────────────────────────────────────

    pub fn target(&self) -> &SurfaceTarget {
        &self.target
    }

    pub fn tile_id(&self) -> Option<&TileId> {
        match &self.target {
            SurfaceTarget::Tile { id, .. } => Some(id),
            SurfaceTarget::Fleet { .. } => None,
        }
    }

    pub fn kind(&self) -> Option<ActionKind> {
        match &self.target {
            SurfaceTarget::Tile { kind, .. } => Some(*kind),
            SurfaceTarget::Fleet { .. } => None,
        }
    }

    /// Stable id used for registration and de-duplication.
    pub fn unique_id(&self) -> String {
        match &self.target {
            SurfaceTarget::Tile { id, kind } => format!("tile_{id}_{kind}"),
            SurfaceTarget::Fleet { account_id } => format!("tile_refresh_{account_id}"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self.kind() {
            Some(ActionKind::Locate) => "Locate",
            Some(ActionKind::Refresh) => "Refresh",
            Some(ActionKind::Scan) => "Scan",
            None => "Refresh Tiles",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self.kind() {
            Some(ActionKind::Locate) => "mdi:bell-ring",
            Some(ActionKind::Scan) => "mdi:bluetooth-audio",
            Some(ActionKind::Refresh) | None => "mdi:refresh",
        }
    }

    /// Device grouping, read from the current snapshot.
    pub fn device_info(&self) -> DeviceInfo {
        match &self.target {
            SurfaceTarget::Tile { id, .. } => self
                .router
                .coordinator()
                .dataset()
                .get(id)
                .map_or_else(
                    || DeviceInfo::for_missing_tile(id.as_str()),
                    |tile| DeviceInfo::for_tile(&tile),
                ),
            SurfaceTarget::Fleet { account_id } => DeviceInfo::for_account(account_id),
        }
    }

    // ── Behaviour ────────────────────────────────────────────────────

    /// Evaluated against the live dataset on every call.
    pub fn is_available(&self) -> bool {
        match &self.target {
            SurfaceTarget::Tile { id, kind } => {
                let dataset = self.router.coordinator().dataset();
                availability(*kind, AvailabilityInputs::read(&dataset, id))
            }
            SurfaceTarget::Fleet { .. } => true,
        }
    }

    /// Run the surface's action to completion. Results are visible only
    /// through logs and the dataset.
    pub async fn press(&self) {
        match &self.target {
            SurfaceTarget::Tile { id, kind } => {
                self.router.dispatch(id, *kind, self.force_scan).await;
            }
            SurfaceTarget::Fleet { .. } => {
                self.router.refresh_fleet().await;
            }
        }
    }
}

impl std::fmt::Debug for ControlSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlSurface")
            .field("unique_id", &self.unique_id())
            .field("force_scan", &self.force_scan)
            .finish_non_exhaustive()
    }
}
