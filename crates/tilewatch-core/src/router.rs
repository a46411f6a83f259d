// ── Action routing ──
//
// Maps an (identity, action) pair onto the backend that performs it:
// the cloud for rings, the local radio for scans, the coordinator for
// refreshes. Every call re-reads the live dataset; nothing is cached.
// Failures are logged here and reported as an `ActionOutcome`; they
// never propagate as errors.

use std::sync::Arc;

use strum::{AsRefStr, Display, EnumIter};
use tracing::{debug, error, info, warn};

use crate::coordinator::Coordinator;
use crate::error::CoreError;
use crate::model::{DiscoveredDevice, TileId, TileSnapshot};
use crate::ports::{RadioScanner, TileCloud};

/// Per-tile action kinds. The fleet refresh is not tied to a tile and
/// has no kind of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Locate,
    Refresh,
    Scan,
}

/// What an action ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The backend call completed successfully.
    Completed,
    /// A scan heard the tile.
    Discovered(DiscoveredDevice),
    /// The backend was reached, or would have been, and the action failed.
    Failed,
    /// The tile vanished from the dataset; no backend call was made.
    Aborted,
}

/// Stateless dispatcher shared by every control surface.
pub struct ActionRouter {
    coordinator: Arc<dyn Coordinator>,
    cloud: Arc<dyn TileCloud>,
    radio: Arc<dyn RadioScanner>,
}

impl ActionRouter {
    pub fn new(
        coordinator: Arc<dyn Coordinator>,
        cloud: Arc<dyn TileCloud>,
        radio: Arc<dyn RadioScanner>,
    ) -> Self {
        Self {
            coordinator,
            cloud,
            radio,
        }
    }

    pub fn coordinator(&self) -> &Arc<dyn Coordinator> {
        &self.coordinator
    }

    /// Look a tile up in the current dataset.
    pub fn resolve(&self, id: &TileId) -> Result<Arc<TileSnapshot>, CoreError> {
        self.coordinator
            .dataset()
            .get(id)
            .ok_or_else(|| CoreError::TileNotFound {
                identifier: id.to_string(),
            })
    }

    /// Dispatch a per-tile action.
    pub async fn dispatch(&self, id: &TileId, kind: ActionKind, force_scan: bool) -> ActionOutcome {
        match kind {
            ActionKind::Locate => self.locate(id).await,
            ActionKind::Refresh => self.refresh(id).await,
            ActionKind::Scan => self.scan(id, force_scan).await,
        }
    }

    /// Ring a tile through the cloud.
    pub async fn locate(&self, id: &TileId) -> ActionOutcome {
        let tile = match self.resolve(id) {
            Ok(tile) => tile,
            Err(e) => {
                error!(tile = %id, error = %e, "cannot ring tile");
                return ActionOutcome::Aborted;
            }
        };

        let Some(auth_key) = tile.credential() else {
            let e = CoreError::MissingCredential {
                identifier: id.to_string(),
            };
            warn!(tile = %id, name = %tile.name, error = %e, "failed to ring tile");
            return ActionOutcome::Failed;
        };

        debug!(tile = %id, name = %tile.name, "ringing tile");
        match self.cloud.ring(id, auth_key).await {
            Ok(true) => ActionOutcome::Completed,
            Ok(false) => {
                warn!(tile = %id, name = %tile.name, "failed to ring tile");
                ActionOutcome::Failed
            }
            Err(e) => {
                warn!(tile = %id, name = %tile.name, error = %e, "failed to ring tile");
                ActionOutcome::Failed
            }
        }
    }

    /// Refresh on behalf of one tile. The cycle still covers the whole
    /// account; the tile only adds log context.
    pub async fn refresh(&self, id: &TileId) -> ActionOutcome {
        match self.resolve(id) {
            Ok(tile) => debug!(tile = %id, name = %tile.name, "refresh requested"),
            Err(_) => debug!(tile = %id, "refresh requested for unknown tile"),
        }
        self.coordinator.request_refresh().await;
        ActionOutcome::Completed
    }

    /// Refresh every tile on the account.
    pub async fn refresh_fleet(&self) -> ActionOutcome {
        debug!("fleet refresh requested");
        self.coordinator.request_refresh().await;
        ActionOutcome::Completed
    }

    /// Search the local radio for a tile's advertisement.
    pub async fn scan(&self, id: &TileId, force_scan: bool) -> ActionOutcome {
        let tile = match self.resolve(id) {
            Ok(tile) => tile,
            Err(e) => {
                error!(tile = %id, error = %e, "cannot scan for tile");
                return ActionOutcome::Aborted;
            }
        };

        debug!(tile = %id, name = %tile.name, force_scan, "scanning for tile");
        match self.radio.find_device(&tile.id, force_scan).await {
            Ok(Some(device)) => {
                info!(
                    tile = %id,
                    name = %tile.name,
                    address = %device.address,
                    rssi = ?device.rssi,
                    "found tile nearby"
                );
                ActionOutcome::Discovered(device)
            }
            Ok(None) => {
                warn!(tile = %id, name = %tile.name, "tile not found nearby");
                ActionOutcome::Failed
            }
            Err(e) => {
                warn!(tile = %id, name = %tile.name, error = %e, "tile scan failed");
                ActionOutcome::Failed
            }
        }
    }
}
