// ── Availability policy ──
//
// A single rule decides whether a surface can be pressed. Surfaces feed
// it the three facts read from the live dataset.

use crate::model::{TileDataset, TileId};
use crate::router::ActionKind;

/// Facts about one tile in the current dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AvailabilityInputs {
    /// The last refresh cycle succeeded.
    pub refresh_ok: bool,
    /// The tile is present in the dataset.
    pub known: bool,
    /// The tile carries a non-empty auth key.
    pub has_credential: bool,
}

impl AvailabilityInputs {
    pub fn read(dataset: &TileDataset, id: &TileId) -> Self {
        let tile = dataset.get(id);
        Self {
            refresh_ok: dataset.refresh_ok(),
            known: tile.is_some(),
            has_credential: tile.is_some_and(|t| t.has_credential()),
        }
    }
}

/// Whether a per-tile surface of `kind` is actionable. Rings need the
/// auth key; refreshes and local scans do not.
pub fn availability(kind: ActionKind, inputs: AvailabilityInputs) -> bool {
    let reachable = inputs.refresh_ok && inputs.known;
    match kind {
        ActionKind::Locate => reachable && inputs.has_credential,
        ActionKind::Refresh | ActionKind::Scan => reachable,
    }
}
