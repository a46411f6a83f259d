//! Tile registry reconciliation and action dispatch.
//!
//! Sits between a periodically refreshed account dataset and the set of
//! pressable per-tile handles a host platform exposes:
//!
//! - **[`TileCoordinator`]** polls a [`TileSource`] into a lock-free
//!   [`DatasetStore`] and announces every completed cycle on a `watch`
//!   channel.
//!
//! - **[`ActionRouter`]** resolves a tile in the live dataset and routes
//!   rings to the [`TileCloud`], scans to the [`RadioScanner`], and
//!   refreshes to the [`Coordinator`]. Failures are logged, never raised.
//!
//! - **[`ControlSurface`]** is one pressable handle per tile and action
//!   kind, plus one fleet-wide refresh. Availability is re-evaluated
//!   against the dataset on every query.
//!
//! - **[`Reconciler`]** creates surfaces for newly seen tiles and hands
//!   them to the host's [`SurfaceSink`]. Surfaces are never removed.
//!
//! - **[`Tracker`]** wires the above together and owns the background
//!   tasks.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod model;
pub mod ports;
pub mod reconciler;
pub mod router;
pub mod store;
pub mod surface;
pub mod tracker;

#[cfg(test)]
mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::TrackerConfig;
pub use coordinator::{Coordinator, TileCoordinator};
pub use error::CoreError;
pub use model::{DeviceEntryType, DeviceInfo, DiscoveredDevice, TileDataset, TileId, TileSnapshot};
pub use ports::{RadioScanner, SurfaceSink, TileCloud, TileSource};
pub use reconciler::Reconciler;
pub use router::{ActionKind, ActionOutcome, ActionRouter};
pub use store::DatasetStore;
pub use surface::{
    AvailabilityInputs, ControlSurface, SurfaceRegistry, SurfaceTarget, availability,
};
pub use tracker::Tracker;
