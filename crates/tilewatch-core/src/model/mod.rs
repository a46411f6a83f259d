// ── Domain model ──
//
// Tile identities, per-refresh snapshots, and the dataset that maps one
// to the other. Everything here is immutable once built.

mod dataset;
mod device_info;
mod tile;
mod tile_id;

pub use dataset::TileDataset;
pub use device_info::{DeviceEntryType, DeviceInfo};
pub use tile::{DiscoveredDevice, TileSnapshot};
pub use tile_id::TileId;

/// Integration domain used in device identifiers.
pub const DOMAIN: &str = "tile_tracker";

/// Attribution shown alongside every surface.
pub const ATTRIBUTION: &str = "Data provided by Tile";

/// Manufacturer reported for every tile and for the account device.
pub const MANUFACTURER: &str = "Tile";
