// ── Device grouping metadata ──
//
// What the hosting platform needs to group surfaces under one device
// card. Mirrors the fields a home-automation device registry expects.

use serde::Serialize;

use super::tile::TileSnapshot;
use super::{DOMAIN, MANUFACTURER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceEntryType {
    /// A logical device (the account) rather than a physical one.
    Service,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// `(domain, id)` pairs identifying the device.
    pub identifiers: Vec<(String, String)>,
    pub name: String,
    pub manufacturer: String,
    pub model: Option<String>,
    pub sw_version: Option<String>,
    pub hw_version: Option<String>,
    pub entry_type: Option<DeviceEntryType>,
}

impl DeviceInfo {
    /// Grouping for a physical tile.
    pub fn for_tile(tile: &TileSnapshot) -> Self {
        Self {
            identifiers: vec![(DOMAIN.into(), tile.id.to_string())],
            name: tile.name.clone(),
            manufacturer: MANUFACTURER.into(),
            model: tile.tile_type.clone(),
            sw_version: tile.firmware_version.clone(),
            hw_version: tile.hardware_version.clone(),
            entry_type: None,
        }
    }

    /// Grouping for a tile that is no longer in the dataset.
    pub fn for_missing_tile(id: &str) -> Self {
        Self {
            identifiers: vec![(DOMAIN.into(), id.into())],
            name: id.into(),
            manufacturer: MANUFACTURER.into(),
            model: None,
            sw_version: None,
            hw_version: None,
            entry_type: None,
        }
    }

    /// Grouping for the account-wide service device.
    pub fn for_account(account_id: &str) -> Self {
        Self {
            identifiers: vec![(DOMAIN.into(), account_id.into())],
            name: "Tile Tracker".into(),
            manufacturer: MANUFACTURER.into(),
            model: Some("Tile Account".into()),
            sw_version: None,
            hw_version: None,
            entry_type: Some(DeviceEntryType::Service),
        }
    }
}
