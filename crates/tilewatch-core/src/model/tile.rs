// ── Tile snapshot ──

use secrecy::{ExposeSecret, SecretString};

use super::tile_id::TileId;

/// Latest known attributes of one tile, as reported by one refresh.
///
/// Never mutated: the next refresh builds a new snapshot. The auth key is
/// what the cloud needs to ring the tile; a tile that has not finished
/// pairing has none.
#[derive(Debug, Clone)]
pub struct TileSnapshot {
    pub id: TileId,
    pub name: String,
    pub tile_type: Option<String>,
    pub firmware_version: Option<String>,
    pub hardware_version: Option<String>,
    pub auth_key: Option<SecretString>,
}

impl TileSnapshot {
    pub fn new(id: impl Into<TileId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tile_type: None,
            firmware_version: None,
            hardware_version: None,
            auth_key: None,
        }
    }

    pub fn with_auth_key(mut self, key: impl Into<String>) -> Self {
        self.auth_key = Some(SecretString::from(key.into()));
        self
    }

    pub fn with_tile_type(mut self, tile_type: impl Into<String>) -> Self {
        self.tile_type = Some(tile_type.into());
        self
    }

    pub fn with_versions(
        mut self,
        firmware: impl Into<String>,
        hardware: impl Into<String>,
    ) -> Self {
        self.firmware_version = Some(firmware.into());
        self.hardware_version = Some(hardware.into());
        self
    }

    /// The auth key, if present and non-empty.
    pub fn credential(&self) -> Option<&SecretString> {
        self.auth_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty())
    }

    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }
}

/// A tile heard over the local radio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDevice {
    pub address: String,
    /// Received signal strength in dBm, when the adapter reports it.
    pub rssi: Option<i16>,
}
