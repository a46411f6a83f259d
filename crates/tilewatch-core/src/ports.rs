// ── External collaborator ports ──
//
// The core never talks to the network, the radio, or the host platform
// directly. Each collaborator is a trait the embedding application
// implements; tests supply in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::CoreError;
use crate::model::{DiscoveredDevice, TileId, TileSnapshot};
use crate::surface::ControlSurface;

/// Authenticated Tile cloud API.
#[async_trait]
pub trait TileCloud: Send + Sync {
    /// Ask the cloud to ring a tile. `Ok(false)` means the service
    /// answered but declined.
    async fn ring(&self, id: &TileId, auth_key: &SecretString) -> Result<bool, CoreError>;
}

/// Local short-range radio.
#[async_trait]
pub trait RadioScanner: Send + Sync {
    /// Look for a tile's advertisement by address. With `force_scan` the
    /// scanner must not answer from a cached discovery.
    async fn find_device(
        &self,
        address: &TileId,
        force_scan: bool,
    ) -> Result<Option<DiscoveredDevice>, CoreError>;
}

/// Account-level fetch used by the coordinator on each refresh cycle.
#[async_trait]
pub trait TileSource: Send + Sync {
    async fn fetch_tiles(&self) -> Result<Vec<TileSnapshot>, CoreError>;
}

/// Host platform registration hook.
///
/// Receives each batch of newly created surfaces exactly once.
pub trait SurfaceSink: Send + Sync {
    fn add_surfaces(&self, surfaces: Vec<Arc<ControlSurface>>);
}
