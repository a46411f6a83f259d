// ── In-crate test doubles ──

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::watch;

use crate::coordinator::Coordinator;
use crate::error::CoreError;
use crate::model::{DiscoveredDevice, TileDataset, TileId, TileSnapshot};
use crate::ports::{RadioScanner, SurfaceSink, TileCloud};
use crate::router::ActionRouter;
use crate::store::DatasetStore;
use crate::surface::ControlSurface;

/// Coordinator whose dataset is set directly by the test.
#[derive(Default)]
pub(crate) struct StaticCoordinator {
    pub store: DatasetStore,
}

#[async_trait]
impl Coordinator for StaticCoordinator {
    fn dataset(&self) -> Arc<TileDataset> {
        self.store.current()
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.store.subscribe()
    }

    async fn request_refresh(&self) {}
}

pub(crate) struct NullCloud;

#[async_trait]
impl TileCloud for NullCloud {
    async fn ring(&self, _id: &TileId, _auth_key: &SecretString) -> Result<bool, CoreError> {
        Ok(true)
    }
}

pub(crate) struct NullRadio;

#[async_trait]
impl RadioScanner for NullRadio {
    async fn find_device(
        &self,
        _address: &TileId,
        _force_scan: bool,
    ) -> Result<Option<DiscoveredDevice>, CoreError> {
        Ok(None)
    }
}

/// Records the unique ids of each batch it receives.
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub batches: Mutex<Vec<Vec<String>>>,
}

impl RecordingSink {
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }
}

impl SurfaceSink for RecordingSink {
    fn add_surfaces(&self, surfaces: Vec<Arc<ControlSurface>>) {
        let mut ids: Vec<String> = surfaces.iter().map(|s| s.unique_id()).collect();
        ids.sort();
        self.batches.lock().unwrap().push(ids);
    }
}

pub(crate) fn router() -> (Arc<StaticCoordinator>, Arc<ActionRouter>) {
    let coordinator = Arc::new(StaticCoordinator::default());
    let router = Arc::new(ActionRouter::new(
        Arc::clone(&coordinator) as Arc<dyn Coordinator>,
        Arc::new(NullCloud),
        Arc::new(NullRadio),
    ));
    (coordinator, router)
}

pub(crate) fn tile(id: &str, name: &str, auth_key: &str) -> TileSnapshot {
    TileSnapshot::new(id, name).with_auth_key(auth_key)
}
