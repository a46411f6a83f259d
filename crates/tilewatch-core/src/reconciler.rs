// ── Surface reconciliation ──
//
// Keeps the surface set in step with the dataset's tile ids. New tiles
// get a locate/refresh/scan triple; tiles that vanish are left alone.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::model::TileId;
use crate::ports::SurfaceSink;
use crate::router::ActionRouter;
use crate::surface::{ControlSurface, SurfaceRegistry};

pub struct Reconciler {
    account_id: String,
    force_scan: bool,
    router: Arc<ActionRouter>,
    registry: Arc<SurfaceRegistry>,
    sink: Arc<dyn SurfaceSink>,
}

impl Reconciler {
    pub fn new(
        account_id: impl Into<String>,
        force_scan: bool,
        router: Arc<ActionRouter>,
        registry: Arc<SurfaceRegistry>,
        sink: Arc<dyn SurfaceSink>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            force_scan,
            router,
            registry,
            sink,
        }
    }

    pub fn registry(&self) -> &Arc<SurfaceRegistry> {
        &self.registry
    }

    /// Create the fleet refresh surface and a triple for every tile
    /// currently known, handing them to the sink as one batch.
    pub fn setup(&self) -> usize {
        let fleet = ControlSurface::fleet_refresh(self.account_id.clone(), Arc::clone(&self.router));
        let dataset = self.router.coordinator().dataset();
        let tiles = dataset
            .ids()
            .flat_map(|id| ControlSurface::triple(id, &self.router, self.force_scan));

        let added = self.registry.register(std::iter::once(fleet).chain(tiles));
        let count = added.len();
        if !added.is_empty() {
            self.sink.add_surfaces(added);
        }
        debug!(surfaces = count, tiles = dataset.len(), "surfaces set up");
        count
    }

    /// Add surfaces for tiles that have none yet. Returns the newly
    /// surfaced ids; empty when nothing changed.
    pub fn reconcile(&self) -> Vec<TileId> {
        let surfaced = self.registry.tile_ids();
        let dataset = self.router.coordinator().dataset();
        let fresh: Vec<TileId> = dataset
            .ids()
            .filter(|id| !surfaced.contains(*id))
            .cloned()
            .collect();

        if fresh.is_empty() {
            return fresh;
        }

        let added = self.registry.register(
            fresh
                .iter()
                .flat_map(|id| ControlSurface::triple(id, &self.router, self.force_scan)),
        );
        info!(tiles = fresh.len(), surfaces = added.len(), "discovered new tiles");
        if !added.is_empty() {
            self.sink.add_surfaces(added);
        }
        fresh
    }

    /// Reconcile after every dataset change seen on `changes` until
    /// cancelled or until the coordinator goes away.
    ///
    /// Take `changes` before [`setup()`](Self::setup) so a cycle that lands
    /// in between is still reconciled.
    pub fn spawn(
        self: Arc<Self>,
        mut changes: watch::Receiver<u64>,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    changed = changes.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        self.reconcile();
                    }
                }
            }
            debug!("reconciler stopped");
        })
    }
}
