// ── Tracker facade ──
//
// Wires the coordinator, router, surface registry, and reconciler
// together and owns their background tasks.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::TrackerConfig;
use crate::coordinator::{Coordinator, TileCoordinator};
use crate::error::CoreError;
use crate::ports::{RadioScanner, SurfaceSink, TileCloud, TileSource};
use crate::reconciler::Reconciler;
use crate::router::ActionRouter;
use crate::surface::{ControlSurface, SurfaceRegistry};

/// The main entry point for embedders.
///
/// Cheaply cloneable via `Arc<TrackerInner>`.
#[derive(Clone)]
pub struct Tracker {
    inner: Arc<TrackerInner>,
}

struct TrackerInner {
    config: TrackerConfig,
    coordinator: TileCoordinator,
    router: Arc<ActionRouter>,
    reconciler: Arc<Reconciler>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Tracker {
    /// Build a tracker. Does NOT fetch anything; call
    /// [`start()`](Self::start) to load tiles and spawn background tasks.
    pub fn new(
        config: TrackerConfig,
        source: Arc<dyn TileSource>,
        cloud: Arc<dyn TileCloud>,
        radio: Arc<dyn RadioScanner>,
        sink: Arc<dyn SurfaceSink>,
    ) -> Result<Self, CoreError> {
        config.validate()?;

        let coordinator = TileCoordinator::new(source, &config);
        let router = Arc::new(ActionRouter::new(
            Arc::new(coordinator.clone()) as Arc<dyn Coordinator>,
            cloud,
            radio,
        ));
        let reconciler = Arc::new(Reconciler::new(
            config.account_id.clone(),
            config.force_scan,
            Arc::clone(&router),
            Arc::new(SurfaceRegistry::new()),
            sink,
        ));

        Ok(Self {
            inner: Arc::new(TrackerInner {
                config,
                coordinator,
                router,
                reconciler,
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.inner.config
    }

    pub fn coordinator(&self) -> &TileCoordinator {
        &self.inner.coordinator
    }

    pub fn router(&self) -> &Arc<ActionRouter> {
        &self.inner.router
    }

    pub fn registry(&self) -> &Arc<SurfaceRegistry> {
        self.inner.reconciler.registry()
    }

    pub fn surface(&self, unique_id: &str) -> Option<Arc<ControlSurface>> {
        self.registry().get(unique_id)
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Load the account's tiles, register the initial surfaces, then
    /// spawn the reconciler and the periodic refresh.
    ///
    /// Fails only if the first refresh fails; nothing is registered then.
    /// Calling it again on a started tracker does nothing.
    pub async fn start(&self) -> Result<(), CoreError> {
        let mut handles = self.inner.task_handles.lock().await;
        if !handles.is_empty() {
            debug!(account = %self.inner.config.account_id, "tile tracker already started");
            return Ok(());
        }

        self.inner.coordinator.refresh().await?;
        let changes = self.inner.coordinator.subscribe();
        self.inner.reconciler.setup();

        let cancel = self.inner.cancel.clone();
        handles.push(Arc::clone(&self.inner.reconciler).spawn(changes, cancel.clone()));
        if let Some(handle) = self.inner.coordinator.spawn_polling(cancel) {
            handles.push(handle);
        }

        info!(
            account = %self.inner.config.account_id,
            surfaces = self.registry().len(),
            "tile tracker started"
        );
        Ok(())
    }

    /// Cancel background tasks and wait for them to finish.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        debug!("tile tracker stopped");
    }
}
