// Shared fakes for tilewatch-core integration tests.

#![allow(clippy::unwrap_used, dead_code)]

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

use tilewatch_core::{
    ControlSurface, CoreError, DiscoveredDevice, RadioScanner, SurfaceSink, TileCloud, TileId,
    TileSnapshot, TileSource, Tracker, TrackerConfig,
};

// ── Cloud ───────────────────────────────────────────────────────────

pub struct FakeCloud {
    pub answer: AtomicBool,
    pub broken: AtomicBool,
    pub rings: Mutex<Vec<(String, String)>>,
}

impl FakeCloud {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer: AtomicBool::new(answer),
            broken: AtomicBool::new(false),
            rings: Mutex::new(Vec::new()),
        })
    }

    /// Records the ring attempt, then fails it with a transport error.
    pub fn broken() -> Arc<Self> {
        let cloud = Self::answering(false);
        cloud.broken.store(true, Ordering::SeqCst);
        cloud
    }

    pub fn rings(&self) -> Vec<(String, String)> {
        self.rings.lock().unwrap().clone()
    }
}

#[async_trait]
impl TileCloud for FakeCloud {
    async fn ring(&self, id: &TileId, auth_key: &SecretString) -> Result<bool, CoreError> {
        self.rings
            .lock()
            .unwrap()
            .push((id.to_string(), auth_key.expose_secret().to_owned()));
        if self.broken.load(Ordering::SeqCst) {
            return Err(CoreError::cloud("HTTP 502"));
        }
        Ok(self.answer.load(Ordering::SeqCst))
    }
}

// ── Radio ───────────────────────────────────────────────────────────

/// Radio with a discovery cache that only non-forced lookups may use.
#[derive(Default)]
pub struct FakeRadio {
    pub nearby: Mutex<Option<DiscoveredDevice>>,
    pub cache: Mutex<Option<DiscoveredDevice>>,
    pub scans: Mutex<Vec<(String, bool)>>,
    pub broken: AtomicBool,
}

impl FakeRadio {
    pub fn hearing(address: &str, rssi: i16) -> Arc<Self> {
        let radio = Self::default();
        *radio.nearby.lock().unwrap() = Some(DiscoveredDevice {
            address: address.into(),
            rssi: Some(rssi),
        });
        Arc::new(radio)
    }

    pub fn silent() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every lookup fails as if the adapter were unavailable.
    pub fn broken() -> Arc<Self> {
        let radio = Self::default();
        radio.broken.store(true, Ordering::SeqCst);
        Arc::new(radio)
    }

    pub fn scans(&self) -> Vec<(String, bool)> {
        self.scans.lock().unwrap().clone()
    }
}

#[async_trait]
impl RadioScanner for FakeRadio {
    async fn find_device(
        &self,
        address: &TileId,
        force_scan: bool,
    ) -> Result<Option<DiscoveredDevice>, CoreError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(CoreError::radio("adapter hci0 unavailable"));
        }
        if !force_scan {
            if let Some(cached) = self.cache.lock().unwrap().clone() {
                return Ok(Some(cached));
            }
        }
        self.scans
            .lock()
            .unwrap()
            .push((address.to_string(), force_scan));
        let found = self.nearby.lock().unwrap().clone();
        *self.cache.lock().unwrap() = found.clone();
        Ok(found)
    }
}

// ── Account source ──────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeSource {
    pub tiles: Mutex<Vec<TileSnapshot>>,
    pub failing: AtomicBool,
    pub fetches: AtomicUsize,
}

impl FakeSource {
    pub fn with(tiles: Vec<TileSnapshot>) -> Arc<Self> {
        Arc::new(Self {
            tiles: Mutex::new(tiles),
            failing: AtomicBool::new(false),
            fetches: AtomicUsize::new(0),
        })
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn set(&self, tiles: Vec<TileSnapshot>) {
        *self.tiles.lock().unwrap() = tiles;
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl TileSource for FakeSource {
    async fn fetch_tiles(&self) -> Result<Vec<TileSnapshot>, CoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoreError::cloud("HTTP 503"));
        }
        Ok(self.tiles.lock().unwrap().clone())
    }
}

// ── Host platform ───────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub batches: Mutex<Vec<Vec<String>>>,
}

impl RecordingSink {
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn all_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.batches().into_iter().flatten().collect();
        ids.sort();
        ids
    }
}

impl SurfaceSink for RecordingSink {
    fn add_surfaces(&self, surfaces: Vec<Arc<ControlSurface>>) {
        let mut ids: Vec<String> = surfaces.iter().map(|s| s.unique_id()).collect();
        ids.sort();
        self.batches.lock().unwrap().push(ids);
    }
}

// ── Log capture ─────────────────────────────────────────────────────

/// Collects every tracing event as `(level, rendered fields)`.
#[derive(Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<(Level, String)>>>,
}

impl LogCapture {
    /// Install as the thread's default subscriber for the guard's lifetime.
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn at(&self, level: Level) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

#[derive(Default)]
struct FieldText(String);

impl Visit for FieldText {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        use std::fmt::Write;
        let _ = write!(self.0, "{}={:?} ", field.name(), value);
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut text = FieldText::default();
        event.record(&mut text);
        self.events
            .lock()
            .unwrap()
            .push((*event.metadata().level(), text.0));
    }
}

// ── Fixtures ────────────────────────────────────────────────────────

pub fn tile(id: &str, name: &str, auth_key: &str) -> TileSnapshot {
    TileSnapshot::new(id, name).with_auth_key(auth_key)
}

pub struct Harness {
    pub tracker: Tracker,
    pub source: Arc<FakeSource>,
    pub cloud: Arc<FakeCloud>,
    pub radio: Arc<FakeRadio>,
    pub sink: Arc<RecordingSink>,
}

impl Harness {
    /// Harness without periodic refresh; cycles run only when asked.
    pub fn new(tiles: Vec<TileSnapshot>, cloud: Arc<FakeCloud>, radio: Arc<FakeRadio>) -> Self {
        Self::polling(tiles, cloud, radio, Duration::ZERO)
    }

    pub fn polling(
        tiles: Vec<TileSnapshot>,
        cloud: Arc<FakeCloud>,
        radio: Arc<FakeRadio>,
        refresh_interval: Duration,
    ) -> Self {
        let source = FakeSource::with(tiles);
        let sink = Arc::new(RecordingSink::default());
        let config = TrackerConfig {
            refresh_interval,
            ..TrackerConfig::new("acct")
        };
        let tracker = Tracker::new(
            config,
            Arc::clone(&source) as Arc<dyn TileSource>,
            Arc::clone(&cloud) as Arc<dyn TileCloud>,
            Arc::clone(&radio) as Arc<dyn RadioScanner>,
            Arc::clone(&sink) as Arc<dyn SurfaceSink>,
        )
        .unwrap();
        Self {
            tracker,
            source,
            cloud,
            radio,
            sink,
        }
    }

    pub fn surface(&self, unique_id: &str) -> Arc<ControlSurface> {
        self.tracker
            .surface(unique_id)
            .unwrap_or_else(|| panic!("no surface {unique_id}"))
    }

    /// Let spawned tasks (the reconciler) catch up.
    pub async fn settle(&self) {
        for _ in 0..50 {
            tokio::task::yield_now().await;
        }
    }
}
