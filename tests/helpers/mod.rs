//! Shared test fixtures for coordinator integration tests
//!
//! All three fake collaborators append to one shared call trace so tests can
//! assert cross-object ordering (for example, that the engagement renderer
//! stops before the player releases).

use std::sync::{Arc, Mutex};

use adweave::config::CoordinatorConfig;
use adweave::coordinator::PlaybackCoordinator;
use adweave::error::{Error, Result};
use adweave::events::CoordinatorEvent;
use adweave::player::StreamPlayer;
use adweave::renderer::{
    EngagementParams, EngagementRenderer, EngagementRendererFactory, SlotType,
};
use adweave::source::{
    AdPodInfo, AdProgress, AdStartInfo, AdTimelineSource, CompanionInfo, CuePoint,
};
use adweave::timeline::StreamPosition;

pub type Trace = Arc<Mutex<Vec<String>>>;

/// Fixture knobs; defaults give a happy-path harness.
#[derive(Default)]
pub struct Options {
    pub cue_points: Vec<CuePoint>,
    pub fail_load: bool,
    pub fail_request: bool,
    pub fail_create: bool,
    pub fail_start: bool,
}

pub struct Harness {
    pub coordinator: PlaybackCoordinator,
    pub trace: Trace,
    pub position: Arc<Mutex<StreamPosition>>,
    pub events: tokio::sync::broadcast::Receiver<CoordinatorEvent>,
}

impl Harness {
    pub fn new(options: Options) -> Self {
        let trace: Trace = Arc::new(Mutex::new(Vec::new()));
        let position = Arc::new(Mutex::new(StreamPosition::ZERO));

        let player = FakePlayer {
            trace: Arc::clone(&trace),
            position: Arc::clone(&position),
            fail_load: options.fail_load,
        };
        let source = FakeSource {
            trace: Arc::clone(&trace),
            cue_points: options.cue_points,
            fail_request: options.fail_request,
        };
        let factory = FakeRendererFactory {
            trace: Arc::clone(&trace),
            fail_create: options.fail_create,
            fail_start: options.fail_start,
        };

        let coordinator = PlaybackCoordinator::new(
            Box::new(player),
            Box::new(source),
            Box::new(factory),
            CoordinatorConfig::default(),
        );
        let events = coordinator.subscribe();

        Self {
            coordinator,
            trace,
            position,
            events,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.trace.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.trace.lock().unwrap().clear();
    }

    pub fn set_position(&self, position: StreamPosition) {
        *self.position.lock().unwrap() = position;
    }

    /// Drain everything currently queued on the event bus.
    pub fn drain_events(&mut self) -> Vec<CoordinatorEvent> {
        let mut out = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            out.push(event);
        }
        out
    }

    /// Index of the first call equal to `needle`; panics when absent.
    pub fn call_index(&self, needle: &str) -> usize {
        let calls = self.calls();
        calls
            .iter()
            .position(|c| c == needle)
            .unwrap_or_else(|| panic!("call {:?} not found in {:?}", needle, calls))
    }
}

pub fn cue(start_seconds: f64, duration_seconds: f64) -> CuePoint {
    CuePoint {
        start_offset_seconds: start_seconds,
        duration_seconds,
        played: false,
    }
}

pub fn played_cue(start_seconds: f64, duration_seconds: f64) -> CuePoint {
    CuePoint {
        start_offset_seconds: start_seconds,
        duration_seconds,
        played: true,
    }
}

/// A placeholder ad recognized by the default sentinel policy.
pub fn placeholder_ad(pod_offset_seconds: f64, max_duration_seconds: f64, pod_index: usize) -> AdStartInfo {
    AdStartInfo {
        ad_id: format!("placeholder-{}", pod_index),
        ad_system: "interactive.placeholder".to_string(),
        duration_seconds: 6.0,
        description: Some("https://engage.example.com/vast-config?placement=test".to_string()),
        companions: vec![],
        pod: AdPodInfo {
            time_offset_seconds: pod_offset_seconds,
            duration_seconds: max_duration_seconds,
            max_duration_seconds,
            pod_index,
        },
    }
}

/// An ordinary linear ad the sentinel policy must ignore.
pub fn linear_ad(pod_offset_seconds: f64, pod_index: usize) -> AdStartInfo {
    AdStartInfo {
        ad_id: format!("linear-{}", pod_index),
        ad_system: "some.network".to_string(),
        duration_seconds: 15.0,
        description: Some("an ordinary ad".to_string()),
        companions: vec![CompanionInfo {
            api_framework: Some("static".to_string()),
            resource_value: "https://cdn.example.com/banner.png".to_string(),
        }],
        pod: AdPodInfo {
            time_offset_seconds: pod_offset_seconds,
            duration_seconds: 30.0,
            max_duration_seconds: 30.0,
            pod_index,
        },
    }
}

struct FakePlayer {
    trace: Trace,
    position: Arc<Mutex<StreamPosition>>,
    fail_load: bool,
}

impl FakePlayer {
    fn record(&self, call: String) {
        self.trace.lock().unwrap().push(call);
    }
}

impl StreamPlayer for FakePlayer {
    fn load(&mut self, url: &str) -> Result<()> {
        self.record(format!("player.load({})", url));
        if self.fail_load {
            return Err(Error::Player("load refused".to_string()));
        }
        Ok(())
    }

    fn play(&mut self) {
        self.record("player.play".to_string());
    }

    fn pause(&mut self) {
        self.record("player.pause".to_string());
    }

    fn seek_to(&mut self, position: StreamPosition) {
        self.record(format!("player.seek_to({})", position.millis()));
        *self.position.lock().unwrap() = position;
    }

    fn seek_in_window(&mut self, window_index: usize, position: StreamPosition) {
        self.record(format!(
            "player.seek_in_window({},{})",
            window_index,
            position.millis()
        ));
        *self.position.lock().unwrap() = position;
    }

    fn release(&mut self) {
        self.record("player.release".to_string());
    }

    fn current_position(&self) -> StreamPosition {
        *self.position.lock().unwrap()
    }

    fn duration_ms(&self) -> u64 {
        660_000
    }

    fn set_visible(&mut self, visible: bool) {
        self.record(format!("player.set_visible({})", visible));
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.record(format!("player.set_controls({})", enabled));
    }
}

struct FakeSource {
    trace: Trace,
    cue_points: Vec<CuePoint>,
    fail_request: bool,
}

impl AdTimelineSource for FakeSource {
    fn request_stream(&mut self) -> Result<()> {
        self.trace
            .lock()
            .unwrap()
            .push("source.request_stream".to_string());
        if self.fail_request {
            return Err(Error::Timeline("stream request refused".to_string()));
        }
        Ok(())
    }

    fn cue_points(&self) -> Vec<CuePoint> {
        self.cue_points.clone()
    }

    fn current_ad_progress(&self) -> Option<AdProgress> {
        None
    }

    fn destroy(&mut self) {
        self.trace.lock().unwrap().push("source.destroy".to_string());
    }
}

struct FakeRendererFactory {
    trace: Trace,
    fail_create: bool,
    fail_start: bool,
}

impl EngagementRendererFactory for FakeRendererFactory {
    fn create(
        &mut self,
        _params: &EngagementParams,
        slot_type: SlotType,
    ) -> Result<Box<dyn EngagementRenderer>> {
        self.trace
            .lock()
            .unwrap()
            .push(format!("factory.create({})", slot_type));
        if self.fail_create {
            return Err(Error::Engagement("no renderer available".to_string()));
        }
        Ok(Box::new(FakeRenderer {
            trace: Arc::clone(&self.trace),
            fail_start: self.fail_start,
        }))
    }
}

struct FakeRenderer {
    trace: Trace,
    fail_start: bool,
}

impl FakeRenderer {
    fn record(&self, call: &str) {
        self.trace.lock().unwrap().push(call.to_string());
    }
}

impl EngagementRenderer for FakeRenderer {
    fn start(&mut self) -> Result<()> {
        self.record("renderer.start");
        if self.fail_start {
            return Err(Error::Engagement("renderer start failed".to_string()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.record("renderer.pause");
    }

    fn resume(&mut self) {
        self.record("renderer.resume");
    }

    fn stop(&mut self) {
        self.record("renderer.stop");
    }
}
