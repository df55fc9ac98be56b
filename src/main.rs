//! AdWeave demo driver - Main entry point
//!
//! Runs the playback coordinator against simulated collaborators: a stream
//! player, an ad timeline source, and an engagement renderer that all just
//! log what they are told. The script loads a stream with two stitched ad
//! breaks, seeks past the first one to demonstrate snapback, and plays an
//! engagement that either earns credit or opts out.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adweave::config::CoordinatorConfig;
use adweave::coordinator::PlaybackCoordinator;
use adweave::error::Result as AdweaveResult;
use adweave::player::{SeekIntent, StreamPlayer};
use adweave::renderer::{
    EngagementEvent, EngagementParams, EngagementRenderer, EngagementRendererFactory, SlotType,
};
use adweave::source::{
    AdPodInfo, AdProgress, AdStartInfo, AdTimelineEvent, AdTimelineSource, CompanionInfo, CuePoint,
};
use adweave::timeline::StreamPosition;

/// Command-line arguments for the adweave demo
#[derive(Parser, Debug)]
#[command(name = "adweave")]
#[command(about = "Ad-stitched playback coordinator demo")]
#[command(version)]
struct Args {
    /// Optional TOML configuration file
    #[arg(short, long, env = "ADWEAVE_CONFIG")]
    config: Option<PathBuf>,

    /// Opt out of the engagement instead of earning credit
    #[arg(long)]
    no_credit: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adweave=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CoordinatorConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => CoordinatorConfig::default(),
    };

    info!("starting adweave demo (credit={})", !args.no_credit);

    let mut coordinator = PlaybackCoordinator::new(
        Box::new(SimPlayer::default()),
        Box::new(SimSource::new()),
        Box::new(SimRendererFactory),
        config,
    );
    let mut events = coordinator.subscribe();

    coordinator.request_and_play_stream()?;
    coordinator.handle_timeline_event(AdTimelineEvent::StreamLoaded {
        url: "https://stream.example.com/stitched/main.m3u8".to_string(),
    });

    // Two midroll breaks stitched into the stream.
    coordinator.handle_timeline_event(AdTimelineEvent::CuePointsChanged {
        cue_points: vec![
            CuePoint {
                start_offset_seconds: 60.0,
                duration_seconds: 30.0,
                played: false,
            },
            CuePoint {
                start_offset_seconds: 300.0,
                duration_seconds: 30.0,
                played: false,
            },
        ],
    });

    // Scrub past the first break; the guard snaps back to its start.
    coordinator.seek(SeekIntent::new(StreamPosition::from_seconds(120.0), 0));

    coordinator.handle_timeline_event(AdTimelineEvent::AdBreakStarted);
    if let Some(progress) = coordinator.ad_progress() {
        info!(
            "ad {}/{} at {:.1}s",
            progress.ad_position, progress.total_ads, progress.current_time_seconds
        );
    }
    coordinator.handle_timeline_event(AdTimelineEvent::AdStarted {
        ad: placeholder_ad(),
    });

    coordinator.handle_engagement_event(EngagementEvent::AdStarted);
    if args.no_credit {
        coordinator.handle_engagement_event(EngagementEvent::OptOut);
    } else {
        coordinator.handle_engagement_event(EngagementEvent::OptIn);
        coordinator.handle_engagement_event(EngagementEvent::AdFreeCredit);
    }
    coordinator.handle_engagement_event(EngagementEvent::AdCompleted);

    if args.no_credit {
        // The remaining linear ads play through and the break retires.
        coordinator.handle_timeline_event(AdTimelineEvent::AdBreakEnded);
    }

    coordinator.release();

    while let Ok(event) = events.try_recv() {
        info!("event: {}", serde_json::to_string(&event)?);
    }

    info!("demo finished in mode {}", coordinator.mode());
    Ok(())
}

fn placeholder_ad() -> AdStartInfo {
    AdStartInfo {
        ad_id: "demo-placeholder-1".to_string(),
        ad_system: "interactive.placeholder".to_string(),
        duration_seconds: 6.0,
        description: Some("https://engage.example.com/vast-config?placement=demo".to_string()),
        companions: vec![CompanionInfo {
            api_framework: Some("interactive".to_string()),
            resource_value: "https://engage.example.com/asset".to_string(),
        }],
        pod: AdPodInfo {
            time_offset_seconds: 60.0,
            duration_seconds: 30.0,
            max_duration_seconds: 30.0,
            pod_index: 1,
        },
    }
}

/// Stream player that tracks position and logs every call.
#[derive(Default)]
struct SimPlayer {
    position: StreamPosition,
    playing: bool,
}

impl StreamPlayer for SimPlayer {
    fn load(&mut self, url: &str) -> AdweaveResult<()> {
        info!("player: load {}", url);
        Ok(())
    }

    fn play(&mut self) {
        self.playing = true;
        info!("player: play");
    }

    fn pause(&mut self) {
        self.playing = false;
        info!("player: pause");
    }

    fn seek_to(&mut self, position: StreamPosition) {
        self.position = position;
        info!("player: seek to {}", position);
    }

    fn seek_in_window(&mut self, window_index: usize, position: StreamPosition) {
        self.position = position;
        info!("player: seek to {} (window {})", position, window_index);
    }

    fn release(&mut self) {
        self.playing = false;
        info!("player: release");
    }

    fn current_position(&self) -> StreamPosition {
        self.position
    }

    fn duration_ms(&self) -> u64 {
        // 10 minutes of content plus two 30 second breaks
        660_000
    }

    fn set_visible(&mut self, visible: bool) {
        info!("player: visible={}", visible);
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        info!("player: controls={}", enabled);
    }
}

/// Ad timeline source that already knows its cue points.
struct SimSource {
    cue_points: Vec<CuePoint>,
}

impl SimSource {
    fn new() -> Self {
        Self { cue_points: vec![] }
    }
}

impl AdTimelineSource for SimSource {
    fn request_stream(&mut self) -> AdweaveResult<()> {
        info!("source: stream requested");
        Ok(())
    }

    fn cue_points(&self) -> Vec<CuePoint> {
        self.cue_points.clone()
    }

    fn current_ad_progress(&self) -> Option<AdProgress> {
        None
    }

    fn destroy(&mut self) {
        info!("source: destroyed");
    }
}

struct SimRendererFactory;

impl EngagementRendererFactory for SimRendererFactory {
    fn create(
        &mut self,
        params: &EngagementParams,
        slot_type: SlotType,
    ) -> AdweaveResult<Box<dyn EngagementRenderer>> {
        info!("renderer: created for {} slot ({:?})", slot_type, params);
        Ok(Box::new(SimRenderer))
    }
}

struct SimRenderer;

impl EngagementRenderer for SimRenderer {
    fn start(&mut self) -> AdweaveResult<()> {
        info!("renderer: start");
        Ok(())
    }

    fn pause(&mut self) {
        info!("renderer: pause");
    }

    fn resume(&mut self) {
        info!("renderer: resume");
    }

    fn stop(&mut self) {
        info!("renderer: stop");
    }
}
