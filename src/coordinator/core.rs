//! Core playback coordinator - lifecycle and orchestration
//!
//! **Responsibilities:**
//! - `PlaybackCoordinator` struct definition and initialization
//! - Playback mode machine (content / linear ad break / engagement)
//! - Timeline event dispatch and seek mediation
//! - Idempotent teardown across player, timeline source, and renderer
//!
//! All callbacks are expected to arrive serialized; the coordinator holds no
//! internal locking and no operation blocks the calling thread.

use chrono::Utc;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::config::CoordinatorConfig;
use crate::coordinator::seek_guard::{GuardState, SeekDecision, SeekGuard};
use crate::coordinator::session::EngagementSession;
use crate::coordinator::trigger::{PlaceholderPolicy, SentinelPolicy};
use crate::coordinator::PlaybackMode;
use crate::error::{Error, Result};
use crate::events::{CoordinatorEvent, EventBus};
use crate::player::{SeekIntent, StreamPlayer};
use crate::renderer::{EngagementRendererFactory, SlotType};
use crate::source::{AdTimelineEvent, AdTimelineSource};
use crate::timeline::{AdBreakRegistry, StreamPosition};

/// Top-level coordinator for ad-stitched playback with interactive
/// engagement splicing.
///
/// Owns the stream player, the ad timeline subscription, and at most one
/// live engagement session, and guarantees exactly one of {content, linear
/// ad break, engagement} is active at a time.
pub struct PlaybackCoordinator {
    pub(super) player: Box<dyn StreamPlayer>,
    pub(super) source: Box<dyn AdTimelineSource>,
    pub(super) renderer_factory: Box<dyn EngagementRendererFactory>,
    pub(super) policy: Box<dyn PlaceholderPolicy>,
    pub(super) config: CoordinatorConfig,

    pub(super) registry: AdBreakRegistry,
    pub(super) seek_guard: SeekGuard,

    /// The single live engagement session, if any
    pub(super) session: Option<EngagementSession>,

    pub(super) mode: PlaybackMode,

    /// Start offset of the break playback is currently inside, if any
    pub(super) active_break_start: Option<StreamPosition>,

    pub(super) events: EventBus,

    pub(super) released: bool,
}

impl PlaybackCoordinator {
    /// Create a coordinator with the default sentinel recognition policy
    /// from `config.recognition`.
    pub fn new(
        player: Box<dyn StreamPlayer>,
        source: Box<dyn AdTimelineSource>,
        renderer_factory: Box<dyn EngagementRendererFactory>,
        config: CoordinatorConfig,
    ) -> Self {
        let policy = Box::new(SentinelPolicy::new(config.recognition.clone()));
        let events = EventBus::new(config.event_capacity);
        Self {
            player,
            source,
            renderer_factory,
            policy,
            config,
            registry: AdBreakRegistry::new(),
            seek_guard: SeekGuard::new(),
            session: None,
            mode: PlaybackMode::Content,
            active_break_start: None,
            events,
            released: false,
        }
    }

    /// Replace the placeholder-recognition policy.
    pub fn with_policy(mut self, policy: Box<dyn PlaceholderPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<CoordinatorEvent> {
        self.events.subscribe()
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn guard_state(&self) -> GuardState {
        self.seek_guard.state()
    }

    pub fn registry(&self) -> &AdBreakRegistry {
        &self.registry
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn has_active_engagement(&self) -> bool {
        self.session.is_some()
    }

    /// Progress through the current ad, if the source reports one playing.
    pub fn ad_progress(&self) -> Option<crate::source::AdProgress> {
        self.source.current_ad_progress()
    }

    /// Current position with stitched ad time discounted, in milliseconds.
    ///
    /// Not meaningful while inside an ad break (the mapping clamps there).
    pub fn content_position_ms(&self) -> u64 {
        self.registry
            .timeline()
            .to_content_time(self.player.current_position())
    }

    /// Stream duration with stitched ad time discounted, in milliseconds.
    pub fn content_duration_ms(&self) -> u64 {
        self.registry
            .timeline()
            .to_content_time(StreamPosition::from_millis(self.player.duration_ms()))
    }

    /// Request the stitched stream and begin playback once it loads.
    ///
    /// A synchronous request failure surfaces as `PlaybackFailed` and
    /// releases the coordinator, the same as an asynchronous
    /// [`AdTimelineEvent::LoadFailed`].
    pub fn request_and_play_stream(&mut self) -> Result<()> {
        if self.released {
            return Err(Error::InvalidState(
                "coordinator already released".to_string(),
            ));
        }

        info!("requesting ad-stitched stream");
        self.player.set_controls_enabled(true);

        if let Err(e) = self.source.request_stream() {
            let message = e.to_string();
            self.fail_playback(&message);
            return Err(Error::Timeline(message));
        }

        // Seed the registry in case the source already knows its cue points.
        let cue_points = self.source.cue_points();
        if !cue_points.is_empty() {
            self.registry.update_from_cue_points(&cue_points);
            self.emit(CoordinatorEvent::CuePointsUpdated {
                break_count: self.registry.len(),
                timestamp: Utc::now(),
            });
        }
        Ok(())
    }

    /// Pause whichever of {player, engagement renderer} is active.
    pub fn pause(&mut self) {
        if self.released {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.pause();
        } else {
            self.player.pause();
        }
    }

    /// Resume whichever of {player, engagement renderer} is active.
    pub fn resume(&mut self) {
        if self.released {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.resume();
        } else {
            self.player.play();
        }
    }

    /// Tear down everything, in strict order: engagement renderer, then the
    /// timeline source session, then the player. Idempotent; safe from any
    /// state.
    pub fn release(&mut self) {
        if self.released {
            debug!("release called on an already-released coordinator");
            return;
        }
        self.released = true;

        if let Some(session) = self.session.take() {
            info!("stopping active engagement for release");
            session.stop();
        }
        self.source.destroy();
        self.player.release();

        self.events.emit_lossy(CoordinatorEvent::Released {
            timestamp: Utc::now(),
        });
        info!("playback coordinator released");
    }

    /// Mediate a user seek. Ordinary seeks are forwarded; seeks that would
    /// scrub past an unwatched ad break snap back to the break start.
    pub fn seek(&mut self, intent: SeekIntent) {
        if self.released {
            return;
        }
        if self.mode == PlaybackMode::Engagement {
            debug!("seek ignored while an engagement is active");
            return;
        }

        match self.seek_guard.evaluate(intent, &self.registry) {
            SeekDecision::Forward(position) => {
                self.player.seek_in_window(intent.window_index, position);
            }
            SeekDecision::Snap { break_start } => {
                info!("ad snapback to {} for {}", break_start, intent.position);
                self.player.seek_in_window(intent.window_index, break_start);
                self.emit(CoordinatorEvent::SeekSnapped {
                    requested_ms: intent.position.millis(),
                    snapped_to_ms: break_start.millis(),
                    timestamp: Utc::now(),
                });
            }
            SeekDecision::Rejected => {
                debug!("seek to {} dropped: ad break pending", intent.position);
            }
        }
    }

    /// Dispatch one event from the ad timeline source.
    pub fn handle_timeline_event(&mut self, event: AdTimelineEvent) {
        if self.released {
            debug!("timeline event after release ignored");
            return;
        }

        match event {
            AdTimelineEvent::StreamLoaded { url } => {
                info!("stream loaded: {}", url);
                if let Err(e) = self.player.load(&url) {
                    let message = format!("player failed to load stream: {}", e);
                    self.fail_playback(&message);
                    return;
                }
                self.player.play();
            }
            AdTimelineEvent::CuePointsChanged { cue_points } => {
                self.registry.update_from_cue_points(&cue_points);
                self.emit(CoordinatorEvent::CuePointsUpdated {
                    break_count: self.registry.len(),
                    timestamp: Utc::now(),
                });
            }
            AdTimelineEvent::AdBreakStarted => self.on_ad_break_started(),
            AdTimelineEvent::AdStarted { ad } => self.on_ad_started(ad),
            AdTimelineEvent::AdBreakEnded => self.on_ad_break_ended(),
            AdTimelineEvent::LoadFailed { message } => {
                self.fail_playback(&message);
            }
        }
    }

    fn on_ad_break_started(&mut self) {
        info!("ad break started");
        self.player.set_controls_enabled(false);

        let position = self.player.current_position();
        self.active_break_start = self
            .registry
            .break_containing(position)
            .or_else(|| self.registry.previous_unplayed_break_before(position))
            .map(|b| b.start);

        if self.mode == PlaybackMode::Content {
            self.set_mode(PlaybackMode::LinearAdBreak);
        }
    }

    fn on_ad_break_ended(&mut self) {
        info!("ad break ended");

        if let Some(start) = self.active_break_start.take() {
            if self.registry.mark_played(start) {
                self.emit(CoordinatorEvent::AdBreakPlayed {
                    start_ms: start.millis(),
                    timestamp: Utc::now(),
                });
            }
        }

        self.apply_resume_target();
        self.player.set_controls_enabled(true);

        if self.mode == PlaybackMode::LinearAdBreak {
            self.set_mode(PlaybackMode::Content);
        }
    }

    /// One follow-up seek to the position the viewer originally requested,
    /// if a snapback recorded one.
    pub(super) fn apply_resume_target(&mut self) {
        if let Some(target) = self.seek_guard.clear() {
            info!("resuming snapped seek at {}", target);
            self.player.seek_to(target);
            self.emit(CoordinatorEvent::SeekResumed {
                target_ms: target.millis(),
                timestamp: Utc::now(),
            });
        }
    }

    pub(super) fn set_mode(&mut self, new_mode: PlaybackMode) {
        if self.mode == new_mode {
            return;
        }
        debug!("playback mode {} -> {}", self.mode, new_mode);
        self.emit(CoordinatorEvent::PlaybackModeChanged {
            old_mode: self.mode,
            new_mode,
            timestamp: Utc::now(),
        });
        self.mode = new_mode;
    }

    pub(super) fn emit(&self, event: CoordinatorEvent) {
        self.events.emit_lossy(event);
    }

    pub(super) fn emit_engagement_started(&self, session_id: Uuid, slot_type: SlotType) {
        self.emit(CoordinatorEvent::EngagementStarted {
            session_id,
            slot_type,
            timestamp: Utc::now(),
        });
    }

    /// Unrecoverable failure: notify the shell and release.
    pub(super) fn fail_playback(&mut self, message: &str) {
        error!("playback failed: {}", message);
        self.emit(CoordinatorEvent::PlaybackFailed {
            message: message.to_string(),
            timestamp: Utc::now(),
        });
        self.release();
    }
}
