//! Engagement outcome resolution
//!
//! Consumes the renderer event stream for the live engagement session and
//! resolves it to exactly one of two outcomes: credit (the whole ad pod is
//! skipped) or no credit (playback rejoins the linear ads). Progress events
//! before the terminal one only adjust session state; a terminal event tears
//! the session down and restores the player.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::coordinator::core::PlaybackCoordinator;
use crate::coordinator::PlaybackMode;
use crate::events::CoordinatorEvent;
use crate::renderer::EngagementEvent;

impl PlaybackCoordinator {
    /// Dispatch one event from the engagement renderer.
    ///
    /// Events arriving after release, or after the session already resolved,
    /// are dropped. Renderers are expected to emit at most one terminal
    /// event, but a stale duplicate must not disturb restored playback.
    pub fn handle_engagement_event(&mut self, event: EngagementEvent) {
        if self.released {
            debug!("engagement event {} after release ignored", event.name());
            return;
        }
        if self.session.is_none() {
            debug!("stale engagement event {} ignored", event.name());
            return;
        }

        match event {
            EngagementEvent::AdFreeCredit => {
                if let Some(session) = self.session.as_mut() {
                    info!("engagement {} earned ad-free credit", session.id);
                    session.credit_earned = true;
                }
            }
            EngagementEvent::UserCancelStream => {
                if let Some(session) = self.session.take() {
                    info!("viewer cancelled the stream from engagement {}", session.id);
                    self.emit(CoordinatorEvent::EngagementFinished {
                        session_id: session.id,
                        credit_earned: session.credit_earned,
                        timestamp: Utc::now(),
                    });
                    session.stop();
                    self.release();
                }
            }
            event if event.is_terminal() => self.finish_session(event),
            event => {
                debug!("engagement progress event: {}", event.name());
            }
        }
    }

    /// Resolve the live session on a terminal renderer event.
    fn finish_session(&mut self, event: EngagementEvent) {
        let Some(session) = self.session.take() else {
            return;
        };
        let credit_earned = session.credit_earned;
        let targets = session.targets;
        let break_start = session.break_start;
        let session_id = session.id;
        session.stop();

        if matches!(event, EngagementEvent::AdError) {
            warn!("engagement {} ended with an error", session_id);
        }
        info!(
            "engagement {} finished on {}: credit={}",
            session_id,
            event.name(),
            credit_earned
        );

        if credit_earned {
            // Jump past the whole pod, retire the break, then honor any
            // snapback resume target before the player comes back.
            self.player.seek_to(targets.after_credit);
            self.active_break_start = None;
            if self.registry.mark_played(break_start) {
                self.emit(CoordinatorEvent::AdBreakPlayed {
                    start_ms: break_start.millis(),
                    timestamp: Utc::now(),
                });
            }
            self.apply_resume_target();
            self.player.set_visible(true);
            self.player.play();
            self.player.set_controls_enabled(true);
            self.set_mode(PlaybackMode::Content);
        } else {
            // Rejoin the linear ads just past the placeholder; the break
            // finishes naturally and retires on its own end signal.
            self.player.seek_to(targets.after_opt_out);
            self.player.set_visible(true);
            self.player.play();
            self.set_mode(PlaybackMode::LinearAdBreak);
        }

        self.emit(CoordinatorEvent::EngagementFinished {
            session_id,
            credit_earned,
            timestamp: Utc::now(),
        });
    }
}
