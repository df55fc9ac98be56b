//! Engagement session
//!
//! The single live interactive engagement. The session owns the renderer
//! instance outright; the outcome resolver and lifecycle manager only ever
//! reach it through the coordinator's `Option<EngagementSession>` slot, so a
//! stale renderer reference cannot outlive its session.

use uuid::Uuid;

use crate::coordinator::trigger::ResumeTargets;
use crate::error::Result;
use crate::renderer::{EngagementParams, EngagementRenderer, SlotType};
use crate::timeline::StreamPosition;

pub struct EngagementSession {
    pub id: Uuid,
    pub slot_type: SlotType,
    pub params: EngagementParams,

    /// Latched by `AD_FREE_CREDIT`; reset to false at session start
    pub credit_earned: bool,

    /// Seek targets precomputed at recognition time
    pub targets: ResumeTargets,

    /// Start of the ad break this engagement replaces
    pub break_start: StreamPosition,

    renderer: Box<dyn EngagementRenderer>,
}

impl EngagementSession {
    pub fn new(
        params: EngagementParams,
        slot_type: SlotType,
        targets: ResumeTargets,
        break_start: StreamPosition,
        renderer: Box<dyn EngagementRenderer>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            slot_type,
            params,
            credit_earned: false,
            targets,
            break_start,
            renderer,
        }
    }

    pub fn start(&mut self) -> Result<()> {
        self.renderer.start()
    }

    pub fn pause(&mut self) {
        self.renderer.pause();
    }

    pub fn resume(&mut self) {
        self.renderer.resume();
    }

    /// Abort the renderer; consumes the session.
    pub fn stop(mut self) {
        self.renderer.stop();
    }
}

impl std::fmt::Debug for EngagementSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngagementSession")
            .field("id", &self.id)
            .field("slot_type", &self.slot_type)
            .field("credit_earned", &self.credit_earned)
            .field("targets", &self.targets)
            .field("break_start", &self.break_start)
            .finish_non_exhaustive()
    }
}
