//! Ad-stitched playback coordination
//!
//! **Module Structure:**
//! - `core.rs`: `PlaybackCoordinator` lifecycle, mode machine, timeline event
//!   dispatch
//! - `seek_guard.rs`: snapback state machine mediating user seeks
//! - `trigger.rs`: placeholder-ad recognition and engagement launch
//! - `outcome.rs`: engagement outcome resolution (credit / no-credit)
//! - `session.rs`: the single live engagement session

mod core;
mod outcome;
mod seek_guard;
mod session;
mod trigger;

pub use self::core::PlaybackCoordinator;
pub use seek_guard::{GuardState, SeekDecision, SeekGuard};
pub use session::EngagementSession;
pub use trigger::{compute_resume_targets, PlaceholderPolicy, ResumeTargets, SentinelPolicy};

use serde::{Deserialize, Serialize};

/// Exactly one playback mode holds at any time; transitions are driven only
/// by the coordinator, which keeps the player's pause state and overlay
/// visibility in step with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// Normal content playback
    Content,
    /// Stitched linear ads playing
    LinearAdBreak,
    /// Interactive engagement overlay active, player hidden
    Engagement,
}

impl std::fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackMode::Content => write!(f, "content"),
            PlaybackMode::LinearAdBreak => write!(f, "linear_ad_break"),
            PlaybackMode::Engagement => write!(f, "engagement"),
        }
    }
}
