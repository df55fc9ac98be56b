//! Engagement renderer capability
//!
//! The interactive ad SDK renders the engagement UI and fetches its own
//! config; the coordinator consumes it through the small start/pause/resume/
//! stop contract below plus the closed [`EngagementEvent`] vocabulary. One
//! dispatch function over a tagged union replaces the original
//! handler-object-per-event-name registration style.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which slot the engagement replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotType {
    Preroll,
    Midroll,
}

impl std::fmt::Display for SlotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotType::Preroll => write!(f, "preroll"),
            SlotType::Midroll => write!(f, "midroll"),
        }
    }
}

/// Parameters extracted from a placeholder ad, handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngagementParams {
    /// Direct configuration URL embedded in the ad description
    ConfigUrl(String),

    /// Structured parameters decoded from a companion base64 JSON payload
    Inline(serde_json::Value),
}

/// Lifecycle / outcome events emitted by the engagement renderer.
///
/// This is the complete vocabulary the outcome resolver handles; exactly one
/// terminal event is expected per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngagementEvent {
    AdStarted,
    /// Viewer earned the credit to skip the rest of the ad break
    AdFreeCredit,
    OptIn,
    OptOut,
    UserCancel,
    /// Viewer cancelled out of the stream entirely
    UserCancelStream,
    SkipCardShown,
    AdCompleted,
    AdError,
    NoAdsAvailable,
}

impl EngagementEvent {
    /// Terminal events end the session; everything else is informational
    /// (or, for `AdFreeCredit`, latches the credit flag without ending it).
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            EngagementEvent::AdCompleted
                | EngagementEvent::AdError
                | EngagementEvent::NoAdsAvailable
                | EngagementEvent::UserCancelStream
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            EngagementEvent::AdStarted => "AD_STARTED",
            EngagementEvent::AdFreeCredit => "AD_FREE_CREDIT",
            EngagementEvent::OptIn => "OPT_IN",
            EngagementEvent::OptOut => "OPT_OUT",
            EngagementEvent::UserCancel => "USER_CANCEL",
            EngagementEvent::UserCancelStream => "USER_CANCEL_STREAM",
            EngagementEvent::SkipCardShown => "SKIP_CARD_SHOWN",
            EngagementEvent::AdCompleted => "AD_COMPLETED",
            EngagementEvent::AdError => "AD_ERROR",
            EngagementEvent::NoAdsAvailable => "NO_ADS_AVAILABLE",
        }
    }
}

/// A live engagement instance.
pub trait EngagementRenderer: Send {
    /// Begin presenting the engagement overlay.
    fn start(&mut self) -> Result<()>;

    /// Application went to background.
    fn pause(&mut self);

    /// Application returned to foreground.
    fn resume(&mut self);

    /// Abort the engagement. Must be safe to call on an already-finished
    /// renderer.
    fn stop(&mut self);
}

/// Creates renderer instances, one per engagement session.
pub trait EngagementRendererFactory: Send {
    fn create(
        &mut self,
        params: &EngagementParams,
        slot_type: SlotType,
    ) -> Result<Box<dyn EngagementRenderer>>;
}
