//! Ad timeline source capability
//!
//! The stream-request / ad-break-detection subsystem (the stitched-manifest
//! SDK) is an external collaborator. Its listener-per-event surface is
//! reframed here as one closed event vocabulary, [`AdTimelineEvent`],
//! delivered to the coordinator on a single serialized callback path.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One ad-break boundary as reported by the timeline source.
///
/// Offsets arrive in seconds; the registry converts to integer milliseconds
/// on ingest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CuePoint {
    pub start_offset_seconds: f64,
    pub duration_seconds: f64,
    pub played: bool,
}

/// Progress through the currently playing ad, when one is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdProgress {
    pub current_time_seconds: f64,
    pub duration_seconds: f64,
    /// Total duration of the enclosing ad break
    pub ad_break_duration_seconds: f64,
    /// 1-based position of the ad within its pod
    pub ad_position: usize,
    pub total_ads: usize,
}

/// Metadata for the enclosing ad pod, attached to every ad-start signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdPodInfo {
    /// Pod start offset on the raw stream timeline, in seconds
    pub time_offset_seconds: f64,
    pub duration_seconds: f64,
    pub max_duration_seconds: f64,
    /// 0 = preroll slot, anything else is a midroll
    pub pod_index: usize,
}

/// A companion/side-channel resource attached to an ad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanionInfo {
    pub api_framework: Option<String>,
    /// Static resource value; engagement placeholders carry a base64 JSON
    /// data URL here
    pub resource_value: String,
}

/// Metadata carried by an ad-start signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdStartInfo {
    pub ad_id: String,
    pub ad_system: String,
    /// Duration of this single ad, in seconds
    pub duration_seconds: f64,
    pub description: Option<String>,
    pub companions: Vec<CompanionInfo>,
    pub pod: AdPodInfo,
}

/// Event feed from the ad timeline source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AdTimelineEvent {
    /// Stitched manifest resolved; the player should load and start it.
    StreamLoaded { url: String },

    /// The known ad-break set changed.
    CuePointsChanged { cue_points: Vec<CuePoint> },

    /// Playback entered an ad break.
    AdBreakStarted,

    /// An individual ad within the current break started.
    AdStarted { ad: AdStartInfo },

    /// Playback left the current ad break.
    AdBreakEnded,

    /// Unrecoverable manifest / ad-break request failure.
    LoadFailed { message: String },
}

/// Stream-request and ad-timeline query surface.
pub trait AdTimelineSource: Send {
    /// Request the stitched stream. Load results (or failures) arrive later
    /// as [`AdTimelineEvent`]s.
    fn request_stream(&mut self) -> Result<()>;

    /// Currently known cue points, if the manifest has loaded.
    fn cue_points(&self) -> Vec<CuePoint>;

    /// Progress through the current ad, if one is playing.
    fn current_ad_progress(&self) -> Option<AdProgress>;

    /// Destroy the source session. Must be safe to call more than once.
    fn destroy(&mut self);
}
