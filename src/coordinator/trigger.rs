//! Engagement trigger
//!
//! Inspects each ad-start signal and decides whether the starting ad is a
//! placeholder for an interactive engagement. Recognition is a pluggable
//! policy because the sentinel values vary per environment and SDK version;
//! the bundled [`SentinelPolicy`] covers the known heuristics: ad-system tag
//! match, companion API-framework tag match, and description config-URL
//! match.

use base64::Engine;
use tracing::{debug, info, warn};

use crate::config::{CoordinatorConfig, RecognitionConfig};
use crate::coordinator::core::PlaybackCoordinator;
use crate::coordinator::session::EngagementSession;
use crate::coordinator::PlaybackMode;
use crate::renderer::{EngagementParams, SlotType};
use crate::source::AdStartInfo;
use crate::timeline::StreamPosition;

const JSON_DATA_URL_PREFIX: &str = "data:application/json;base64,";

/// Post-engagement seek targets, precomputed at recognition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeTargets {
    /// Just past the placeholder ad itself, pulled back so the player does
    /// not surface a frozen last frame
    pub after_opt_out: StreamPosition,

    /// Just past the whole ad pod, pushed forward so the player does not
    /// surface a frozen first frame of the next segment
    pub after_credit: StreamPosition,
}

/// Compute both resume targets for a recognized placeholder ad.
pub fn compute_resume_targets(ad: &AdStartInfo, config: &CoordinatorConfig) -> ResumeTargets {
    let pod_start = StreamPosition::from_seconds(ad.pod.time_offset_seconds);
    ResumeTargets {
        after_opt_out: pod_start
            .add_seconds(ad.duration_seconds)
            .sub_millis(config.placeholder_exit_backoff_ms),
        after_credit: pod_start
            .add_seconds(ad.pod.max_duration_seconds)
            .add_millis(config.credit_resume_nudge_ms),
    }
}

/// Decides whether an ad-start signal is an engagement placeholder and, if
/// so, extracts the engagement parameters.
pub trait PlaceholderPolicy: Send {
    /// `None` means the ad is ordinary linear content and plays normally.
    fn recognize(&self, ad: &AdStartInfo) -> Option<EngagementParams>;
}

/// Sentinel-based recognition, configured from [`RecognitionConfig`].
#[derive(Debug, Clone)]
pub struct SentinelPolicy {
    config: RecognitionConfig,
}

impl SentinelPolicy {
    pub fn new(config: RecognitionConfig) -> Self {
        Self { config }
    }

    /// Decode a `data:application/json;base64,` URL into structured
    /// parameters.
    fn decode_data_url(&self, resource_value: &str) -> Option<serde_json::Value> {
        let encoded = resource_value.strip_prefix(JSON_DATA_URL_PREFIX)?;
        let bytes = match base64::engine::general_purpose::STANDARD.decode(encoded) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("companion payload is not valid base64: {}", e);
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("companion payload is not valid JSON: {}", e);
                None
            }
        }
    }
}

impl PlaceholderPolicy for SentinelPolicy {
    fn recognize(&self, ad: &AdStartInfo) -> Option<EngagementParams> {
        let companion = ad
            .companions
            .iter()
            .find(|c| c.api_framework.as_deref() == Some(self.config.api_framework.as_str()));

        if ad.ad_system != self.config.ad_system && companion.is_none() {
            return None;
        }

        // Prefer the structured companion payload; fall back to a config URL
        // in the description.
        if let Some(companion) = companion {
            if let Some(params) = self.decode_data_url(&companion.resource_value) {
                return Some(EngagementParams::Inline(params));
            }
        }

        if let Some(description) = &ad.description {
            if description.contains(&self.config.config_url_marker) {
                return Some(EngagementParams::ConfigUrl(description.clone()));
            }
        }

        debug!(
            "ad {} matched a placeholder sentinel but carried no usable parameters",
            ad.ad_id
        );
        None
    }
}

impl PlaybackCoordinator {
    /// Handle an ad-start signal: if the ad is an engagement placeholder,
    /// pause and hide the player, then hand off to an engagement session.
    ///
    /// The pause → hide → start order is load-bearing; reversing it can flash
    /// the placeholder ad on screen.
    pub(super) fn on_ad_started(&mut self, ad: AdStartInfo) {
        let Some(params) = self.policy.recognize(&ad) else {
            debug!("ad {} is ordinary linear content", ad.ad_id);
            return;
        };

        if self.session.is_some() {
            warn!(
                "placeholder ad {} ignored: an engagement session is already active",
                ad.ad_id
            );
            return;
        }

        let targets = compute_resume_targets(&ad, &self.config);
        let slot_type = if ad.pod.pod_index == 0 {
            SlotType::Preroll
        } else {
            SlotType::Midroll
        };
        let break_start = self
            .active_break_start
            .unwrap_or_else(|| StreamPosition::from_seconds(ad.pod.time_offset_seconds));

        self.player.pause();
        self.player.set_visible(false);

        let renderer = match self.renderer_factory.create(&params, slot_type) {
            Ok(renderer) => renderer,
            Err(e) => {
                warn!("engagement renderer creation failed: {}; resuming linear ads", e);
                self.player.set_visible(true);
                self.player.play();
                return;
            }
        };

        let mut session = EngagementSession::new(params, slot_type, targets, break_start, renderer);
        if let Err(e) = session.start() {
            warn!("engagement failed to start: {}; resuming linear ads", e);
            self.player.set_visible(true);
            self.player.play();
            return;
        }

        info!(
            "engagement started ({}) in place of ad {}, opt-out target {}, credit target {}",
            slot_type, ad.ad_id, targets.after_opt_out, targets.after_credit
        );
        self.emit_engagement_started(session.id, slot_type);
        self.session = Some(session);
        self.set_mode(PlaybackMode::Engagement);
    }
}
