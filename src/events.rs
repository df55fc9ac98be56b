//! Coordinator event system
//!
//! Outward observability for the UI shell and tests: one broadcast bus
//! (`tokio::sync::broadcast`) carrying a serializable tagged union. The
//! coordinator emits lossily; a slow subscriber never blocks a playback
//! callback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::coordinator::PlaybackMode;
use crate::renderer::SlotType;

/// Events emitted by the playback coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CoordinatorEvent {
    /// Playback mode transition
    PlaybackModeChanged {
        old_mode: PlaybackMode,
        new_mode: PlaybackMode,
        timestamp: DateTime<Utc>,
    },

    /// Ad break set refreshed from a cue-point report
    CuePointsUpdated {
        break_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// A user seek was snapped back to an unplayed ad break
    SeekSnapped {
        requested_ms: u64,
        snapped_to_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// The recorded resume target was applied after a break cleared
    SeekResumed {
        target_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// An engagement session replaced a placeholder ad
    EngagementStarted {
        session_id: Uuid,
        slot_type: SlotType,
        timestamp: DateTime<Utc>,
    },

    /// An engagement session ended
    EngagementFinished {
        session_id: Uuid,
        credit_earned: bool,
        timestamp: DateTime<Utc>,
    },

    /// An ad break was completed or skipped via credit
    AdBreakPlayed {
        start_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// Unrecoverable playback failure; the coordinator has released itself
    PlaybackFailed {
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// Coordinator torn down
    Released { timestamp: DateTime<Utc> },
}

impl CoordinatorEvent {
    /// Get event type as string for filtering
    pub fn event_type(&self) -> &str {
        match self {
            CoordinatorEvent::PlaybackModeChanged { .. } => "PlaybackModeChanged",
            CoordinatorEvent::CuePointsUpdated { .. } => "CuePointsUpdated",
            CoordinatorEvent::SeekSnapped { .. } => "SeekSnapped",
            CoordinatorEvent::SeekResumed { .. } => "SeekResumed",
            CoordinatorEvent::EngagementStarted { .. } => "EngagementStarted",
            CoordinatorEvent::EngagementFinished { .. } => "EngagementFinished",
            CoordinatorEvent::AdBreakPlayed { .. } => "AdBreakPlayed",
            CoordinatorEvent::PlaybackFailed { .. } => "PlaybackFailed",
            CoordinatorEvent::Released { .. } => "Released",
        }
    }
}

/// One-to-many broadcast bus for [`CoordinatorEvent`]s.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<CoordinatorEvent>,
    capacity: usize,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<CoordinatorEvent> {
        self.tx.subscribe()
    }

    /// Emit an event; errors if no subscribers are listening.
    pub fn emit(&self, event: CoordinatorEvent) -> Result<usize, String> {
        self.tx
            .send(event)
            .map_err(|e| format!("No subscribers: {}", e))
    }

    /// Emit an event, silently dropping it if nobody is subscribed.
    pub fn emit_lossy(&self, event: CoordinatorEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
