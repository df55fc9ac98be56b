//! Seek guard
//!
//! Mediates every user seek against the ad break registry. A seek that would
//! scrub past an unwatched break is snapped back to the break start and the
//! originally requested position is remembered; once the break clears (played
//! through or skipped via credit) the guard hands the resume target back for
//! a single follow-up seek. While snapped, further seeks are rejected.

use tracing::debug;

use crate::player::SeekIntent;
use crate::timeline::{AdBreakRegistry, StreamPosition};

/// Guard states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Seeks flow through to the player unmodified
    Passthrough,
    /// A snapback is pending; seeks are rejected until the break clears
    Snapped,
}

/// What to do with a seek intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekDecision {
    /// Forward the seek to the player unmodified
    Forward(StreamPosition),
    /// Redirect the seek to the start of an intervening unplayed break
    Snap { break_start: StreamPosition },
    /// Drop the seek; the pending break must finish first
    Rejected,
}

/// Two-state snapback machine.
#[derive(Debug, Default)]
pub struct SeekGuard {
    resume_target: Option<StreamPosition>,
}

impl SeekGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GuardState {
        if self.resume_target.is_some() {
            GuardState::Snapped
        } else {
            GuardState::Passthrough
        }
    }

    /// The originally requested position, while snapped.
    pub fn resume_target(&self) -> Option<StreamPosition> {
        self.resume_target
    }

    /// Decide what to do with a seek intent.
    pub fn evaluate(&mut self, intent: SeekIntent, registry: &AdBreakRegistry) -> SeekDecision {
        if self.resume_target.is_some() {
            debug!("seek to {} rejected: snapback pending", intent.position);
            return SeekDecision::Rejected;
        }

        match registry.previous_unplayed_break_before(intent.position) {
            Some(ad_break) => {
                self.resume_target = Some(intent.position);
                SeekDecision::Snap {
                    break_start: ad_break.start,
                }
            }
            None => SeekDecision::Forward(intent.position),
        }
    }

    /// The pending break cleared (played through or skipped via credit).
    ///
    /// Returns the recorded resume target, if any, for one follow-up seek,
    /// and transitions back to passthrough. A no-op in passthrough.
    pub fn clear(&mut self) -> Option<StreamPosition> {
        self.resume_target.take()
    }
}
