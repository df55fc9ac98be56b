//! Ad break registry
//!
//! Tracks the known ad breaks for the current stream: start offset, duration,
//! and whether the viewer has already sat through them. The registry is the
//! single source of truth the seek guard queries, and it is refreshed in
//! place whenever the ad timeline source reports a new cue-point set.

use tracing::debug;

use crate::source::CuePoint;
use crate::timeline::mapper::StreamTimeline;
use crate::timeline::position::StreamPosition;

/// A contiguous span of stitched advertisement content.
///
/// Identity is the start offset; breaks are ordered and non-overlapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdBreak {
    /// Start offset on the raw stream timeline
    pub start: StreamPosition,

    /// Break duration in milliseconds
    pub duration_ms: u64,

    /// True once playback has passed the break or it was skipped via credit
    pub played: bool,

    /// Ordinal of the break within the stream (0 = preroll slot)
    pub pod_index: usize,
}

impl AdBreak {
    /// First position past the break.
    pub fn end(&self) -> StreamPosition {
        self.start.add_millis(self.duration_ms)
    }

    /// Whether the position falls inside the break interval `[start, end)`.
    pub fn contains(&self, position: StreamPosition) -> bool {
        position >= self.start && position < self.end()
    }
}

/// Registry of known ad breaks, sorted by start offset.
#[derive(Debug, Clone, Default)]
pub struct AdBreakRegistry {
    breaks: Vec<AdBreak>,
}

impl AdBreakRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the known break set from a cue-point report.
    ///
    /// `played` flags already recorded locally are preserved for breaks that
    /// still match by start offset, so a cue-point refresh can never
    /// "un-watch" a break the viewer already earned.
    pub fn update_from_cue_points(&mut self, cue_points: &[CuePoint]) {
        let previous = std::mem::take(&mut self.breaks);

        let mut breaks: Vec<AdBreak> = cue_points
            .iter()
            .map(|cue| {
                let start = StreamPosition::from_seconds(cue.start_offset_seconds);
                let locally_played = previous
                    .iter()
                    .any(|b| b.start == start && b.played);
                AdBreak {
                    start,
                    duration_ms: StreamPosition::from_seconds(cue.duration_seconds).millis(),
                    played: cue.played || locally_played,
                    pod_index: 0,
                }
            })
            .collect();

        breaks.sort_by_key(|b| b.start);
        for (i, b) in breaks.iter_mut().enumerate() {
            b.pod_index = i;
        }

        debug!("ad break registry updated: {} breaks", breaks.len());
        self.breaks = breaks;
    }

    /// Nearest break whose start is at or before `position` and which has not
    /// been played, if any.
    ///
    /// The tie-break matters: among unplayed candidates this returns the one
    /// with the greatest start offset, which is what makes snapback land on
    /// the break the viewer is actually trying to scrub past.
    pub fn previous_unplayed_break_before(&self, position: StreamPosition) -> Option<&AdBreak> {
        self.breaks
            .iter()
            .filter(|b| !b.played && b.start <= position)
            .max_by_key(|b| b.start)
    }

    /// The break containing `position`, if any.
    pub fn break_containing(&self, position: StreamPosition) -> Option<&AdBreak> {
        self.breaks.iter().find(|b| b.contains(position))
    }

    /// Mark the break starting at `start` as played. Idempotent; returns
    /// true if a matching break exists.
    pub fn mark_played(&mut self, start: StreamPosition) -> bool {
        match self.breaks.iter_mut().find(|b| b.start == start) {
            Some(b) => {
                if !b.played {
                    b.played = true;
                    debug!("ad break at {} marked played", b.start);
                }
                true
            }
            None => false,
        }
    }

    /// Pure time-mapping view over the current break set.
    pub fn timeline(&self) -> StreamTimeline<'_> {
        StreamTimeline::new(&self.breaks)
    }

    pub fn breaks(&self) -> &[AdBreak] {
        &self.breaks
    }

    pub fn len(&self) -> usize {
        self.breaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breaks.is_empty()
    }
}
