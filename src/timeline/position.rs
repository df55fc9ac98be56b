//! Stream position arithmetic
//!
//! A stream position is always stored as integer milliseconds. Seconds only
//! exist at the edges (cue-point reports, pod metadata) and are converted by
//! flooring, so a derived position can never land past a segment boundary.

use std::fmt;

/// An absolute instant on the raw (ad-stitched) stream timeline, in
/// milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StreamPosition(u64);

impl StreamPosition {
    pub const ZERO: StreamPosition = StreamPosition(0);

    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Convert a seconds value (as reported by the ad timeline) to a
    /// position. Negative inputs clamp to zero; fractional milliseconds are
    /// floored.
    pub fn from_seconds(seconds: f64) -> Self {
        Self((seconds.max(0.0) * 1000.0).floor() as u64)
    }

    pub fn millis(self) -> u64 {
        self.0
    }

    pub fn seconds(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    pub fn add_millis(self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    pub fn sub_millis(self, millis: u64) -> Self {
        Self(self.0.saturating_sub(millis))
    }

    pub fn add_seconds(self, seconds: f64) -> Self {
        self.add_millis(StreamPosition::from_seconds(seconds).0)
    }

    pub fn sub_seconds(self, seconds: f64) -> Self {
        self.sub_millis(StreamPosition::from_seconds(seconds).0)
    }
}

impl fmt::Display for StreamPosition {
    /// Renders as `mm:ss.mmm` for log lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.0 / 60_000;
        let seconds = (self.0 % 60_000) / 1000;
        let millis = self.0 % 1000;
        write!(f, "{:02}:{:02}.{:03}", minutes, seconds, millis)
    }
}
