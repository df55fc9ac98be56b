//! Stream-time / content-time mapping
//!
//! Content time is stream time with all fully-elapsed ad breaks discounted.
//! The mapping is a pure function of the current break set; it holds no
//! player state and can be tested standalone.
//!
//! Inside an ad break the content clock does not advance, so `to_content_time`
//! clamps to the break start's content time there. Callers use the in-break
//! mapping only for seek resolution, never for position display.

use crate::timeline::break_registry::AdBreak;
use crate::timeline::position::StreamPosition;

/// Read-only mapping view over a sorted ad-break slice.
///
/// Obtained from [`AdBreakRegistry::timeline`](crate::timeline::AdBreakRegistry::timeline).
#[derive(Debug, Clone, Copy)]
pub struct StreamTimeline<'a> {
    breaks: &'a [AdBreak],
}

impl<'a> StreamTimeline<'a> {
    pub fn new(breaks: &'a [AdBreak]) -> Self {
        Self { breaks }
    }

    /// Map a raw stream position to content-relative milliseconds.
    ///
    /// With no known breaks this is the identity function.
    pub fn to_content_time(&self, stream: StreamPosition) -> u64 {
        let mut ad_millis = 0u64;
        for b in self.breaks {
            if b.end() <= stream {
                ad_millis += b.duration_ms;
            } else if b.start <= stream {
                // Inside the break: clamp to the break start's content time.
                return b.start.millis().saturating_sub(ad_millis);
            } else {
                break;
            }
        }
        stream.millis().saturating_sub(ad_millis)
    }

    /// Map content-relative milliseconds back to a raw stream position.
    ///
    /// A content instant on a break boundary maps past the break, so the
    /// result never lands inside stitched ad content.
    pub fn to_stream_time(&self, content_ms: u64) -> StreamPosition {
        let mut ad_millis = 0u64;
        for b in self.breaks {
            let content_start = b.start.millis().saturating_sub(ad_millis);
            if content_ms >= content_start {
                ad_millis += b.duration_ms;
            } else {
                break;
            }
        }
        StreamPosition::from_millis(content_ms + ad_millis)
    }

    /// Total stitched ad time, in milliseconds.
    pub fn total_ad_millis(&self) -> u64 {
        self.breaks.iter().map(|b| b.duration_ms).sum()
    }
}
