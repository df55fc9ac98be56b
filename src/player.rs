//! Stream player capability
//!
//! The underlying media engine (decode, render, buffering) is an external
//! collaborator. The coordinator only needs the control surface below, plus
//! the convention that raw user seeks are routed through
//! [`PlaybackCoordinator::seek`](crate::coordinator::PlaybackCoordinator::seek)
//! instead of reaching the player directly, so they can be vetoed or
//! redirected before the player sees them.

use crate::error::Result;
use crate::timeline::StreamPosition;

/// A user-initiated seek, as produced by the player's seek-interception hook.
///
/// Ephemeral: consumed synchronously by the seek guard, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekIntent {
    /// Requested raw stream position
    pub position: StreamPosition,

    /// Timeline window the seek targets
    pub window_index: usize,
}

impl SeekIntent {
    pub fn new(position: StreamPosition, window_index: usize) -> Self {
        Self {
            position,
            window_index,
        }
    }
}

/// Control surface of the underlying stream player.
///
/// Calls are commands into the player and must not block; playback state
/// changes are reported back asynchronously through the integration's own
/// event plumbing.
pub trait StreamPlayer: Send {
    /// Prepare the stitched stream manifest for playback.
    fn load(&mut self, url: &str) -> Result<()>;

    fn play(&mut self);

    fn pause(&mut self);

    fn seek_to(&mut self, position: StreamPosition);

    fn seek_in_window(&mut self, window_index: usize, position: StreamPosition);

    /// Tear down the player. Must be safe to call more than once.
    fn release(&mut self);

    fn current_position(&self) -> StreamPosition;

    fn duration_ms(&self) -> u64;

    /// Show or hide the player surface (hidden while an engagement overlay
    /// is presented).
    fn set_visible(&mut self, visible: bool);

    /// Enable or disable transport controls (disabled during linear ad
    /// breaks).
    fn set_controls_enabled(&mut self, enabled: bool);
}
