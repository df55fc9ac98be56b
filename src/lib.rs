//! # AdWeave
//!
//! Playback coordination for server-side ad-stitched streams with
//! interactive engagement splicing, including:
//! - Stream/content time mapping over the ad break registry
//! - Seek snapback guard for unwatched ad breaks
//! - Placeholder-ad recognition and engagement launch
//! - Engagement outcome resolution (credit / no-credit)
//! - Playback lifecycle management and teardown ordering
//!
//! The coordinator is deliberately abstract over its surroundings: the
//! stream player, the ad timeline source, and the engagement renderer are
//! all traits, so the crate carries no player SDK or UI dependency.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod player;
pub mod renderer;
pub mod source;
pub mod timeline;

pub use config::{CoordinatorConfig, RecognitionConfig};
pub use coordinator::{PlaybackCoordinator, PlaybackMode};
pub use error::{Error, Result};
pub use events::CoordinatorEvent;
pub use timeline::StreamPosition;
