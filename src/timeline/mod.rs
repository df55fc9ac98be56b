//! Stream timeline model: positions, ad breaks, and time mapping.

pub mod break_registry;
pub mod mapper;
pub mod position;

pub use break_registry::{AdBreak, AdBreakRegistry};
pub use mapper::StreamTimeline;
pub use position::StreamPosition;
