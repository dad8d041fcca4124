//! Collaborators that surround the tracking core.
//!
//! This module provides the frame type, color preprocessing, region
//! extraction, overlay rendering and direction sinks, together with a
//! pipeline that wires a [`RegionSource`] to the [`DirectionTracker`].
//!
//! [`DirectionTracker`]: crate::tracker::DirectionTracker

mod extractor;
mod frame;
mod overlay;
mod pipeline;
pub mod preprocess;
mod sink;

pub use extractor::{ColorRegionSource, RegionSource, extract_regions};
pub use frame::Frame;
pub use overlay::{OutlineRenderer, OverlayRenderer};
pub use pipeline::TrackerPipeline;
pub use preprocess::{HsvRange, Preprocessor};
pub use sink::{DirectionSink, LogSink};
