//! Single-object color tracking with coarse direction reporting.
//!
//! Each frame yields an ordered list of candidate [`BoundingBox`]es. The
//! [`DirectionTracker`] looks at the first one, keeps a hysteresis-damped
//! last-known position and reports [`Direction`] events to a
//! [`DirectionSink`] whenever the object moves far enough.

pub mod config;
pub mod error;
pub mod integration;
pub mod session;
pub mod tracker;

pub use config::{PreprocessConfig, TrackerConfig};
pub use error::{ConfigError, ExtractError, SessionError};
pub use integration::{
    ColorRegionSource, DirectionSink, Frame, LogSink, OutlineRenderer, OverlayRenderer,
    RegionSource, TrackerPipeline,
};
pub use session::{FrameSource, SessionHandle, StopReport, TrackingSession};
pub use tracker::{
    BoundingBox, Direction, DirectionTracker, FrameReport, HysteresisConfig, PositionTracker,
    RegionSelector, Selection, SizeBounds, TrackState,
};
