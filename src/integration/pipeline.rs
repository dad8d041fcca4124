//! TrackerPipeline for combining region extraction with tracking.

use crate::config::TrackerConfig;
use crate::tracker::{DirectionTracker, FrameReport};

use super::{DirectionSink, RegionSource};

/// Bundles a [`RegionSource`] with the [`DirectionTracker`].
///
/// This is the per-frame unit of work a session runs on every tick.
pub struct TrackerPipeline<R: RegionSource> {
    source: R,
    tracker: DirectionTracker,
}

impl<R: RegionSource> TrackerPipeline<R> {
    /// Create a new pipeline from a region source and tracker config.
    pub fn new(source: R, config: &TrackerConfig) -> Self {
        Self {
            source,
            tracker: DirectionTracker::from_config(config),
        }
    }

    /// Create a new pipeline with default tracker configuration.
    pub fn with_default_config(source: R) -> Self {
        Self::new(source, &TrackerConfig::default())
    }

    /// Extract regions from one frame and feed them to the tracker.
    ///
    /// Any direction is reported to `sink` before this returns. Extraction
    /// errors leave the tracker untouched.
    pub fn process_frame<S>(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
        sink: &mut S,
    ) -> Result<FrameReport, R::Error>
    where
        S: DirectionSink + ?Sized,
    {
        let regions = self.source.regions(input, width, height)?;
        Ok(self.tracker.update(&regions, sink))
    }

    /// Get a reference to the underlying region source.
    pub fn source(&self) -> &R {
        &self.source
    }

    /// Get a mutable reference to the underlying region source.
    pub fn source_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &DirectionTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut DirectionTracker {
        &mut self.tracker
    }
}
