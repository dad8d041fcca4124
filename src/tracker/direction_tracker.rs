//! Per-frame tracking entry point.

use crate::config::TrackerConfig;
use crate::integration::DirectionSink;
use crate::tracker::direction::Direction;
use crate::tracker::position_tracker::{HysteresisConfig, PositionTracker};
use crate::tracker::rect::BoundingBox;
use crate::tracker::selector::{RegionSelector, Selection, SizeBounds};
use crate::tracker::track_state::TrackState;

/// What a single frame produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub selection: Selection,
    /// Direction delivered to the sink for this frame, if any.
    pub direction: Option<Direction>,
}

impl FrameReport {
    /// The box to hand to an overlay renderer.
    pub fn accepted(&self) -> Option<BoundingBox> {
        self.selection.accepted()
    }
}

/// Runs selection, position tracking and classification for each frame.
#[derive(Debug, Clone, Default)]
pub struct DirectionTracker {
    selector: RegionSelector,
    position: PositionTracker,
    frame_id: u64,
}

impl DirectionTracker {
    pub fn new(bounds: SizeBounds, hysteresis: HysteresisConfig) -> Self {
        Self {
            selector: RegionSelector::new(bounds),
            position: PositionTracker::new(hysteresis),
            frame_id: 0,
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.size_bounds(), config.hysteresis())
    }

    /// Process one frame's candidates, in extractor order.
    ///
    /// At most one direction is reported to `sink`, synchronously, before
    /// this returns.
    pub fn update<S>(&mut self, candidates: &[BoundingBox], sink: &mut S) -> FrameReport
    where
        S: DirectionSink + ?Sized,
    {
        self.frame_id += 1;

        let selection = self.selector.select(candidates);
        let direction = self.position.observe(&selection);
        if let Some(direction) = direction {
            sink.report(direction);
        }

        FrameReport {
            selection,
            direction,
        }
    }

    /// Drop the current target and start over, as when a session ends.
    pub fn reset(&mut self) {
        self.position.reset();
        self.frame_id = 0;
    }

    pub fn state(&self) -> &TrackState {
        self.position.state()
    }

    pub fn selector(&self) -> &RegionSelector {
        &self.selector
    }

    pub fn hysteresis(&self) -> HysteresisConfig {
        self.position.hysteresis()
    }

    /// Number of frames processed since creation or the last reset.
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_carries_accepted_box() {
        let mut tracker = DirectionTracker::default();
        let mut events: Vec<Direction> = Vec::new();

        let bbox = BoundingBox::new(150, 150, 150, 150);
        let report = tracker.update(&[bbox], &mut events);
        assert_eq!(report.accepted(), Some(bbox));
        assert_eq!(report.direction, None);

        let report = tracker.update(&[BoundingBox::new(150, 20, 150, 150)], &mut events);
        assert_eq!(report.direction, Some(Direction::Up));
        assert_eq!(events, vec![Direction::Up]);
        assert_eq!(tracker.frame_id(), 2);
    }

    #[test]
    fn test_rejected_frame_has_nothing_to_render() {
        let mut tracker = DirectionTracker::default();
        let mut events: Vec<Direction> = Vec::new();
        let report = tracker.update(&[BoundingBox::new(0, 0, 5, 5)], &mut events);
        assert_eq!(report.accepted(), None);
        assert!(events.is_empty());
    }

    #[test]
    fn test_reset_clears_state() {
        let mut tracker = DirectionTracker::default();
        let mut events: Vec<Direction> = Vec::new();
        tracker.update(&[BoundingBox::new(150, 150, 150, 150)], &mut events);
        tracker.reset();
        assert!(tracker.state().is_sentinel());
        assert_eq!(tracker.frame_id(), 0);
    }
}
