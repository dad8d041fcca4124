//! Hysteresis-damped position tracking.

use nalgebra::Point2;
use tracing::debug;

use crate::tracker::direction::{Direction, classify};
use crate::tracker::selector::Selection;
use crate::tracker::track_state::TrackState;

/// Dead-zone radius, per axis, within which movement is treated as noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HysteresisConfig {
    pub offset_x: i32,
    pub offset_y: i32,
}

impl Default for HysteresisConfig {
    fn default() -> Self {
        Self {
            offset_x: 100,
            offset_y: 100,
        }
    }
}

impl HysteresisConfig {
    /// Whether `new` stays inside the dead zone around `old` on both axes.
    #[inline]
    pub fn within(&self, new: Point2<i32>, old: Point2<i32>) -> bool {
        // Widened so that any pair of i32 coordinates has a finite delta.
        let delta = new.cast::<i64>() - old.cast::<i64>();
        delta.x.unsigned_abs() < u64::from(self.offset_x.unsigned_abs())
            && delta.y.unsigned_abs() < u64::from(self.offset_y.unsigned_abs())
    }
}

/// Sole owner of the [`TrackState`].
#[derive(Debug, Clone, Default)]
pub struct PositionTracker {
    state: TrackState,
    hysteresis: HysteresisConfig,
}

impl PositionTracker {
    pub fn new(hysteresis: HysteresisConfig) -> Self {
        Self {
            state: TrackState::new(),
            hysteresis,
        }
    }

    pub fn state(&self) -> &TrackState {
        &self.state
    }

    pub fn hysteresis(&self) -> HysteresisConfig {
        self.hysteresis
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Feed one frame's selection and return the direction to report, if any.
    ///
    /// - `TargetLost` resets the state.
    /// - `Rejected` leaves the state untouched.
    /// - `Accepted` updates the state exactly once, classifying the move only
    ///   when a baseline exists and the move leaves the dead zone.
    pub fn observe(&mut self, selection: &Selection) -> Option<Direction> {
        match selection {
            Selection::TargetLost => {
                if !self.state.is_sentinel() {
                    debug!(last = ?self.state.last(), "target lost, resetting track");
                }
                self.state.reset();
                None
            }
            Selection::Rejected(_) => None,
            Selection::Accepted(bbox) => {
                let new = bbox.top_left();
                let old = self.state.last();

                let direction = if self.state.is_sentinel() {
                    debug!(x = new.x, y = new.y, "acquired baseline");
                    None
                } else if self.hysteresis.within(new, old) {
                    None
                } else {
                    classify(new, old)
                };

                self.state.update(new);
                direction
            }
        }
    }
}
