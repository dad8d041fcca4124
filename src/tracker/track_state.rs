use nalgebra::Point2;

/// Last-known position of the tracked object.
///
/// The origin is a reserved sentinel meaning "no target tracked". An object
/// whose top-left corner genuinely sits at `(0, 0)` is indistinguishable
/// from a lost target and will be re-acquired as a fresh baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackState {
    last: Point2<i32>,
}

impl Default for TrackState {
    fn default() -> Self {
        Self {
            last: Point2::origin(),
        }
    }
}

impl TrackState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last accepted position, `(0, 0)` while nothing is tracked.
    #[inline]
    pub fn last(&self) -> Point2<i32> {
        self.last
    }

    #[inline]
    pub fn last_x(&self) -> i32 {
        self.last.x
    }

    #[inline]
    pub fn last_y(&self) -> i32 {
        self.last.y
    }

    /// Whether the state holds the "no target" sentinel.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.last == Point2::origin()
    }

    /// Forget the target.
    pub fn reset(&mut self) {
        self.last = Point2::origin();
    }

    /// Record a newly accepted position.
    pub fn update(&mut self, position: Point2<i32>) {
        self.last = position;
    }
}
