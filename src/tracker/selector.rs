//! Per-frame candidate selection.

use crate::tracker::rect::BoundingBox;

/// Open interval a candidate's width and height must both fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBounds {
    pub min_size: i32,
    pub max_size: i32,
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self {
            min_size: 100,
            max_size: 300,
        }
    }
}

impl SizeBounds {
    pub fn new(min_size: i32, max_size: i32) -> Self {
        Self { min_size, max_size }
    }

    /// Strict on both ends.
    #[inline]
    pub fn admits(&self, bbox: &BoundingBox) -> bool {
        self.min_size < bbox.height
            && bbox.height < self.max_size
            && self.min_size < bbox.width
            && bbox.width < self.max_size
    }
}

/// Outcome of selecting from one frame's candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The frame produced no candidates at all.
    TargetLost,
    /// The first candidate fell outside the size bounds.
    Rejected(BoundingBox),
    /// The first candidate passed the size filter.
    Accepted(BoundingBox),
}

impl Selection {
    pub fn accepted(&self) -> Option<BoundingBox> {
        match self {
            Selection::Accepted(bbox) => Some(*bbox),
            _ => None,
        }
    }
}

/// Picks at most one candidate per frame.
///
/// Only the first candidate in extractor order is examined. This is a
/// single-object tracker: later candidates are never considered, even when
/// the first is rejected.
#[derive(Debug, Clone, Default)]
pub struct RegionSelector {
    bounds: SizeBounds,
}

impl RegionSelector {
    pub fn new(bounds: SizeBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> SizeBounds {
        self.bounds
    }

    pub fn select(&self, candidates: &[BoundingBox]) -> Selection {
        match candidates.first() {
            None => Selection::TargetLost,
            Some(first) if self.bounds.admits(first) => Selection::Accepted(*first),
            Some(first) => Selection::Rejected(*first),
        }
    }
}
