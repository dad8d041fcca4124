use nalgebra::Point2;

/// Axis-aligned pixel rectangle describing one candidate region.
///
/// Coordinates are integer pixels with a top-left origin (TLWH format):
/// - `x`, `y`: top-left corner
/// - `width`, `height`: extent towards the bottom-right
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    /// Top-left x coordinate
    pub x: i32,
    /// Top-left y coordinate
    pub y: i32,
    /// Width of the bounding box
    pub width: i32,
    /// Height of the bounding box
    pub height: i32,
}

impl BoundingBox {
    /// Create a new box from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a box from inclusive pixel extents `(x1, y1)..=(x2, y2)`.
    ///
    /// This is the tight box around a set of pixels, so a single pixel
    /// yields a 1x1 box.
    #[inline]
    pub fn from_extents(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1 + 1,
            height: y2 - y1 + 1,
        }
    }

    /// The top-left corner, which is the position the tracker follows.
    #[inline]
    pub fn top_left(&self) -> Point2<i32> {
        Point2::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_left() {
        let bbox = BoundingBox::new(10, 20, 30, 40);
        assert_eq!(bbox.top_left(), Point2::new(10, 20));
    }

    #[test]
    fn test_from_extents() {
        let bbox = BoundingBox::from_extents(10, 20, 39, 59);
        assert_eq!(bbox, BoundingBox::new(10, 20, 30, 40));

        let pixel = BoundingBox::from_extents(5, 5, 5, 5);
        assert_eq!(pixel, BoundingBox::new(5, 5, 1, 1));
    }
}
