//! Dominant-axis direction classification.

use std::cmp::Ordering;
use std::fmt;

use nalgebra::Point2;

/// Coarse direction of frame-to-frame motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify the move from `old` to `new` along its dominant axis.
///
/// Displacement is taken as `old - new`. On the x axis a positive value is
/// `Right`, on the y axis a positive value (new y smaller than old y) is
/// `Up`. Equal magnitudes on both axes, including no movement at all,
/// yield `None`.
pub fn classify(new: Point2<i32>, old: Point2<i32>) -> Option<Direction> {
    let disp = old.cast::<i64>() - new.cast::<i64>();

    match disp.x.unsigned_abs().cmp(&disp.y.unsigned_abs()) {
        Ordering::Equal => None,
        Ordering::Greater => match disp.x.signum() {
            1 => Some(Direction::Right),
            -1 => Some(Direction::Left),
            _ => None,
        },
        Ordering::Less => match disp.y.signum() {
            1 => Some(Direction::Up),
            -1 => Some(Direction::Down),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point2<i32> {
        Point2::new(x, y)
    }

    #[test]
    fn test_horizontal_polarity() {
        // Moving to larger x gives negative old-minus-new displacement.
        assert_eq!(classify(p(260, 150), p(150, 150)), Some(Direction::Left));
        assert_eq!(classify(p(40, 150), p(150, 150)), Some(Direction::Right));
    }

    #[test]
    fn test_vertical_polarity() {
        assert_eq!(classify(p(150, 20), p(150, 150)), Some(Direction::Up));
        assert_eq!(classify(p(150, 300), p(150, 150)), Some(Direction::Down));
    }

    #[test]
    fn test_dominant_axis_wins() {
        assert_eq!(classify(p(100, 250), p(200, 100)), Some(Direction::Down));
        assert_eq!(classify(p(0, 180), p(200, 100)), Some(Direction::Right));
    }

    #[test]
    fn test_ties_yield_nothing() {
        assert_eq!(classify(p(100, 100), p(100, 100)), None);
        assert_eq!(classify(p(250, 250), p(100, 100)), None);
        assert_eq!(classify(p(250, -50), p(100, 100)), None);
    }

    #[test]
    fn test_full_range_displacement() {
        assert_eq!(classify(p(i32::MIN, 0), p(i32::MAX, 0)), Some(Direction::Right));
        assert_eq!(classify(p(0, i32::MAX), p(0, i32::MIN)), Some(Direction::Down));
        assert_eq!(classify(p(i32::MIN, i32::MIN), p(i32::MAX, i32::MAX)), None);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<String> = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
        .iter()
        .map(|d| d.to_string())
        .collect();
        assert_eq!(labels, ["Up", "Down", "Left", "Right"]);
    }
}
