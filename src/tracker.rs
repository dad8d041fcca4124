mod direction;
mod direction_tracker;
mod position_tracker;
mod rect;
mod selector;
mod track_state;

pub use direction::{Direction, classify};
pub use direction_tracker::{DirectionTracker, FrameReport};
pub use position_tracker::{HysteresisConfig, PositionTracker};
pub use rect::BoundingBox;
pub use selector::{RegionSelector, Selection, SizeBounds};
pub use track_state::TrackState;
