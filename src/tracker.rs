mod label_tracker;
mod point;
mod rect;
mod semantic;
mod track_state;

pub use label_tracker::{LabelTracker, TrackerConfig};
pub use point::NormalizedPoint;
pub use rect::BoundingBox;
pub use semantic::{LabelContent, SemanticLabel, TrackedLabel, PLACEHOLDER_TEXT};
pub use track_state::TrackState;
