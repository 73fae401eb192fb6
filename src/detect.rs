//! Local detection: the model contract, the filtering adapter, and the
//! built-in phrasebook.

pub mod lexicon;
mod local;
mod model;

pub use local::{Detection, DetectorConfig, LocalDetector};
pub use model::{DetectError, DetectionModel, RawDetection};
