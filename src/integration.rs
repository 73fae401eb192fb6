//! Integration layer: the camera frame contract, the end-to-end pipeline,
//! and overlay geometry.

mod frame;
mod overlay;
mod pipeline;

pub use frame::{Frame, FrameError, FrameSource, StubFrameSource};
pub use overlay::{layout, OverlayLabel, Viewport};
pub use pipeline::{PipelineConfig, TrackerPipeline};
