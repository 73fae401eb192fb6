//! Trait for local object-detection model backends.

use thiserror::Error;

use crate::tracker::BoundingBox;

/// Error type for local detection failures.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The model could not be loaded.
    #[error("model load failed: {0}")]
    Load(String),
    /// Inference was attempted before the model finished loading.
    #[error("model not loaded")]
    NotLoaded,
    /// Input pixel buffer does not match the stated dimensions.
    #[error("invalid input: expected {expected} bytes for {width}x{height}, got {got}")]
    InvalidInput {
        expected: usize,
        got: usize,
        width: u32,
        height: u32,
    },
    /// Model inference failed.
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Raw detection output from the model.
#[derive(Debug, Clone)]
pub struct RawDetection {
    /// Class name as reported by the model (e.g. "cup", "cell phone").
    pub class: String,
    /// Bounding box in source-frame pixels (TLWH).
    pub bbox: BoundingBox,
    /// Confidence score in [0, 1].
    pub score: f32,
}

/// Trait for local object-detection model backends.
///
/// Implement this trait to connect a pre-trained detection model to the
/// label tracker.
///
/// # Example
///
/// ```ignore
/// use labeltrack_rs::detect::{DetectionModel, DetectError, RawDetection};
///
/// struct MyModel {
///     // Your model here
/// }
///
/// impl DetectionModel for MyModel {
///     fn load(&mut self) -> Result<(), DetectError> {
///         // Load weights once
///         Ok(())
///     }
///
///     fn infer(&mut self, pixels: &[u8], width: u32, height: u32)
///         -> Result<Vec<RawDetection>, DetectError>
///     {
///         // Run inference and return detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionModel: Send {
    /// Load the model. Called at most once by the adapter.
    fn load(&mut self) -> Result<(), DetectError>;

    /// Run inference on raw RGB8 pixels and return all detections.
    fn infer(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<RawDetection>, DetectError>;
}
