//! Hybrid local/remote label tracker for live camera translation overlays.
//!
//! Fuses two signals of very different character into one stable on-screen
//! label: a fast, noisy positional signal from a local object detector (every
//! rendered frame) and a slow, authoritative semantic signal from a remote
//! vision classifier (every couple of seconds, rate-limited). The label moves
//! with the object every frame while classification is paid for sparingly.
//!
//! - [`tracker`]: the core state machine with exponential position
//!   smoothing, grace-period hysteresis, and the semantic label lifecycle.
//! - [`detect`]: the local detection model contract and filtering adapter.
//! - [`classify`]: throttle/single-flight/backoff gating, the remote
//!   client, and snapshot encoding.
//! - [`integration`]: the camera frame contract, the end-to-end pipeline,
//!   and overlay geometry.

pub mod classify;
pub mod config;
pub mod detect;
pub mod integration;
pub mod language;
pub mod tracker;

pub use classify::{ClassifyConfig, ClassifyError, ClassifyGate, VisionClient, VisionClientConfig};
pub use config::RuntimeConfig;
pub use detect::{DetectionModel, LocalDetector, RawDetection};
pub use integration::{Frame, FrameSource, PipelineConfig, TrackerPipeline, Viewport};
pub use language::TargetLanguage;
pub use tracker::{LabelTracker, SemanticLabel, TrackedLabel, TrackerConfig};
