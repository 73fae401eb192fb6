//! Slow-loop semantic classification: admission control, the remote client,
//! and snapshot encoding.

mod client;
mod controller;
mod snapshot;

pub use client::{ClassifyError, VisionClient, VisionClientConfig};
pub use controller::{
    ClassifyConfig, ClassifyGate, ClassifyTicket, ThrottleMode, BASELINE_TICK,
};
pub use snapshot::{encode_snapshot, SnapshotConfig, SnapshotError};
