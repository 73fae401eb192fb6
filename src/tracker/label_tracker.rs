//! Core label tracker state machine.
//!
//! Fuses the fast positional signal (a prominent detection anchor, every
//! frame) with the slow semantic signal (a classification result, every few
//! seconds) into one smoothed, positioned, displayable label. Positions move
//! every frame; semantic text changes only when a classification completes.

use std::time::{Duration, Instant};

use crate::tracker::point::NormalizedPoint;
use crate::tracker::semantic::{LabelContent, SemanticLabel, TrackedLabel};
use crate::tracker::track_state::TrackState;

/// Configuration for the label tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Exponential-smoothing weight applied to each new anchor sample.
    pub smoothing: f32,
    /// Consecutive missing frames tolerated before the label is dropped.
    pub grace_frames: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.2,
            grace_frames: 30,
        }
    }
}

/// Tracks one on-screen label across frames.
///
/// Driven by two external triggers: [`LabelTracker::on_frame`] from the
/// render loop and [`LabelTracker::apply_semantic`] /
/// [`LabelTracker::clear_semantic_after`] from classification completions.
/// Both run to completion before the next callback fires, so no locking is
/// involved; semantic updates take effect on the next frame and never move
/// the position.
pub struct LabelTracker {
    state: TrackState,
    smoothed: Option<NormalizedPoint>,
    missing_frames: u32,
    semantic: Option<SemanticLabel>,
    clear_semantic_at: Option<Instant>,
    config: TrackerConfig,
}

impl LabelTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            state: TrackState::Empty,
            smoothed: None,
            missing_frames: 0,
            semantic: None,
            clear_semantic_at: None,
            config,
        }
    }

    /// Advance the tracker by one rendered frame.
    ///
    /// `anchor` is the normalized top-center of this frame's prominent
    /// detection, or `None` when no detection qualified. Returns the label to
    /// draw, or `None` when nothing should be drawn.
    pub fn on_frame(
        &mut self,
        anchor: Option<NormalizedPoint>,
        now: Instant,
    ) -> Option<TrackedLabel> {
        if let Some(at) = self.clear_semantic_at {
            if now >= at {
                self.semantic = None;
                self.clear_semantic_at = None;
            }
        }

        match anchor {
            Some(raw) => {
                self.missing_frames = 0;
                let smoothed = match self.smoothed {
                    Some(prev) => prev.step_toward(raw, self.config.smoothing),
                    None => raw,
                };
                self.smoothed = Some(smoothed);
                self.state = TrackState::Tracking;
                Some(TrackedLabel {
                    content: self.content(),
                    position: smoothed,
                })
            }
            None => {
                self.missing_frames = self.missing_frames.saturating_add(1);
                let within_grace = self.missing_frames < self.config.grace_frames;
                match (self.smoothed, &self.semantic) {
                    (Some(held), Some(label)) if within_grace => {
                        // Hold the last smoothed position unchanged; no
                        // interpolation happens without a fresh sample.
                        self.state = TrackState::Holding;
                        Some(TrackedLabel {
                            content: LabelContent::Semantic(label.clone()),
                            position: held,
                        })
                    }
                    _ => {
                        self.state = TrackState::Empty;
                        self.smoothed = None;
                        None
                    }
                }
            }
        }
    }

    /// Replace the stored semantic label wholesale.
    ///
    /// Cancels any pending clear; the new label shows from the next frame.
    pub fn apply_semantic(&mut self, label: SemanticLabel) {
        self.semantic = Some(label);
        self.clear_semantic_at = None;
    }

    /// Drop the stored semantic label immediately.
    pub fn clear_semantic(&mut self) {
        self.semantic = None;
        self.clear_semantic_at = None;
    }

    /// Schedule the semantic label to clear once `delay` has elapsed.
    ///
    /// Used when a classification round finds no objects: the short delay
    /// keeps the text from flickering when the subject leaves frame for a
    /// single cycle. A later round re-arms the deadline.
    pub fn clear_semantic_after(&mut self, now: Instant, delay: Duration) {
        self.clear_semantic_at = Some(now + delay);
    }

    /// Drop all state, as when the camera stops.
    pub fn reset(&mut self) {
        self.state = TrackState::Empty;
        self.smoothed = None;
        self.missing_frames = 0;
        self.semantic = None;
        self.clear_semantic_at = None;
    }

    pub fn state(&self) -> TrackState {
        self.state
    }

    pub fn smoothed_position(&self) -> Option<NormalizedPoint> {
        self.smoothed
    }

    pub fn semantic(&self) -> Option<&SemanticLabel> {
        self.semantic.as_ref()
    }

    pub fn missing_frames(&self) -> u32 {
        self.missing_frames
    }

    fn content(&self) -> LabelContent {
        match &self.semantic {
            Some(label) => LabelContent::Semantic(label.clone()),
            None => LabelContent::Pending,
        }
    }
}

impl Default for LabelTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}
