//! Local detector adapter: filtering, prominence selection, load gating.

use log::{debug, warn};

use crate::detect::model::{DetectionModel, RawDetection};
use crate::tracker::BoundingBox;

/// Person-adjacent classes the feature deliberately ignores so labels stick
/// to objects, not people.
const EXCLUDED_CLASSES: [&str; 7] = ["person", "face", "head", "man", "woman", "child", "baby"];

/// A detection that passed the adapter's filters.
#[derive(Debug, Clone)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub label: String,
    pub score: f32,
}

impl From<RawDetection> for Detection {
    fn from(raw: RawDetection) -> Self {
        Self {
            bbox: raw.bbox,
            label: raw.class,
            score: raw.score,
        }
    }
}

/// Configuration for the local detector adapter.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Detections scoring below this are discarded.
    pub score_thresh: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self { score_thresh: 0.5 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    NotLoaded,
    Loading,
    Ready,
    Failed,
}

/// Adapter between a [`DetectionModel`] and the tracker.
///
/// Until the one-time model load has completed, detection fails closed and
/// yields no detections. A failed load latches: the adapter will not retry,
/// and the tracker simply never leaves its empty state.
pub struct LocalDetector<M: DetectionModel> {
    model: M,
    load_state: LoadState,
    config: DetectorConfig,
}

impl<M: DetectionModel> LocalDetector<M> {
    pub fn new(model: M, config: DetectorConfig) -> Self {
        Self {
            model,
            load_state: LoadState::NotLoaded,
            config,
        }
    }

    pub fn with_default_config(model: M) -> Self {
        Self::new(model, DetectorConfig::default())
    }

    /// Trigger the model load if it has not been triggered yet.
    ///
    /// Idempotent: repeated calls while a load is underway or after a
    /// terminal outcome do nothing. Returns true once the model is ready.
    pub fn ensure_loaded(&mut self) -> bool {
        match self.load_state {
            LoadState::Ready => true,
            LoadState::Loading | LoadState::Failed => false,
            LoadState::NotLoaded => {
                self.load_state = LoadState::Loading;
                match self.model.load() {
                    Ok(()) => {
                        debug!("detection model loaded");
                        self.load_state = LoadState::Ready;
                        true
                    }
                    Err(err) => {
                        warn!("detection model failed to load: {err}");
                        self.load_state = LoadState::Failed;
                        false
                    }
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.load_state == LoadState::Ready
    }

    pub fn load_failed(&self) -> bool {
        self.load_state == LoadState::Failed
    }

    /// Run detection on one frame, returning qualifying detections only.
    ///
    /// Fails closed: before the model is ready, or when inference errors,
    /// the result is simply empty.
    pub fn detect(&mut self, pixels: &[u8], width: u32, height: u32) -> Vec<Detection> {
        if !self.ensure_loaded() {
            return Vec::new();
        }
        let raw = match self.model.infer(pixels, width, height) {
            Ok(raw) => raw,
            Err(err) => {
                debug!("local inference failed, dropping frame: {err}");
                return Vec::new();
            }
        };
        raw.into_iter()
            .filter(|d| d.score >= self.config.score_thresh)
            .filter(|d| !is_excluded_class(&d.class))
            .map(Detection::from)
            .collect()
    }

    /// Run detection and select the prominent result: the qualifying
    /// detection with the largest bounding-box area, ties going to the
    /// first one encountered.
    pub fn prominent(&mut self, pixels: &[u8], width: u32, height: u32) -> Option<Detection> {
        let detections = self.detect(pixels, width, height);
        let mut best: Option<Detection> = None;
        for det in detections {
            let replace = match &best {
                Some(current) => det.bbox.area() > current.bbox.area(),
                None => true,
            };
            if replace {
                best = Some(det);
            }
        }
        best
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }
}

fn is_excluded_class(class: &str) -> bool {
    let lowered = class.to_ascii_lowercase();
    EXCLUDED_CLASSES.iter().any(|c| *c == lowered)
}
