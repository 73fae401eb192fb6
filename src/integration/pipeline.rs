//! TrackerPipeline for combining local detection, tracking, and the
//! classification slow loop.

use std::time::Instant;

use log::{debug, warn};

use crate::classify::{
    encode_snapshot, ClassifyConfig, ClassifyError, ClassifyGate, ClassifyTicket, SnapshotConfig,
    VisionClient,
};
use crate::detect::{lexicon, Detection, DetectionModel, DetectorConfig, LocalDetector};
use crate::integration::frame::Frame;
use crate::language::TargetLanguage;
use crate::tracker::{LabelTracker, SemanticLabel, TrackedLabel, TrackerConfig};

/// Configuration for the full pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub tracker: TrackerConfig,
    pub detector: DetectorConfig,
    pub classify: ClassifyConfig,
    pub snapshot: SnapshotConfig,
    pub language: TargetLanguage,
    /// When set, the placeholder is upgraded to a phrasebook translation for
    /// detector classes the built-in lexicon knows.
    pub lexicon_fallback: bool,
}

/// End-to-end tracking pipeline.
///
/// Bundles the local detector, the label tracker, and the classification
/// gate behind the two cooperative triggers of the feature: the per-frame
/// tick ([`TrackerPipeline::process_frame`]) and the classification tick
/// ([`TrackerPipeline::begin_classification`] /
/// [`TrackerPipeline::complete_classification`]). The network call runs
/// between begin and complete, wherever the host wants it, so the frame
/// loop never blocks on it.
pub struct TrackerPipeline<M: DetectionModel> {
    detector: LocalDetector<M>,
    tracker: LabelTracker,
    gate: ClassifyGate,
    snapshot: SnapshotConfig,
    language: TargetLanguage,
    lexicon_fallback: bool,
    seeded_class: Option<String>,
}

impl<M: DetectionModel> TrackerPipeline<M> {
    /// Create a new pipeline around a detection model.
    pub fn new(model: M, config: PipelineConfig) -> Self {
        Self {
            detector: LocalDetector::new(model, config.detector),
            tracker: LabelTracker::new(config.tracker),
            gate: ClassifyGate::new(config.classify),
            snapshot: config.snapshot,
            language: config.language,
            lexicon_fallback: config.lexicon_fallback,
            seeded_class: None,
        }
    }

    /// Create a new pipeline with default configuration.
    pub fn with_default_config(model: M) -> Self {
        Self::new(model, PipelineConfig::default())
    }

    /// Fast loop: process one rendered frame.
    ///
    /// Runs local detection, feeds the prominent anchor to the tracker, and
    /// returns the label to draw this frame (or `None` for nothing).
    pub fn process_frame(&mut self, frame: &Frame, now: Instant) -> Option<TrackedLabel> {
        let prominent = self.detector.prominent(&frame.pixels, frame.width, frame.height);
        if self.lexicon_fallback {
            self.seed_from_lexicon(prominent.as_ref());
        }
        let anchor = prominent.and_then(|d| d.bbox.normalized_anchor(frame.width, frame.height));
        self.tracker.on_frame(anchor, now)
    }

    /// Slow loop, first half: ask to start a classification attempt.
    ///
    /// Returns the admission ticket plus the encoded snapshot to send, or
    /// `None` when the gate rejects the tick (throttled, in flight, backing
    /// off) or the snapshot cannot be encoded.
    pub fn begin_classification(
        &mut self,
        frame: &Frame,
        now: Instant,
    ) -> Option<(ClassifyTicket, Vec<u8>)> {
        let ticket = self.gate.try_begin(now)?;
        match encode_snapshot(frame, &self.snapshot) {
            Ok(jpeg) => Some((ticket, jpeg)),
            Err(err) => {
                warn!("snapshot encoding failed, skipping classification: {err}");
                self.gate.complete(ticket);
                None
            }
        }
    }

    /// Slow loop, second half: apply a finished classification attempt.
    ///
    /// Results for stale tickets (the pipeline was stopped while the call
    /// was in flight) are discarded. Failures degrade: rate limits silence
    /// the gate, everything else keeps the previous label.
    pub fn complete_classification(
        &mut self,
        ticket: ClassifyTicket,
        outcome: Result<Vec<SemanticLabel>, ClassifyError>,
        now: Instant,
    ) {
        if !self.gate.complete(ticket) {
            debug!("dropping stale classification result");
            return;
        }
        match outcome {
            Ok(labels) => match labels.into_iter().next() {
                Some(first) => self.tracker.apply_semantic(first),
                None => {
                    let delay = self.gate.config().empty_clear_delay;
                    self.tracker.clear_semantic_after(now, delay);
                }
            },
            Err(ClassifyError::RateLimited { retry_after }) => self.gate.backoff(now, retry_after),
            Err(err) => warn!("classification failed, keeping previous label: {err}"),
        }
    }

    /// Run one blocking classification attempt inline.
    ///
    /// Convenience for hosts without a worker thread. Returns whether a call
    /// was actually made.
    pub fn classify_once(&mut self, client: &VisionClient, frame: &Frame, now: Instant) -> bool {
        let Some((ticket, jpeg)) = self.begin_classification(frame, now) else {
            return false;
        };
        let outcome = client.classify(&jpeg, self.language);
        self.complete_classification(ticket, outcome, Instant::now());
        true
    }

    /// Tear down for camera stop.
    ///
    /// Drops all tracker state and orphans any in-flight classification so
    /// its eventual completion cannot touch the reset tracker.
    pub fn stop(&mut self) {
        self.tracker.reset();
        self.gate.cancel_all();
        self.seeded_class = None;
    }

    /// Switch the target language. The stored semantic label is in the old
    /// language, so it is dropped.
    pub fn set_language(&mut self, language: TargetLanguage) {
        if self.language != language {
            self.language = language;
            self.tracker.clear_semantic();
            self.seeded_class = None;
        }
    }

    pub fn language(&self) -> TargetLanguage {
        self.language
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &LabelTracker {
        &self.tracker
    }

    /// Get a reference to the classification gate.
    pub fn gate(&self) -> &ClassifyGate {
        &self.gate
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &LocalDetector<M> {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut LocalDetector<M> {
        &mut self.detector
    }

    /// Seed the tracker from the phrasebook when there is no semantic label
    /// and the prominent class changed. A label cleared by classifier
    /// evidence is not re-seeded for the same class.
    fn seed_from_lexicon(&mut self, prominent: Option<&Detection>) {
        let Some(det) = prominent else { return };
        if self.tracker.semantic().is_some() {
            return;
        }
        if self.seeded_class.as_deref() == Some(det.label.as_str()) {
            return;
        }
        if let Some(label) = lexicon::local_label(&det.label, self.language, det.score) {
            debug!("seeding label from phrasebook: {}", label.object);
            self.tracker.apply_semantic(label);
        }
        self.seeded_class = Some(det.label.clone());
    }
}
