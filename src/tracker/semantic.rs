//! Semantic label records and the tracker's per-frame output.

use serde::{Deserialize, Serialize};

use crate::tracker::point::NormalizedPoint;

/// Text shown while the object is tracked locally but the remote classifier
/// has not answered yet.
pub const PLACEHOLDER_TEXT: &str = "Analyzing…";

/// A translated-object record from the semantic classifier.
///
/// Immutable once created. The tracker stores at most one of these as the
/// latest known result and replaces it wholesale on each new classification,
/// never field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticLabel {
    /// Object name in the source language (English).
    pub object: String,
    /// Object name in the target language.
    pub translation: String,
    /// Example sentence using the object, in the target language.
    #[serde(default)]
    pub example_sentence: String,
    /// English rendering of the example sentence.
    #[serde(default)]
    pub sentence_translation: String,
    #[serde(default)]
    pub confidence: f32,
}

/// What the displayed label says this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelContent {
    /// Latest known semantic result.
    Semantic(SemanticLabel),
    /// No semantic result yet; the renderer shows [`PLACEHOLDER_TEXT`].
    Pending,
}

impl LabelContent {
    /// Headline text for the overlay.
    pub fn headline(&self) -> &str {
        match self {
            Self::Semantic(label) => &label.object,
            Self::Pending => PLACEHOLDER_TEXT,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// The tracker's displayable output for one frame.
///
/// Only produced while something should be drawn; a frame with nothing to
/// draw yields no `TrackedLabel` at all, so a label always carries a
/// position.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedLabel {
    pub content: LabelContent,
    /// Smoothed top-center anchor of the tracked object.
    pub position: NormalizedPoint,
}
