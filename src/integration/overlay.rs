//! Overlay layout: from tracker output to viewport draw coordinates.
//!
//! Drawing itself belongs to the host UI; this module only does the
//! geometry: mapping the normalized anchor through the video-to-viewport
//! cover scaling and composing the label text block.

use crate::tracker::{LabelContent, NormalizedPoint, TrackedLabel, PLACEHOLDER_TEXT};

/// Fraction of the viewport height the label floats above its anchor.
const LIFT_FRAC: f32 = 0.15;
/// Minimum distance the label keeps from the top edge.
const TOP_MARGIN_FRAC: f32 = 0.05;

/// Geometry of the video as presented in the host viewport.
///
/// Assumes cover presentation: the video is scaled uniformly until it fills
/// the viewport, centered, with the overflow cropped.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub video_width: f32,
    pub video_height: f32,
    pub view_width: f32,
    pub view_height: f32,
}

impl Viewport {
    pub fn new(video_width: f32, video_height: f32, view_width: f32, view_height: f32) -> Self {
        Self {
            video_width,
            video_height,
            view_width,
            view_height,
        }
    }

    /// Map a frame-relative point to viewport pixel coordinates.
    ///
    /// Returns `None` when the point falls in a cropped-away region or the
    /// viewport is degenerate.
    pub fn project(&self, point: NormalizedPoint) -> Option<(f32, f32)> {
        if self.video_width <= 0.0
            || self.video_height <= 0.0
            || self.view_width <= 0.0
            || self.view_height <= 0.0
        {
            return None;
        }
        let scale = (self.view_width / self.video_width).max(self.view_height / self.video_height);
        let scaled_w = self.video_width * scale;
        let scaled_h = self.video_height * scale;
        let x = point.x * scaled_w + (self.view_width - scaled_w) / 2.0;
        let y = point.y * scaled_h + (self.view_height - scaled_h) / 2.0;
        if x < 0.0 || x > self.view_width || y < 0.0 || y > self.view_height {
            return None;
        }
        Some((x, y))
    }
}

/// Draw plan for one label.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLabel {
    /// Object name, or the placeholder while classification is pending.
    pub headline: String,
    /// Translation line, absent for the placeholder.
    pub subline: Option<String>,
    /// Example sentence and its English rendering, when available.
    pub example: Option<(String, String)>,
    /// Viewport pixel coordinates of the label's bottom-center.
    pub x: f32,
    pub y: f32,
}

/// Lay out a tracked label for drawing.
///
/// Returns `None` when the anchor is cropped out of the viewport; the host
/// draws nothing that frame, same as when the tracker emits no label.
pub fn layout(label: &TrackedLabel, viewport: &Viewport) -> Option<OverlayLabel> {
    let (x, y) = viewport.project(label.position)?;
    let lifted = (y - LIFT_FRAC * viewport.view_height).max(TOP_MARGIN_FRAC * viewport.view_height);
    let (headline, subline, example) = match &label.content {
        LabelContent::Semantic(s) => (
            s.object.clone(),
            Some(s.translation.clone()),
            (!s.example_sentence.is_empty())
                .then(|| (s.example_sentence.clone(), s.sentence_translation.clone())),
        ),
        LabelContent::Pending => (PLACEHOLDER_TEXT.to_string(), None, None),
    };
    Some(OverlayLabel {
        headline,
        subline,
        example,
        x: x.clamp(0.0, viewport.view_width),
        y: lifted,
    })
}
