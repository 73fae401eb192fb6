use crate::tracker::point::NormalizedPoint;

/// Bounding box in source-frame pixel units (TLWH format).
///
/// Detections arrive from the local model as top-left x/y plus width and
/// height, measured against the camera's native resolution. The tracker only
/// ever reads the box through [`BoundingBox::area`] (prominence ranking) and
/// [`BoundingBox::normalized_anchor`] (label placement).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl BoundingBox {
    /// Create a new BoundingBox from top-left coordinates and dimensions.
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a BoundingBox from a `[x, y, w, h]` array as emitted by
    /// detection models.
    #[inline]
    pub fn from_tlwh(tlwh: [f32; 4]) -> Self {
        Self::new(tlwh[0], tlwh[1], tlwh[2], tlwh[3])
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Get the top-center point of the bounding box, where the overlay label
    /// is anchored.
    #[inline]
    pub fn top_center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y)
    }

    /// Convert the top-center anchor to frame-relative coordinates.
    ///
    /// Returns `None` when the frame has a zero dimension. Anchors from boxes
    /// partially outside the frame are clamped into [0, 1].
    pub fn normalized_anchor(&self, frame_width: u32, frame_height: u32) -> Option<NormalizedPoint> {
        if frame_width == 0 || frame_height == 0 {
            return None;
        }
        let (ax, ay) = self.top_center();
        Some(NormalizedPoint::new(ax / frame_width as f32, ay / frame_height as f32).clamped())
    }
}
