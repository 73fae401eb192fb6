//! Still-frame snapshots for the remote classifier.
//!
//! The classifier receives a downscaled JPEG still of the current frame,
//! not the full-resolution buffer the detector sees.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb};
use thiserror::Error;

use crate::integration::Frame;

/// Configuration for snapshot encoding.
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Linear downscale factor applied to both dimensions, in (0, 1].
    pub scale: f32,
    /// JPEG quality, 1..=100.
    pub jpeg_quality: u8,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            scale: 0.5,
            jpeg_quality: 75,
        }
    }
}

/// Error type for snapshot encoding failures.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("pixel buffer does not match {width}x{height} rgb frame ({got} bytes)")]
    InvalidFrame { width: u32, height: u32, got: usize },
    #[error("jpeg encoding failed: {0}")]
    Encode(String),
}

/// Downscale and JPEG-encode a frame for classification.
pub fn encode_snapshot(frame: &Frame, config: &SnapshotConfig) -> Result<Vec<u8>, SnapshotError> {
    let view = ImageBuffer::<Rgb<u8>, &[u8]>::from_raw(
        frame.width,
        frame.height,
        frame.pixels.as_slice(),
    )
    .ok_or(SnapshotError::InvalidFrame {
        width: frame.width,
        height: frame.height,
        got: frame.pixels.len(),
    })?;

    let scale = config.scale.clamp(0.05, 1.0);
    let target_w = ((frame.width as f32 * scale).round() as u32).max(1);
    let target_h = ((frame.height as f32 * scale).round() as u32).max(1);

    let mut jpeg = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(Cursor::new(&mut jpeg), config.jpeg_quality);
    if target_w == frame.width && target_h == frame.height {
        encoder
            .encode(frame.pixels.as_slice(), frame.width, frame.height, image::ExtendedColorType::Rgb8)
            .map_err(|e| SnapshotError::Encode(e.to_string()))?;
    } else {
        let resized = imageops::resize(&view, target_w, target_h, FilterType::Triangle);
        encoder
            .encode(resized.as_raw(), target_w, target_h, image::ExtendedColorType::Rgb8)
            .map_err(|e| SnapshotError::Encode(e.to_string()))?;
    }
    Ok(jpeg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32) -> Frame {
        Frame::new(vec![128; (width * height * 3) as usize], width, height).unwrap()
    }

    #[test]
    fn test_encodes_jpeg_magic() {
        let jpeg = encode_snapshot(&frame(64, 48), &SnapshotConfig::default()).unwrap();
        assert!(jpeg.len() > 2);
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_full_scale_skips_resize() {
        let config = SnapshotConfig {
            scale: 1.0,
            ..SnapshotConfig::default()
        };
        let jpeg = encode_snapshot(&frame(32, 32), &config).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_mismatched_buffer_is_rejected() {
        let bad = Frame {
            pixels: vec![0; 10],
            width: 64,
            height: 48,
        };
        assert!(matches!(
            encode_snapshot(&bad, &SnapshotConfig::default()),
            Err(SnapshotError::InvalidFrame { .. })
        ));
    }
}
