//! Camera frame contract.

use thiserror::Error;

/// Error type for frame construction.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("pixel buffer size mismatch: expected {expected} bytes for {width}x{height}, got {got}")]
    SizeMismatch {
        expected: usize,
        got: usize,
        width: u32,
        height: u32,
    },
}

/// One captured video frame: tightly packed RGB8 at native resolution.
#[derive(Debug, Clone)]
pub struct Frame {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub fn new(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self, FrameError> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(FrameError::SizeMismatch {
                expected,
                got: pixels.len(),
                width,
                height,
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }
}

/// Trait for live camera capture backends.
///
/// The camera itself is outside this crate; hosts implement this against
/// their platform capture API and drive the pipeline with the frames.
pub trait FrameSource {
    /// Error type for capture failures.
    type Error;

    /// Capture the next frame at device-native resolution.
    fn next_frame(&mut self) -> Result<Frame, Self::Error>;
}

/// Frame source producing synthetic flat-color frames.
///
/// Each frame differs from the previous one by a shade step so downstream
/// consumers see changing content.
pub struct StubFrameSource {
    width: u32,
    height: u32,
    shade: u8,
}

impl StubFrameSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            shade: 0,
        }
    }
}

impl FrameSource for StubFrameSource {
    type Error = FrameError;

    fn next_frame(&mut self) -> Result<Frame, Self::Error> {
        self.shade = self.shade.wrapping_add(1);
        let pixels = vec![self.shade; self.width as usize * self.height as usize * 3];
        Frame::new(pixels, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_validates_buffer_size() {
        assert!(Frame::new(vec![0; 12], 2, 2).is_ok());
        assert!(matches!(
            Frame::new(vec![0; 11], 2, 2),
            Err(FrameError::SizeMismatch { expected: 12, .. })
        ));
    }

    #[test]
    fn test_stub_source_varies_frames() {
        let mut source = StubFrameSource::new(4, 4);
        let a = source.next_frame().unwrap();
        let b = source.next_frame().unwrap();
        assert_ne!(a.pixels[0], b.pixels[0]);
        assert_eq!(a.width, 4);
    }
}
