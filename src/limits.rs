//! Resource limits for decode/encode operations and the streaming engine.

use crate::error::CodecError;

/// Resource limits for decode/encode operations.
///
/// All fields default to `None` (no limit). Passed into [`crate::LoadOptions`]
/// and checked before any allocation proportional to image dimensions.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for a single output buffer allocation.
    pub max_memory_bytes: Option<u64>,
    /// Maximum number of frames a single load may iterate (mipmaps, pages).
    pub max_frames: Option<u32>,
}

impl Limits {
    /// Check dimensions against limits. Returns Ok(()) or LimitExceeded error.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), CodecError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(CodecError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(CodecError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(CodecError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that an allocation size is within memory limits.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), CodecError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                return Err(CodecError::LimitExceeded(alloc::format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }

    /// Check a frame index against the frame-count limit.
    pub(crate) fn check_frame(&self, frame_number: u32) -> Result<(), CodecError> {
        if let Some(max_frames) = self.max_frames {
            if frame_number >= max_frames {
                return Err(CodecError::LimitExceeded(alloc::format!(
                    "frame {frame_number} exceeds limit {max_frames}"
                )));
            }
        }
        Ok(())
    }
}
