//! Status-family error type shared by every codec, stream, and façade.

use crate::pixel_format::PixelFormat;
use alloc::string::String;
use enough::StopReason;

/// Everything that can go wrong loading, saving, or converting an image.
///
/// Each variant maps to one of the status families from the wire-level error
/// code table: format/codec lookup, I/O, data validity, resource limits, and
/// unsupported operations. `code()` returns the frozen numeric status so
/// callers can match on a stable integer across crate versions.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CodecError {
    #[error("no codec recognizes this input")]
    UnrecognizedFormat,

    #[error("no codec named {0:?} is registered")]
    UnknownCodec(String),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("resource limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("pixel format mismatch: expected {expected:?}, got {actual:?}")]
    PixelFormatMismatch {
        expected: PixelFormat,
        actual: PixelFormat,
    },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("operation not implemented by this codec: {0}")]
    NotImplemented(String),

    #[error("no more frames")]
    NoMoreFrames,

    #[error("operation called in the wrong state: {0}")]
    WrongState(String),

    #[error("missing required conversion: {0}")]
    UnsupportedConversion(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl CodecError {
    /// Frozen numeric status code, stable across crate versions.
    ///
    /// Mirrors the external status-code table: 0 is reserved for success and
    /// is never produced by this type (only `Result::Ok` represents success).
    pub fn code(&self) -> u32 {
        match self {
            CodecError::UnrecognizedFormat => 1,
            CodecError::UnknownCodec(_) => 2,
            CodecError::InvalidHeader(_) => 3,
            CodecError::UnsupportedVariant(_) => 4,
            CodecError::InvalidData(_) => 5,
            CodecError::DimensionsTooLarge { .. } => 6,
            CodecError::LimitExceeded(_) => 7,
            CodecError::UnexpectedEof => 8,
            CodecError::PixelFormatMismatch { .. } => 9,
            CodecError::BufferTooSmall { .. } => 10,
            CodecError::NotImplemented(_) => 11,
            CodecError::NoMoreFrames => 12,
            CodecError::WrongState(_) => 13,
            CodecError::UnsupportedConversion(_) => 14,
            CodecError::Io(_) => 15,
            CodecError::Cancelled(_) => 16,
        }
    }
}

impl From<StopReason> for CodecError {
    fn from(r: StopReason) -> Self {
        CodecError::Cancelled(r)
    }
}
