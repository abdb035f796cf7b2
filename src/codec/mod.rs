//! The codec adapter contract: format metadata plus the
//! `Load`/`Save` trait objects the engine drives through a streaming
//! init/seek-next-frame/frame/finish lifecycle.
//!
//! A C image library typically exposes this as a 12-entry function-pointer
//! table per codec, resolved at runtime from a `.so`/`.dll`. Here each codec
//! is a regular Rust module compiled into the binary; `Load`/`Save` collapse
//! the twelve functions into two small traits, and [`CodecInfo::new_loader`] /
//! [`CodecInfo::new_saver`] stand in for the dynamic symbol lookup.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::CodecError;
use crate::image::Image;
use crate::io::Stream;
use crate::pixel_format::{Compression, PixelFormat};
use crate::variant::PropertyMap;

pub mod registry;

bitflags::bitflags! {
    /// Capabilities a codec's load or save side advertises.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CodecFeatures: u32 {
        const STATIC      = 0b0000_0001;
        const MULTI_FRAME = 0b0000_0010;
        const META_DATA   = 0b0000_0100;
        const ICCP        = 0b0000_1000;
        const INTERLACED  = 0b0001_0000;
    }
}

bitflags::bitflags! {
    /// Per-call knobs a caller may request from [`LoadOptions`]/[`SaveOptions`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct OptionFlags: u32 {
        const META_DATA    = 0b0000_0001;
        const ICCP         = 0b0000_0010;
        const SOURCE_IMAGE = 0b0000_0100;
        const INTERLACED   = 0b0000_1000;
    }
}

/// One fixed-offset byte pattern used to probe a stream's format without a
/// filename, e.g. `MagicNumber::new(0, &[Some(0xFF), Some(0xD8), Some(0xFF)])`
/// for a JPEG SOI marker. `None` entries are wildcard bytes.
#[derive(Clone, Debug)]
pub struct MagicNumber {
    pub offset: usize,
    pub pattern: Vec<Option<u8>>,
}

impl MagicNumber {
    pub fn new(offset: usize, pattern: &[Option<u8>]) -> Self {
        Self {
            offset,
            pattern: pattern.to_vec(),
        }
    }

    /// Build from a literal byte slice (no wildcards), e.g. `b"farbfeld"`.
    pub fn literal(offset: usize, bytes: &[u8]) -> Self {
        Self {
            offset,
            pattern: bytes.iter().map(|b| Some(*b)).collect(),
        }
    }

    pub fn matches(&self, data: &[u8]) -> bool {
        if data.len() < self.offset + self.pattern.len() {
            return false;
        }
        self.pattern
            .iter()
            .enumerate()
            .all(|(i, expected)| match expected {
                Some(b) => data[self.offset + i] == *b,
                None => true,
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompressionLevel {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

pub type LoaderFactory = fn() -> Box<dyn Load>;
pub type SaverFactory = fn() -> Box<dyn Save>;

/// Static metadata describing one registered format: names, magic numbers,
/// supported pixel formats/compressions, and factories for its `Load`/`Save`
/// implementations. A format with no practical save path (WAL, XBM) leaves
/// `new_saver` as `None`; a format scoped out to adapter-only (JPEG, PNG,
/// ...) still registers a `CodecInfo` but its factories build adapters whose
/// methods immediately return `CodecError::NotImplemented`.
#[derive(Clone, Debug)]
pub struct CodecInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub magic_numbers: Vec<MagicNumber>,
    pub extensions: Vec<&'static str>,
    pub mime_types: Vec<&'static str>,
    pub load_features: CodecFeatures,
    pub save_features: CodecFeatures,
    pub pixel_formats: Vec<PixelFormat>,
    pub compressions: Vec<Compression>,
    pub default_compression: Compression,
    pub compression_level: Option<CompressionLevel>,
    pub new_loader: Option<LoaderFactory>,
    pub new_saver: Option<SaverFactory>,
}

impl CodecInfo {
    pub fn can_load(&self) -> bool {
        self.new_loader.is_some()
    }

    pub fn can_save(&self) -> bool {
        self.new_saver.is_some()
    }

    pub fn has_extension(&self, extension: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(extension))
    }

    pub fn has_mime_type(&self, mime_type: &str) -> bool {
        self.mime_types.iter().any(|m| m.eq_ignore_ascii_case(mime_type))
    }

    pub fn matches_magic(&self, data: &[u8]) -> bool {
        self.magic_numbers.iter().any(|m| m.matches(data))
    }
}

/// Options accepted by [`Load::load_init`]. `tuning` carries codec-specific
/// knobs the caller looked up from [`CodecInfo`] documentation (the Deep and
/// Technical façades expose this; Junior/Advanced use `LoadOptions::default`).
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub flags: OptionFlags,
    pub tuning: PropertyMap,
    /// Resource limits the engine enforces against every decoded frame.
    pub limits: crate::limits::Limits,
}

/// Options accepted by [`Save::save_init`].
#[derive(Clone, Debug, Default)]
pub struct SaveOptions {
    pub flags: OptionFlags,
    pub tuning: PropertyMap,
    pub compression: Option<Compression>,
    pub compression_level: Option<f64>,
}

impl Default for OptionFlags {
    fn default() -> Self {
        OptionFlags::empty()
    }
}

/// The read side of a codec adapter, driven by [`crate::engine`] through one
/// init → (seek_next_frame → frame)* → finish cycle.
///
/// `load_finish` must be callable exactly once and must run even when an
/// earlier step failed; the engine enforces this with a scope guard, not
/// this trait.
pub trait Load {
    fn load_init(&mut self, stream: &mut dyn Stream, options: &LoadOptions) -> Result<(), CodecError>;

    /// Produce the next frame's skeleton (header/metadata populated, pixels
    /// not yet read) or `Err(CodecError::NoMoreFrames)` when the stream is
    /// exhausted.
    fn load_seek_next_frame(&mut self, stream: &mut dyn Stream) -> Result<Image, CodecError>;

    /// Fill in the pixel buffer of the skeleton returned by the previous
    /// `load_seek_next_frame` call.
    fn load_frame(&mut self, stream: &mut dyn Stream, image: &mut Image) -> Result<(), CodecError>;

    fn load_finish(&mut self, stream: &mut dyn Stream) -> Result<(), CodecError>;
}

/// The write side of a codec adapter, driven through one init →
/// (seek_next_frame → frame)* → finish cycle.
pub trait Save {
    fn save_init(&mut self, stream: &mut dyn Stream, image: &Image, options: &SaveOptions) -> Result<(), CodecError>;

    fn save_seek_next_frame(&mut self, stream: &mut dyn Stream, image: &Image) -> Result<(), CodecError>;

    fn save_frame(&mut self, stream: &mut dyn Stream, image: &Image) -> Result<(), CodecError>;

    fn save_finish(&mut self, stream: &mut dyn Stream) -> Result<(), CodecError>;
}

/// Helper for adapter-only stub codecs: a `Load`/`Save` pair whose every
/// method reports the operation as unimplemented, with `name` naming the
/// format for the error message.
pub struct NotImplementedAdapter {
    pub name: &'static str,
}

impl Load for NotImplementedAdapter {
    fn load_init(&mut self, _stream: &mut dyn Stream, _options: &LoadOptions) -> Result<(), CodecError> {
        Err(CodecError::NotImplemented(String::from(self.name)))
    }

    fn load_seek_next_frame(&mut self, _stream: &mut dyn Stream) -> Result<Image, CodecError> {
        Err(CodecError::NotImplemented(String::from(self.name)))
    }

    fn load_frame(&mut self, _stream: &mut dyn Stream, _image: &mut Image) -> Result<(), CodecError> {
        Err(CodecError::NotImplemented(String::from(self.name)))
    }

    fn load_finish(&mut self, _stream: &mut dyn Stream) -> Result<(), CodecError> {
        Ok(())
    }
}

impl Save for NotImplementedAdapter {
    fn save_init(&mut self, _stream: &mut dyn Stream, _image: &Image, _options: &SaveOptions) -> Result<(), CodecError> {
        Err(CodecError::NotImplemented(String::from(self.name)))
    }

    fn save_seek_next_frame(&mut self, _stream: &mut dyn Stream, _image: &Image) -> Result<(), CodecError> {
        Err(CodecError::NotImplemented(String::from(self.name)))
    }

    fn save_frame(&mut self, _stream: &mut dyn Stream, _image: &Image) -> Result<(), CodecError> {
        Err(CodecError::NotImplemented(String::from(self.name)))
    }

    fn save_finish(&mut self, _stream: &mut dyn Stream) -> Result<(), CodecError> {
        Ok(())
    }
}
