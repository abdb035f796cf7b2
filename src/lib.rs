//! # rastersail
//!
//! An image codec runtime: a format registry, a virtualized I/O stream
//! abstraction, a four-phase streaming load/save engine, a rich image/
//! palette/metadata data model, and a pixel manipulation engine (format
//! conversion, rotation, scaling, and palette quantization with
//! Floyd-Steinberg dithering).
//!
//! ## Layout
//!
//! - [`error`] — the `CodecError` status-family error type every fallible
//!   operation in this crate returns.
//! - [`limits`] — resource limits (`max_width`/`max_pixels`/...) enforced by
//!   the engine before any allocation proportional to image dimensions.
//! - [`variant`] — the `Variant` tagged-union value type used for tunable
//!   codec options and loosely-typed metadata, plus the `PropertyMap` it's
//!   stored in.
//! - [`pixel_format`] — the closed `PixelFormat` enumeration and the
//!   ancillary enums (`Compression`, `Orientation`, `ChromaSubsampling`,
//!   `ResolutionUnit`, `MetaDataKey`) that travel alongside an image.
//! - [`image`] — `Image`, `Palette`, `IccProfile`, `Resolution`,
//!   `SourceImage`, and `MetaDataNode`: the central data model.
//! - [`io`] — the `Stream` trait and the built-in file/memory/expanding-
//!   buffer implementations.
//! - [`codec`] — the `Load`/`Save` adapter traits, `CodecInfo`, and the
//!   process-wide codec registry.
//! - [`engine`] — `LoadSession`/`SaveSession`, the streaming state machine
//!   that drives a codec adapter over a stream, plus format probing.
//! - [`convert`] — pixel format conversion, rotation, scaling, and
//!   quantization.
//! - [`formats`] — the built-in codecs (PNM, farbfeld, and the
//!   feature-gated BMP/QOI/TGA/WAL/XBM) plus adapter-only stubs for
//!   third-party formats this crate doesn't implement itself (JPEG, PNG,
//!   TIFF, ...).
//! - [`api`] — four layered entry points (Junior/Advanced/Deep/Technical)
//!   over the engine, from path-only convenience to fully custom I/O.
//!
//! ## Example
//!
//! ```no_run
//! # #[cfg(feature = "std")]
//! # fn main() -> Result<(), rastersail::CodecError> {
//! let image = rastersail::load_from_file("in.ppm")?;
//! let gray = rastersail::convert(&image, rastersail::PixelFormat::Bpp8Grayscale)?;
//! rastersail::save_to_file("out.pgm", &gray)?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "std"))]
//! # fn main() {}
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
// Forbidden except in the `no_std` registry's spin-lock `OnceCell`
// substitute for `std::sync::OnceLock` (codec::registry::spin_once).
#![cfg_attr(feature = "std", forbid(unsafe_code))]

extern crate alloc;

pub mod api;
pub mod codec;
pub mod convert;
pub mod engine;
pub mod error;
pub mod formats;
pub mod image;
pub mod io;
pub mod limits;
pub mod pixel_format;
pub mod variant;

pub use enough::{Stop, StopReason, Unstoppable};

pub use error::CodecError;
pub use limits::Limits;

pub use variant::{PropertyMap, Variant};

pub use pixel_format::{
    bytes_per_line, ChromaSubsampling, Compression, MetaDataKey, Orientation, PixelFormat, PixelFormatFamily,
    ResolutionUnit,
};

pub use image::{IccProfile, Image, MetaDataNode, Palette, Resolution, SourceImage};

pub use io::{ExpandingBufferStream, ReadOnlyMemoryStream, ReadWriteMemoryStream, SeekFrom, Stream, StreamFeatures};

#[cfg(feature = "std")]
pub use io::FileStream;

pub use codec::{
    CodecFeatures, CodecInfo, CompressionLevel, Load, LoadOptions, MagicNumber, NotImplementedAdapter, OptionFlags,
    Save, SaveOptions,
};

pub use engine::{best_acceptable_format, probe, LoadSession, SaveSession};

pub use convert::{convert, quantize, rotate, scale, Angle, ScaleAlgorithm};

/// Every registered codec, in registration order (built-ins first, then
/// adapter-only stubs).
pub fn codecs() -> &'static [CodecInfo] {
    codec::registry::list()
}

#[cfg(feature = "std")]
pub use api::junior::{load_from_file, save_to_file};
