//! Pixel format, compression, orientation, and metadata-key enumerations.
//!
//! Naming follows the pixel-format tables common to small C image
//! libraries, so the bits-per-pixel values below are frozen, not invented:
//! this enum-to-integer mapping must never be renumbered once published,
//! and the safest way to honor that is to keep a stable variant set and
//! ordering.

use alloc::string::String;
use core::cmp::Ordering;

use crate::error::CodecError;

/// Pixel format: total bits-per-pixel, channel layout, and color model.
///
/// `UNKNOWN` is a valid value for "no format negotiated yet" (e.g. a
/// skeleton image) but is rejected by every comparator (P4) and by
/// `bits_per_pixel`'s canonical-stride callers.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Unknown,

    // Raw, bit-depth-only formats with no defined color model.
    Bpp1,
    Bpp2,
    Bpp4,
    Bpp8,
    Bpp16,
    Bpp24,
    Bpp32,
    Bpp48,
    Bpp64,
    Bpp72,
    Bpp96,
    Bpp128,

    // Palette-indexed.
    Bpp1Indexed,
    Bpp2Indexed,
    Bpp4Indexed,
    Bpp8Indexed,
    Bpp16Indexed,

    // Grayscale.
    Bpp1Grayscale,
    Bpp2Grayscale,
    Bpp4Grayscale,
    Bpp8Grayscale,
    Bpp16Grayscale,
    Bpp4GrayscaleAlpha,
    Bpp8GrayscaleAlpha,
    Bpp16GrayscaleAlpha,
    Bpp32GrayscaleAlpha,

    // Packed RGB.
    Bpp16Rgb555,
    Bpp16Bgr555,
    Bpp16Rgb565,
    Bpp16Bgr565,

    // RGB, no alpha.
    Bpp24Rgb,
    Bpp24Bgr,
    Bpp48Rgb,
    Bpp48Bgr,

    // RGB with a 4th channel (padding or alpha) at 16/32/64 bpp.
    Bpp16Rgbx,
    Bpp16Bgrx,
    Bpp16Xrgb,
    Bpp16Xbgr,
    Bpp16Rgba,
    Bpp16Bgra,
    Bpp16Argb,
    Bpp16Abgr,
    Bpp32Rgbx,
    Bpp32Bgrx,
    Bpp32Xrgb,
    Bpp32Xbgr,
    Bpp32Rgba,
    Bpp32Bgra,
    Bpp32Argb,
    Bpp32Abgr,
    Bpp64Rgbx,
    Bpp64Bgrx,
    Bpp64Xrgb,
    Bpp64Xbgr,
    Bpp64Rgba,
    Bpp64Bgra,
    Bpp64Argb,
    Bpp64Abgr,

    // CMYK.
    Bpp32Cmyk,
    Bpp64Cmyk,
    Bpp40Cmyka,
    Bpp80Cmyka,

    // YCbCr / YCCK.
    Bpp24Ycbcr,
    Bpp32Ycck,

    // CIE color spaces.
    Bpp24CieLab,
    Bpp40CieLab,
    Bpp24CieLuv,
    Bpp40CieLuv,

    // YUV, 8/10/12/16-bit, ± alpha.
    Bpp24Yuv,
    Bpp30Yuv,
    Bpp36Yuv,
    Bpp48Yuv,
    Bpp32Yuva,
    Bpp40Yuva,
    Bpp48Yuva,
    Bpp64Yuva,

    // Floating point.
    Bpp32GrayscaleFloat,
    Bpp96RgbFloat,
    Bpp128RgbaFloat,
}

/// Broad channel family, used by the "best acceptable format" save-time
/// heuristic (see [`crate::engine::best_acceptable_format`]) to find a
/// same-family target when the exact format isn't accepted by a codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormatFamily {
    Unknown,
    Raw,
    Indexed,
    Grayscale,
    GrayscaleAlpha,
    Rgb,
    Rgba,
    Cmyk,
    CmykAlpha,
    YCbCr,
    YCck,
    CieLab,
    CieLuv,
    Yuv,
    YuvAlpha,
    Float,
}

impl PixelFormat {
    /// Total, deterministic bits-per-pixel. Returns 0 for `Unknown`.
    pub fn bits_per_pixel(self) -> u32 {
        use PixelFormat::*;
        match self {
            Unknown => 0,
            Bpp1 | Bpp1Indexed | Bpp1Grayscale => 1,
            Bpp2 | Bpp2Indexed | Bpp2Grayscale => 2,
            Bpp4 | Bpp4Indexed | Bpp4Grayscale | Bpp4GrayscaleAlpha => 4,
            Bpp8 | Bpp8Indexed | Bpp8Grayscale | Bpp8GrayscaleAlpha => 8,
            Bpp16
            | Bpp16Indexed
            | Bpp16Grayscale
            | Bpp16GrayscaleAlpha
            | Bpp16Rgb555
            | Bpp16Bgr555
            | Bpp16Rgb565
            | Bpp16Bgr565
            | Bpp16Rgbx
            | Bpp16Bgrx
            | Bpp16Xrgb
            | Bpp16Xbgr
            | Bpp16Rgba
            | Bpp16Bgra
            | Bpp16Argb
            | Bpp16Abgr => 16,
            Bpp24 | Bpp24Rgb | Bpp24Bgr | Bpp24Ycbcr | Bpp24CieLab | Bpp24CieLuv | Bpp24Yuv => 24,
            Bpp30Yuv => 30,
            Bpp32
            | Bpp32GrayscaleAlpha
            | Bpp32Rgbx
            | Bpp32Bgrx
            | Bpp32Xrgb
            | Bpp32Xbgr
            | Bpp32Rgba
            | Bpp32Bgra
            | Bpp32Argb
            | Bpp32Abgr
            | Bpp32Cmyk
            | Bpp32Ycck
            | Bpp32Yuva
            | Bpp32GrayscaleFloat => 32,
            Bpp36Yuv => 36,
            Bpp40Cmyka | Bpp40CieLab | Bpp40CieLuv | Bpp40Yuva => 40,
            Bpp48 | Bpp48Rgb | Bpp48Bgr | Bpp48Yuv | Bpp48Yuva => 48,
            Bpp64
            | Bpp64Rgbx
            | Bpp64Bgrx
            | Bpp64Xrgb
            | Bpp64Xbgr
            | Bpp64Rgba
            | Bpp64Bgra
            | Bpp64Argb
            | Bpp64Abgr
            | Bpp64Cmyk
            | Bpp64Yuva => 64,
            Bpp72 => 72,
            Bpp80Cmyka => 80,
            Bpp96 | Bpp96RgbFloat => 96,
            Bpp128 | Bpp128RgbaFloat => 128,
        }
    }

    /// Broad channel family for the save-time format-negotiation heuristic.
    pub fn family(self) -> PixelFormatFamily {
        use PixelFormat::*;
        use PixelFormatFamily as Fam;
        match self {
            Unknown => Fam::Unknown,
            Bpp1 | Bpp2 | Bpp4 | Bpp8 | Bpp16 | Bpp24 | Bpp32 | Bpp48 | Bpp64 | Bpp72 | Bpp96
            | Bpp128 => Fam::Raw,
            Bpp1Indexed | Bpp2Indexed | Bpp4Indexed | Bpp8Indexed | Bpp16Indexed => Fam::Indexed,
            Bpp1Grayscale | Bpp2Grayscale | Bpp4Grayscale | Bpp8Grayscale | Bpp16Grayscale => {
                Fam::Grayscale
            }
            Bpp4GrayscaleAlpha | Bpp8GrayscaleAlpha | Bpp16GrayscaleAlpha
            | Bpp32GrayscaleAlpha => Fam::GrayscaleAlpha,
            Bpp16Rgb555 | Bpp16Bgr555 | Bpp16Rgb565 | Bpp16Bgr565 | Bpp24Rgb | Bpp24Bgr
            | Bpp48Rgb | Bpp48Bgr | Bpp16Rgbx | Bpp16Bgrx | Bpp16Xrgb | Bpp16Xbgr | Bpp32Rgbx
            | Bpp32Bgrx | Bpp32Xrgb | Bpp32Xbgr | Bpp64Rgbx | Bpp64Bgrx | Bpp64Xrgb
            | Bpp64Xbgr => Fam::Rgb,
            Bpp16Rgba | Bpp16Bgra | Bpp16Argb | Bpp16Abgr | Bpp32Rgba | Bpp32Bgra | Bpp32Argb
            | Bpp32Abgr | Bpp64Rgba | Bpp64Bgra | Bpp64Argb | Bpp64Abgr => Fam::Rgba,
            Bpp32Cmyk | Bpp64Cmyk => Fam::Cmyk,
            Bpp40Cmyka | Bpp80Cmyka => Fam::CmykAlpha,
            Bpp24Ycbcr => Fam::YCbCr,
            Bpp32Ycck => Fam::YCck,
            Bpp24CieLab | Bpp40CieLab => Fam::CieLab,
            Bpp24CieLuv | Bpp40CieLuv => Fam::CieLuv,
            Bpp24Yuv | Bpp30Yuv | Bpp36Yuv | Bpp48Yuv => Fam::Yuv,
            Bpp32Yuva | Bpp40Yuva | Bpp48Yuva | Bpp64Yuva => Fam::YuvAlpha,
            Bpp32GrayscaleFloat | Bpp96RgbFloat | Bpp128RgbaFloat => Fam::Float,
        }
    }

    /// Number of color channels (alpha counted, padding channel counted).
    pub fn channels(self) -> u32 {
        use PixelFormat::*;
        match self {
            Unknown => 0,
            Bpp1Grayscale | Bpp2Grayscale | Bpp4Grayscale | Bpp8Grayscale | Bpp16Grayscale
            | Bpp32GrayscaleFloat | Bpp1Indexed | Bpp2Indexed | Bpp4Indexed | Bpp8Indexed
            | Bpp16Indexed => 1,
            Bpp4GrayscaleAlpha | Bpp8GrayscaleAlpha | Bpp16GrayscaleAlpha
            | Bpp32GrayscaleAlpha => 2,
            Bpp16Rgb555 | Bpp16Bgr555 | Bpp16Rgb565 | Bpp16Bgr565 | Bpp24Rgb | Bpp24Bgr
            | Bpp48Rgb | Bpp48Bgr | Bpp24Ycbcr | Bpp24CieLab | Bpp40CieLab | Bpp24CieLuv
            | Bpp40CieLuv | Bpp24Yuv | Bpp30Yuv | Bpp36Yuv | Bpp48Yuv | Bpp96RgbFloat => 3,
            Bpp16Rgbx | Bpp16Bgrx | Bpp16Xrgb | Bpp16Xbgr | Bpp16Rgba | Bpp16Bgra | Bpp16Argb
            | Bpp16Abgr | Bpp32Rgbx | Bpp32Bgrx | Bpp32Xrgb | Bpp32Xbgr | Bpp32Rgba
            | Bpp32Bgra | Bpp32Argb | Bpp32Abgr | Bpp64Rgbx | Bpp64Bgrx | Bpp64Xrgb
            | Bpp64Xbgr | Bpp64Rgba | Bpp64Bgra | Bpp64Argb | Bpp64Abgr | Bpp32Cmyk
            | Bpp64Cmyk | Bpp32Ycck | Bpp32Yuva | Bpp40Yuva | Bpp48Yuva | Bpp64Yuva
            | Bpp128RgbaFloat => 4,
            Bpp40Cmyka | Bpp80Cmyka => 4,
            Bpp1 | Bpp2 | Bpp4 | Bpp8 | Bpp16 | Bpp24 | Bpp32 | Bpp48 | Bpp64 | Bpp72 | Bpp96
            | Bpp128 => 1,
        }
    }

    /// Whether this is a storage (non-compressed, directly addressable)
    /// format suitable as a [`crate::image::Palette`] entry format — in
    /// practice 24-bit RGB/BGR or 32-bit RGBA/BGRA-family formats.
    pub fn is_storage_format(self) -> bool {
        matches!(self.family(), PixelFormatFamily::Rgb | PixelFormatFamily::Rgba)
    }

    pub fn is_indexed(self) -> bool {
        self.family() == PixelFormatFamily::Indexed
    }

    fn require_known(self) -> Result<u32, CodecError> {
        if matches!(self, PixelFormat::Unknown) {
            return Err(CodecError::UnsupportedVariant(String::from(
                "comparison against PixelFormat::Unknown",
            )));
        }
        Ok(self.bits_per_pixel())
    }

    /// P4: totally-ordered comparators over bits-per-pixel. `UNKNOWN` as
    /// either operand is an error, never a silent `false`.
    pub fn less(self, other: PixelFormat) -> Result<bool, CodecError> {
        Ok(self.require_known()? < other.require_known()?)
    }

    pub fn less_equal(self, other: PixelFormat) -> Result<bool, CodecError> {
        Ok(self.require_known()? <= other.require_known()?)
    }

    pub fn equal(self, other: PixelFormat) -> Result<bool, CodecError> {
        Ok(self.require_known()? == other.require_known()?)
    }

    pub fn greater_equal(self, other: PixelFormat) -> Result<bool, CodecError> {
        Ok(self.require_known()? >= other.require_known()?)
    }

    pub fn greater(self, other: PixelFormat) -> Result<bool, CodecError> {
        Ok(self.require_known()? > other.require_known()?)
    }

    fn cmp_bpp(self, other: PixelFormat) -> Result<Ordering, CodecError> {
        Ok(self.require_known()?.cmp(&other.require_known()?))
    }
}

/// Canonical stride: `ceil(width * bits_per_pixel(pf) / 8)`, no row padding.
///
/// This is the contract every built-in codec normalizes to in memory; on-disk
/// padded strides (e.g. BMP's 4-byte row alignment) are unpadded on load and
/// re-padded on save by the codec itself.
pub fn bytes_per_line(width: u32, pf: PixelFormat) -> Result<u32, CodecError> {
    let bpp = pf.bits_per_pixel();
    if bpp == 0 {
        return Err(CodecError::UnsupportedVariant(String::from(
            "bytes_per_line on PixelFormat::Unknown",
        )));
    }
    let bits = (width as u64)
        .checked_mul(bpp as u64)
        .ok_or(CodecError::DimensionsTooLarge { width, height: 0 })?;
    let bytes = bits.div_ceil(8);
    u32::try_from(bytes).map_err(|_| CodecError::DimensionsTooLarge { width, height: 0 })
}

/// Compression scheme used to encode pixel data on disk.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compression {
    Unknown,
    None,
    AdobeDeflate,
    Av1,
    CcittFax3,
    CcittFax4,
    CcittRle,
    CcittRlew,
    CcittT4,
    CcittT6,
    Dcs,
    Deflate,
    Jbig,
    Jbig2,
    Jpeg,
    Jpeg2000,
    JpegXl,
    JpegXr,
    Lerc,
    Lzw,
    PackBits,
    Qoi,
    Rle,
    SgiLog,
    SgiLog24,
    WebP,
    Zstd,
}

/// Image orientation relative to the data as stored.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Normal,
    Rotated90,
    Rotated180,
    Rotated270,
    MirroredHorizontally,
    MirroredVertically,
    MirroredHorizontallyRotated90,
    MirroredHorizontallyRotated270,
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Normal
    }
}

/// Chroma subsampling scheme for YCbCr/YUV formats.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChromaSubsampling {
    Unknown,
    Format311,
    Format400,
    Format410,
    Format411,
    Format420,
    Format421,
    Format422,
    Format444,
}

impl Default for ChromaSubsampling {
    fn default() -> Self {
        ChromaSubsampling::Unknown
    }
}

/// Physical unit for [`crate::image::Resolution`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResolutionUnit {
    Unknown,
    Micrometer,
    Centimeter,
    Meter,
    Inch,
}

impl Default for ResolutionUnit {
    fn default() -> Self {
        ResolutionUnit::Unknown
    }
}

/// Well-known metadata keys. `Unknown(String)` carries a codec-defined key
/// name (e.g. a WAL `"name"`/`"next_name"` field) that isn't in this list.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MetaDataKey {
    Unknown(String),
    Artist,
    Author,
    Comment,
    Copyright,
    CreationTime,
    Description,
    Document,
    Exif,
    Iptc,
    Xmp,
    Jumbf,
    Make,
    Model,
    Software,
    SoftwareVersion,
    Title,
    Url,
    Warning,
}
