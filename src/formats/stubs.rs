//! Third-party-backed container formats that this crate recognizes and
//! describes but does not yet decode or encode.
//!
//! Each entry publishes real format metadata (magic numbers, extensions,
//! MIME types, the pixel formats a production adapter would expose) so
//! registry lookups (`from_extension`, `from_magic_number_from_io`, ...)
//! and format probing work exactly as they would once a real adapter
//! lands; `load`/`save` both resolve to [`NotImplementedAdapter`], which
//! fails every adapter call with `CodecError::NotImplemented` except the
//! idempotent `*_finish`.
//!
//! A production runtime ships genuine JPEG/PNG/TIFF/... adapters backed by
//! libjpeg-turbo, libpng, and similar; vendoring those C libraries is out
//! of scope here, so these entries describe the format without decoding it.

use alloc::boxed::Box;

use crate::codec::{CodecFeatures, CodecInfo, MagicNumber, NotImplementedAdapter};
use crate::pixel_format::{Compression, PixelFormat};

macro_rules! stub_codec {
    (
        name: $name:literal,
        description: $description:literal,
        magic: [$($magic:expr),* $(,)?],
        extensions: [$($ext:literal),* $(,)?],
        mime_types: [$($mime:literal),* $(,)?],
        pixel_formats: [$($pf:expr),* $(,)?],
        compressions: [$($compression:expr),* $(,)?],
        default_compression: $default_compression:expr,
    ) => {
        CodecInfo {
            name: $name,
            version: "1.0.0",
            description: $description,
            magic_numbers: alloc::vec![$($magic),*],
            extensions: alloc::vec![$($ext),*],
            mime_types: alloc::vec![$($mime),*],
            load_features: CodecFeatures::STATIC,
            save_features: CodecFeatures::STATIC,
            pixel_formats: alloc::vec![$($pf),*],
            compressions: alloc::vec![$($compression),*],
            default_compression: $default_compression,
            compression_level: None,
            new_loader: Some(|| Box::new(NotImplementedAdapter { name: $name })),
            new_saver: Some(|| Box::new(NotImplementedAdapter { name: $name })),
        }
    };
}

pub fn codec_infos() -> alloc::vec::Vec<CodecInfo> {
    alloc::vec![
        stub_codec! {
            name: "JPEG",
            description: "Joint Photographic Experts Group",
            magic: [MagicNumber::literal(0, &[0xFF, 0xD8, 0xFF])],
            extensions: ["jpg", "jpeg", "jpe", "jif", "jfif"],
            mime_types: ["image/jpeg"],
            pixel_formats: [PixelFormat::Bpp24Rgb, PixelFormat::Bpp8Grayscale, PixelFormat::Bpp24Ycbcr, PixelFormat::Bpp32Cmyk],
            compressions: [Compression::Jpeg],
            default_compression: Compression::Jpeg,
        },
        stub_codec! {
            name: "PNG",
            description: "Portable Network Graphics, including APNG",
            magic: [MagicNumber::literal(0, &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])],
            extensions: ["png", "apng"],
            mime_types: ["image/png", "image/apng"],
            pixel_formats: [
                PixelFormat::Bpp8Grayscale,
                PixelFormat::Bpp8GrayscaleAlpha,
                PixelFormat::Bpp24Rgb,
                PixelFormat::Bpp32Rgba,
                PixelFormat::Bpp8Indexed,
            ],
            compressions: [Compression::Deflate],
            default_compression: Compression::Deflate,
        },
        stub_codec! {
            name: "TIFF",
            description: "Tagged Image File Format",
            magic: [MagicNumber::literal(0, b"II*\0"), MagicNumber::literal(0, b"MM\0*")],
            extensions: ["tif", "tiff"],
            mime_types: ["image/tiff"],
            pixel_formats: [PixelFormat::Bpp24Rgb, PixelFormat::Bpp32Rgba, PixelFormat::Bpp8Grayscale, PixelFormat::Bpp1Indexed],
            compressions: [
                Compression::None,
                Compression::Lzw,
                Compression::PackBits,
                Compression::Deflate,
                Compression::CcittFax3,
                Compression::CcittFax4,
            ],
            default_compression: Compression::None,
        },
        stub_codec! {
            name: "GIF",
            description: "Graphics Interchange Format",
            magic: [MagicNumber::literal(0, b"GIF87a"), MagicNumber::literal(0, b"GIF89a")],
            extensions: ["gif"],
            mime_types: ["image/gif"],
            pixel_formats: [PixelFormat::Bpp8Indexed],
            compressions: [Compression::Lzw],
            default_compression: Compression::Lzw,
        },
        stub_codec! {
            name: "WEBP",
            description: "WebP",
            magic: [MagicNumber::literal(0, b"RIFF")],
            extensions: ["webp"],
            mime_types: ["image/webp"],
            pixel_formats: [PixelFormat::Bpp24Rgb, PixelFormat::Bpp32Rgba],
            compressions: [Compression::WebP],
            default_compression: Compression::WebP,
        },
        stub_codec! {
            name: "JPEG2000",
            description: "JPEG 2000 (JasPer)",
            magic: [MagicNumber::literal(0, &[0x00, 0x00, 0x00, 0x0C, b'j', b'P', b' ', b' '])],
            extensions: ["jp2", "j2k", "jpf", "jpx"],
            mime_types: ["image/jp2"],
            pixel_formats: [PixelFormat::Bpp24Rgb, PixelFormat::Bpp8Grayscale],
            compressions: [Compression::Jpeg2000],
            default_compression: Compression::Jpeg2000,
        },
        stub_codec! {
            name: "JPEGXL",
            description: "JPEG XL",
            magic: [MagicNumber::literal(0, &[0xFF, 0x0A]), MagicNumber::literal(0, &[0x00, 0x00, 0x00, 0x0C, b'J', b'X', b'L', b' '])],
            extensions: ["jxl"],
            mime_types: ["image/jxl"],
            pixel_formats: [PixelFormat::Bpp24Rgb, PixelFormat::Bpp32Rgba],
            compressions: [Compression::JpegXl],
            default_compression: Compression::JpegXl,
        },
        stub_codec! {
            name: "JPEGXR",
            description: "JPEG XR",
            magic: [MagicNumber::literal(0, &[0x49, 0x49, 0xBC])],
            extensions: ["jxr", "wdp", "hdp"],
            mime_types: ["image/vnd.ms-photo"],
            pixel_formats: [PixelFormat::Bpp24Rgb, PixelFormat::Bpp32Rgba],
            compressions: [Compression::JpegXr],
            default_compression: Compression::JpegXr,
        },
        stub_codec! {
            name: "JBIG",
            description: "JBIG / JBIG2, tunable stripe height and typical prediction",
            magic: [MagicNumber::literal(0, &[0x97, b'J', b'B', b'2', 0x0D, 0x0A])],
            extensions: ["jbg", "jb2", "jbig", "jbig2"],
            mime_types: ["image/jbig", "image/jbig2"],
            pixel_formats: [PixelFormat::Bpp1Indexed],
            compressions: [Compression::Jbig, Compression::Jbig2],
            default_compression: Compression::Jbig2,
        },
        stub_codec! {
            name: "ICO",
            description: "Windows icon / cursor (ICO/CUR)",
            magic: [MagicNumber::literal(0, &[0x00, 0x00, 0x01, 0x00]), MagicNumber::literal(0, &[0x00, 0x00, 0x02, 0x00])],
            extensions: ["ico", "cur"],
            mime_types: ["image/x-icon", "image/vnd.microsoft.icon"],
            pixel_formats: [PixelFormat::Bpp32Rgba, PixelFormat::Bpp24Rgb, PixelFormat::Bpp8Indexed],
            compressions: [Compression::None],
            default_compression: Compression::None,
        },
        stub_codec! {
            name: "PSD",
            description: "Adobe Photoshop Document",
            magic: [MagicNumber::literal(0, b"8BPS")],
            extensions: ["psd", "psb"],
            mime_types: ["image/vnd.adobe.photoshop"],
            pixel_formats: [PixelFormat::Bpp24Rgb, PixelFormat::Bpp32Rgba, PixelFormat::Bpp32Cmyk, PixelFormat::Bpp8Grayscale],
            compressions: [Compression::None, Compression::PackBits, Compression::Zstd],
            default_compression: Compression::PackBits,
        },
        stub_codec! {
            name: "SVG",
            description: "Scalable Vector Graphics, rasterized on load",
            magic: [],
            extensions: ["svg", "svgz"],
            mime_types: ["image/svg+xml"],
            pixel_formats: [PixelFormat::Bpp32Rgba],
            compressions: [Compression::None],
            default_compression: Compression::None,
        },
        stub_codec! {
            name: "AVIF",
            description: "AV1 Image File Format",
            magic: [MagicNumber::literal(4, b"ftypavif")],
            extensions: ["avif"],
            mime_types: ["image/avif"],
            pixel_formats: [PixelFormat::Bpp24Rgb, PixelFormat::Bpp32Rgba],
            compressions: [Compression::Av1],
            default_compression: Compression::Av1,
        },
        stub_codec! {
            name: "HEIC",
            description: "High Efficiency Image Format",
            magic: [MagicNumber::literal(4, b"ftypheic"), MagicNumber::literal(4, b"ftypheix")],
            extensions: ["heic", "heif"],
            mime_types: ["image/heic", "image/heif"],
            pixel_formats: [PixelFormat::Bpp24Rgb, PixelFormat::Bpp32Rgba],
            compressions: [Compression::Jpeg2000],
            default_compression: Compression::Jpeg2000,
        },
    ]
}
