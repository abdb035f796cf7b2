//! The central data model: [`Image`] and everything it owns.

use alloc::vec::Vec;

use crate::error::CodecError;
use crate::pixel_format::{ChromaSubsampling, Compression, MetaDataKey, Orientation, PixelFormat, ResolutionUnit};
use crate::variant::{PropertyMap, Variant};

/// An owned color palette for indexed pixel formats.
///
/// Whenever an [`Image`]'s `pixel_format` is indexed, it carries a `Palette`
/// whose own `pixel_format` is a storage format (24-bit RGB/BGR or a 32-bit
/// RGBA-family format) — never itself indexed.
#[derive(Clone, Debug)]
pub struct Palette {
    pixel_format: PixelFormat,
    color_count: u32,
    data: Vec<u8>,
}

impl Palette {
    /// Allocate a zeroed palette for `color_count` entries of `pixel_format`.
    ///
    /// `pixel_format` must be a storage format; `color_count` must fit in
    /// `u16` (the data model caps palettes at 65535 entries).
    pub fn new(pixel_format: PixelFormat, color_count: u32) -> Result<Self, CodecError> {
        if !pixel_format.is_storage_format() {
            return Err(CodecError::UnsupportedVariant(alloc::format!(
                "palette pixel format must be a storage format, got {pixel_format:?}"
            )));
        }
        if color_count >= 1 << 16 {
            return Err(CodecError::InvalidData(alloc::format!(
                "palette color_count {color_count} exceeds 65535"
            )));
        }
        let bytes_per_color = pixel_format.bits_per_pixel() as usize / 8;
        let len = bytes_per_color
            .checked_mul(color_count as usize)
            .ok_or(CodecError::DimensionsTooLarge {
                width: color_count,
                height: 0,
            })?;
        Ok(Self {
            pixel_format,
            color_count,
            data: alloc::vec![0u8; len],
        })
    }

    /// Build a palette from already-packed entry bytes.
    pub fn from_bytes(pixel_format: PixelFormat, color_count: u32, data: Vec<u8>) -> Result<Self, CodecError> {
        let mut palette = Self::new(pixel_format, color_count)?;
        if data.len() != palette.data.len() {
            return Err(CodecError::BufferTooSmall {
                needed: palette.data.len(),
                actual: data.len(),
            });
        }
        palette.data = data;
        Ok(palette)
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    pub fn color_count(&self) -> u32 {
        self.color_count
    }

    pub fn bytes_per_color(&self) -> usize {
        self.pixel_format.bits_per_pixel() as usize / 8
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The raw bytes for entry `index`, clamped to the last valid entry if
    /// `index` is out of range (the conversion matrix's documented clamp
    /// behavior for indexed→RGB lookups with a corrupt index).
    pub fn entry_clamped(&self, index: usize) -> &[u8] {
        let bpc = self.bytes_per_color();
        let last = self.color_count.saturating_sub(1) as usize;
        let i = index.min(last);
        &self.data[i * bpc..(i + 1) * bpc]
    }
}

/// An opaque, owned ICC color profile. Never parsed by this crate.
#[derive(Clone, Debug)]
pub struct IccProfile {
    data: Vec<u8>,
}

impl IccProfile {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Physical resolution. `0.0` on either axis means "unknown".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    pub x: f32,
    pub y: f32,
    pub unit: ResolutionUnit,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            unit: ResolutionUnit::Unknown,
        }
    }
}

/// Provenance record preserved from loading, present iff the caller set
/// `LoadOptions::SOURCE_IMAGE`. `pixel_format` here reflects the on-disk
/// format, which may differ from [`Image::pixel_format`] after the codec
/// performed an internal conversion to deliver a simpler output.
#[derive(Clone, Debug, Default)]
pub struct SourceImage {
    pub pixel_format: Option<PixelFormat>,
    pub chroma_subsampling: ChromaSubsampling,
    pub orientation: Orientation,
    pub compression: Option<Compression>,
    pub interlaced: bool,
    pub special_properties: PropertyMap,
}

/// One metadata entry. `key` carries its own string payload when it's
/// `MetaDataKey::Unknown(_)`, so there's no separate flag that could drift
/// out of sync with which variant is actually present.
///
/// Stored as an owned `Vec<MetaDataNode>` on [`Image::meta_data`] rather
/// than a linked list: append at tail, traverse in insertion order, same
/// observable behavior with none of the pointer bookkeeping.
#[derive(Clone, Debug)]
pub struct MetaDataNode {
    pub key: MetaDataKey,
    pub value: Variant,
}

impl MetaDataNode {
    pub fn new(key: MetaDataKey, value: Variant) -> Self {
        Self { key, value }
    }
}

/// The central image record.
///
/// `pixels` is `None` for a "skeleton" image — metadata populated, no pixel
/// buffer yet — the state [`crate::engine`]'s `load_seek_next_frame` leaves
/// an image in before `load_frame` fills it.
#[derive(Clone, Debug)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixel_format: PixelFormat,
    pub bytes_per_line: u32,
    pixels: Option<Vec<u8>>,
    pub palette: Option<Palette>,
    pub resolution: Option<Resolution>,
    pub iccp: Option<IccProfile>,
    pub meta_data: Vec<MetaDataNode>,
    pub source_image: Option<SourceImage>,
    /// Milliseconds until the next frame in an animation; -1 for stills.
    pub delay: i32,
    /// 0 means unknown.
    pub gamma: f32,
    pub interlaced: bool,
    pub tuning: PropertyMap,
}

impl Image {
    /// A skeleton image: header fields known, no pixel buffer yet.
    pub fn skeleton(width: u32, height: u32, pixel_format: PixelFormat) -> Result<Self, CodecError> {
        if width == 0 || height == 0 {
            return Err(CodecError::DimensionsTooLarge { width, height });
        }
        let bytes_per_line = crate::pixel_format::bytes_per_line(width, pixel_format)?;
        Ok(Self {
            width,
            height,
            pixel_format,
            bytes_per_line,
            pixels: None,
            palette: None,
            resolution: None,
            iccp: None,
            meta_data: Vec::new(),
            source_image: None,
            delay: -1,
            gamma: 0.0,
            interlaced: false,
            tuning: PropertyMap::new(),
        })
    }

    /// A fully populated image: skeleton plus a pixel buffer of exactly
    /// `height * bytes_per_line` bytes.
    pub fn with_pixels(
        width: u32,
        height: u32,
        pixel_format: PixelFormat,
        pixels: Vec<u8>,
    ) -> Result<Self, CodecError> {
        let mut image = Self::skeleton(width, height, pixel_format)?;
        image.set_pixels(pixels)?;
        Ok(image)
    }

    pub fn pixels(&self) -> Option<&[u8]> {
        self.pixels.as_deref()
    }

    pub fn pixels_mut(&mut self) -> Option<&mut [u8]> {
        self.pixels.as_deref_mut()
    }

    pub fn is_skeleton(&self) -> bool {
        self.pixels.is_none()
    }

    /// Install the pixel buffer, enforcing `len == height * bytes_per_line`.
    pub fn set_pixels(&mut self, pixels: Vec<u8>) -> Result<(), CodecError> {
        let expected = self.height as usize * self.bytes_per_line as usize;
        if pixels.len() != expected {
            return Err(CodecError::BufferTooSmall {
                needed: expected,
                actual: pixels.len(),
            });
        }
        self.pixels = Some(pixels);
        Ok(())
    }

    /// Validate dimensions, the indexed/palette pairing, and (if present)
    /// the pixel buffer length, without touching pixel contents. Used at
    /// codec load/save boundaries.
    pub fn check_valid(&self) -> Result<(), CodecError> {
        if self.width == 0 || self.height == 0 {
            return Err(CodecError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.pixel_format.is_indexed() {
            let palette = self.palette.as_ref().ok_or_else(|| {
                CodecError::InvalidData(alloc::string::String::from(
                    "indexed pixel format requires a palette",
                ))
            })?;
            if !palette.pixel_format().is_storage_format() {
                return Err(CodecError::InvalidData(alloc::string::String::from(
                    "palette pixel format must be a storage format",
                )));
            }
        }
        if let Some(pixels) = &self.pixels {
            let expected = self.height as usize * self.bytes_per_line as usize;
            if pixels.len() != expected {
                return Err(CodecError::BufferTooSmall {
                    needed: expected,
                    actual: pixels.len(),
                });
            }
        }
        Ok(())
    }

    pub fn append_meta_data(&mut self, key: MetaDataKey, value: Variant) {
        self.meta_data.push(MetaDataNode::new(key, value));
    }
}
