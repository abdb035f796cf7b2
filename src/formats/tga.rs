//! Truevision TGA: an 18-byte header, optional image-ID field, optional
//! color map, then pixel data — raw or run-length encoded.
//!
//! A reference TGA loader computes `flipped_h`/`flipped_v` from the image
//! descriptor byte but then folds them into the output image's property set
//! with `&=` instead of `|=`, which silently drops both flags on every image
//! that needs flipping. This loader has no separate "properties" bitset to
//! get that assignment wrong in the first place — the descriptor's H/V flip
//! bits are applied directly while rows are copied out, so the pixels this
//! crate hands back are always oriented top-to-bottom, left-to-right
//! regardless of how the source file stored them.
//!
//! Saving only ever writes uncompressed true-color data (image type 2) —
//! there is no RLE encoder here, just a plain header and raw pixel rows.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::codec::{CodecFeatures, CodecInfo, Load, LoadOptions, MagicNumber, Save, SaveOptions};
use crate::error::CodecError;
use crate::image::{Image, MetaDataNode, Palette};
use crate::io::Stream;
use crate::pixel_format::{MetaDataKey, PixelFormat};
use crate::variant::Variant;

const TGA_NO_IMAGE: u8 = 0;
const TGA_INDEXED: u8 = 1;
const TGA_TRUE_COLOR: u8 = 2;
const TGA_MONO: u8 = 3;
const TGA_INDEXED_RLE: u8 = 9;
const TGA_TRUE_COLOR_RLE: u8 = 10;
const TGA_MONO_RLE: u8 = 11;

pub fn codec_info() -> CodecInfo {
    CodecInfo {
        name: "TGA",
        version: "1.0.0",
        description: "Truevision TGA",
        // TGA has no fixed magic number at offset 0; recognized by extension
        // or by its optional TGA 2.0 footer signature instead.
        magic_numbers: alloc::vec![MagicNumber::literal(0, b"\0\0\0")], // never matches; extension/footer carry recognition
        extensions: alloc::vec!["tga", "icb", "vda", "vst"],
        mime_types: alloc::vec!["image/x-tga", "image/x-targa"],
        load_features: CodecFeatures::STATIC,
        save_features: CodecFeatures::STATIC,
        pixel_formats: alloc::vec![
            PixelFormat::Bpp8Indexed,
            PixelFormat::Bpp8Grayscale,
            PixelFormat::Bpp24Bgr,
            PixelFormat::Bpp32Bgra,
        ],
        compressions: alloc::vec![crate::pixel_format::Compression::None, crate::pixel_format::Compression::Rle],
        default_compression: crate::pixel_format::Compression::None,
        compression_level: None,
        new_loader: Some(|| Box::new(TgaLoad::default())),
        new_saver: Some(|| Box::new(TgaSave)),
    }
}

/// TGA 2.0 footer signature, present in the last 26 bytes of a file that
/// opts into the extended format.
pub const TGA2_SIGNATURE: &[u8; 18] = b"TRUEVISION-XFILE.\0";

struct Header {
    id_length: u8,
    color_map_type: u8,
    image_type: u8,
    color_map_length: u16,
    color_map_entry_size: u8,
    width: u16,
    height: u16,
    pixel_depth: u8,
    descriptor: u8,
}

impl Header {
    fn flipped_h(&self) -> bool {
        self.descriptor & 0x10 != 0
    }

    /// `0` in bit 5 means the file stores rows bottom-to-top.
    fn flipped_v(&self) -> bool {
        self.descriptor & 0x20 == 0
    }
}

#[derive(Default)]
struct TgaLoad {
    done: bool,
    pending: Option<PendingFrame>,
}

impl Load for TgaLoad {
    fn load_init(&mut self, _stream: &mut dyn Stream, _options: &LoadOptions) -> Result<(), CodecError> {
        Ok(())
    }

    fn load_seek_next_frame(&mut self, stream: &mut dyn Stream) -> Result<Image, CodecError> {
        if self.done {
            return Err(CodecError::NoMoreFrames);
        }
        self.done = true;

        let mut raw = [0u8; 18];
        stream.strict_read(&mut raw)?;
        let header = Header {
            id_length: raw[0],
            color_map_type: raw[1],
            image_type: raw[2],
            color_map_length: u16::from_le_bytes([raw[5], raw[6]]),
            color_map_entry_size: raw[7],
            width: u16::from_le_bytes([raw[12], raw[13]]),
            height: u16::from_le_bytes([raw[14], raw[15]]),
            pixel_depth: raw[16],
            descriptor: raw[17],
        };

        if header.width == 0 || header.height == 0 {
            return Err(CodecError::DimensionsTooLarge {
                width: header.width as u32,
                height: header.height as u32,
            });
        }

        let mut image_id = vec![0u8; header.id_length as usize];
        stream.strict_read(&mut image_id)?;

        let pf = match (header.image_type, header.pixel_depth) {
            (TGA_INDEXED | TGA_INDEXED_RLE, _) => PixelFormat::Bpp8Indexed,
            (TGA_MONO | TGA_MONO_RLE, _) => PixelFormat::Bpp8Grayscale,
            (TGA_TRUE_COLOR | TGA_TRUE_COLOR_RLE, 32) => PixelFormat::Bpp32Bgra,
            (TGA_TRUE_COLOR | TGA_TRUE_COLOR_RLE, 24) => PixelFormat::Bpp24Bgr,
            (TGA_NO_IMAGE, _) => {
                log::warn!("TGA: image type 0 (no image data)");
                return Err(CodecError::UnsupportedVariant(String::from("TGA image type 0 (no image data)")));
            }
            (other_type, other_depth) => {
                log::warn!("TGA: unsupported image type {other_type} at {other_depth} bpp");
                return Err(CodecError::UnsupportedVariant(format!(
                    "TGA image type {other_type} at {other_depth} bpp"
                )));
            }
        };
        log::trace!("TGA: {}x{} {pf:?}, image type {}", header.width, header.height, header.image_type);

        let mut image = Image::skeleton(header.width as u32, header.height as u32, pf)?;

        if header.color_map_type == 1 {
            if header.color_map_entry_size != 24 {
                return Err(CodecError::UnsupportedVariant(format!(
                    "TGA color map entry size {}",
                    header.color_map_entry_size
                )));
            }
            let mut raw_palette = vec![0u8; header.color_map_length as usize * 3];
            stream.strict_read(&mut raw_palette)?;
            image.palette = Some(Palette::from_bytes(PixelFormat::Bpp24Bgr, header.color_map_length as u32, raw_palette)?);
        }

        if !image_id.is_empty() {
            if let Ok(text) = String::from_utf8(image_id) {
                image.meta_data.push(MetaDataNode::new(MetaDataKey::Unknown(String::from("image-id")), Variant::String(text)));
            }
        }

        self.pending = Some(PendingFrame {
            image_type: header.image_type,
            flipped_h: header.flipped_h(),
            flipped_v: header.flipped_v(),
        });
        Ok(image)
    }

    fn load_frame(&mut self, stream: &mut dyn Stream, image: &mut Image) -> Result<(), CodecError> {
        let pending = self.pending.take().ok_or_else(|| {
            CodecError::WrongState(String::from("load_frame called before load_seek_next_frame"))
        })?;
        let width = image.width as usize;
        let height = image.height as usize;
        let bypp = image.pixel_format.bits_per_pixel() as usize / 8;
        let row_len = image.bytes_per_line as usize;

        let mut linear = vec![0u8; row_len * height];
        match pending.image_type {
            TGA_INDEXED_RLE | TGA_TRUE_COLOR_RLE | TGA_MONO_RLE => {
                decode_rle(stream, &mut linear, bypp)?;
            }
            _ => stream.strict_read(&mut linear)?,
        }

        let mut pixels = vec![0u8; row_len * height];
        for y in 0..height {
            let src_y = if pending.flipped_v { height - 1 - y } else { y };
            let src_row = &linear[src_y * row_len..src_y * row_len + row_len];
            let dst_row = &mut pixels[y * row_len..y * row_len + row_len];
            if pending.flipped_h {
                for x in 0..width {
                    let sx = width - 1 - x;
                    dst_row[x * bypp..x * bypp + bypp].copy_from_slice(&src_row[sx * bypp..sx * bypp + bypp]);
                }
            } else {
                dst_row.copy_from_slice(src_row);
            }
        }
        image.set_pixels(pixels)
    }

    fn load_finish(&mut self, _stream: &mut dyn Stream) -> Result<(), CodecError> {
        Ok(())
    }
}

struct PendingFrame {
    image_type: u8,
    flipped_h: bool,
    flipped_v: bool,
}

fn decode_rle(stream: &mut dyn Stream, out: &mut [u8], bypp: usize) -> Result<(), CodecError> {
    let mut pos = 0;
    let mut packet_header = [0u8; 1];
    let mut pixel = vec![0u8; bypp];
    while pos < out.len() {
        stream.strict_read(&mut packet_header)?;
        let count = (packet_header[0] & 0x7F) as usize + 1;
        if packet_header[0] & 0x80 != 0 {
            stream.strict_read(&mut pixel)?;
            for _ in 0..count {
                if pos >= out.len() {
                    break;
                }
                out[pos..pos + bypp].copy_from_slice(&pixel);
                pos += bypp;
            }
        } else {
            let bytes = count * bypp;
            let bytes = bytes.min(out.len() - pos);
            stream.strict_read(&mut out[pos..pos + bytes])?;
            pos += bytes;
        }
    }
    Ok(())
}

struct TgaSave;

impl Save for TgaSave {
    fn save_init(&mut self, stream: &mut dyn Stream, image: &Image, _options: &SaveOptions) -> Result<(), CodecError> {
        if !matches!(image.pixel_format, PixelFormat::Bpp24Bgr | PixelFormat::Bpp32Bgra) {
            log::warn!("TGA: cannot save pixel format {:?}", image.pixel_format);
            return Err(CodecError::UnsupportedVariant(format!(
                "TGA can only save Bpp24Bgr or Bpp32Bgra, got {:?}",
                image.pixel_format
            )));
        }
        let pixel_depth: u8 = if image.pixel_format == PixelFormat::Bpp32Bgra { 32 } else { 24 };
        let mut header = [0u8; 18];
        header[2] = TGA_TRUE_COLOR;
        header[12..14].copy_from_slice(&(image.width as u16).to_le_bytes());
        header[14..16].copy_from_slice(&(image.height as u16).to_le_bytes());
        header[16] = pixel_depth;
        header[17] = 0x20; // top-to-bottom, no horizontal flip
        stream.strict_write(&header)
    }

    fn save_seek_next_frame(&mut self, _stream: &mut dyn Stream, _image: &Image) -> Result<(), CodecError> {
        Ok(())
    }

    fn save_frame(&mut self, stream: &mut dyn Stream, image: &Image) -> Result<(), CodecError> {
        let pixels = image
            .pixels()
            .ok_or_else(|| CodecError::InvalidData(String::from("save_frame requires pixel data")))?;
        stream.strict_write(pixels)
    }

    fn save_finish(&mut self, _stream: &mut dyn Stream) -> Result<(), CodecError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ReadOnlyMemoryStream;

    fn uncompressed_true_color_header(width: u16, height: u16, descriptor: u8) -> Vec<u8> {
        let mut raw = alloc::vec![0u8; 18];
        raw[2] = TGA_TRUE_COLOR;
        raw[12..14].copy_from_slice(&width.to_le_bytes());
        raw[14..16].copy_from_slice(&height.to_le_bytes());
        raw[16] = 24;
        raw[17] = descriptor;
        raw
    }

    #[test]
    fn loads_uncompressed_true_color_top_down() {
        let mut data = uncompressed_true_color_header(2, 1, 0x20);
        data.extend_from_slice(&[0, 0, 255, 0, 255, 0]);
        let mut stream = ReadOnlyMemoryStream::new(&data);
        let mut loader = TgaLoad::default();
        loader.load_init(&mut stream, &LoadOptions::default()).unwrap();
        let mut image = loader.load_seek_next_frame(&mut stream).unwrap();
        assert_eq!(image.pixel_format, PixelFormat::Bpp24Bgr);
        loader.load_frame(&mut stream, &mut image).unwrap();
        assert_eq!(image.pixels().unwrap(), &[0, 0, 255, 0, 255, 0]);
    }

    #[test]
    fn bottom_up_descriptor_flips_row_order_on_load() {
        // Bit 5 clear means the file stores rows bottom-to-top; the loader
        // must hand back top-to-bottom pixels regardless.
        let mut data = uncompressed_true_color_header(1, 2, 0x00);
        data.extend_from_slice(&[1, 1, 1]); // row 0 in the file (bottom row)
        data.extend_from_slice(&[2, 2, 2]); // row 1 in the file (top row)
        let mut stream = ReadOnlyMemoryStream::new(&data);
        let mut loader = TgaLoad::default();
        loader.load_init(&mut stream, &LoadOptions::default()).unwrap();
        let mut image = loader.load_seek_next_frame(&mut stream).unwrap();
        loader.load_frame(&mut stream, &mut image).unwrap();
        assert_eq!(image.pixels().unwrap(), &[2, 2, 2, 1, 1, 1]);
    }

    #[test]
    fn saves_then_loads_an_uncompressed_true_color_round_trip() {
        let image = Image::with_pixels(2, 1, PixelFormat::Bpp24Bgr, alloc::vec![5, 6, 7, 8, 9, 10]).unwrap();
        let mut buffer = [0u8; 18 + 6];
        let mut cursor = crate::io::ReadWriteMemoryStream::new(&mut buffer);
        let mut saver = TgaSave;
        saver.save_init(&mut cursor, &image, &SaveOptions::default()).unwrap();
        saver.save_frame(&mut cursor, &image).unwrap();

        let mut stream = ReadOnlyMemoryStream::new(&buffer);
        let mut loader = TgaLoad::default();
        loader.load_init(&mut stream, &LoadOptions::default()).unwrap();
        let mut loaded = loader.load_seek_next_frame(&mut stream).unwrap();
        loader.load_frame(&mut stream, &mut loaded).unwrap();
        assert_eq!(loaded.pixels().unwrap(), &[5, 6, 7, 8, 9, 10]);
    }
}
