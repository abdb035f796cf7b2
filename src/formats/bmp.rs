//! Windows BMP: `BITMAPFILEHEADER` + `BITMAPINFOHEADER`, optional palette,
//! then rows padded to a 4-byte boundary, conventionally bottom-up.
//!
//! Loads 1/4/8-bit indexed and 24/32-bit uncompressed; RLE4/RLE8 and
//! BITFIELDS are recognized by `compression` but rejected with
//! `CodecError::NotImplemented` rather than guessed at. Saves only
//! uncompressed 24-bit RGB and 32-bit RGBA, the two formats every BMP reader
//! is guaranteed to accept.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::codec::{CodecFeatures, CodecInfo, Load, LoadOptions, MagicNumber, Save, SaveOptions};
use crate::error::CodecError;
use crate::image::{Image, Palette};
use crate::pixel_format::PixelFormat;
use crate::io::Stream;

const FILE_HEADER_LEN: u32 = 14;
const INFO_HEADER_LEN: u32 = 40;

pub fn codec_info() -> CodecInfo {
    CodecInfo {
        name: "BMP",
        version: "1.0.0",
        description: "Windows bitmap",
        magic_numbers: alloc::vec![MagicNumber::literal(0, b"BM")],
        extensions: alloc::vec!["bmp", "dib"],
        mime_types: alloc::vec!["image/bmp", "image/x-ms-bmp"],
        load_features: CodecFeatures::STATIC,
        save_features: CodecFeatures::STATIC,
        pixel_formats: alloc::vec![PixelFormat::Bpp8Indexed, PixelFormat::Bpp24Rgb, PixelFormat::Bpp32Rgba],
        compressions: alloc::vec![crate::pixel_format::Compression::None, crate::pixel_format::Compression::Rle],
        default_compression: crate::pixel_format::Compression::None,
        compression_level: None,
        new_loader: Some(|| Box::new(BmpLoad::default())),
        new_saver: Some(|| Box::new(BmpSave)),
    }
}

#[derive(Default)]
struct BmpLoad {
    done: bool,
    bit_count: u16,
    top_down: bool,
    color_count: u32,
}

impl Load for BmpLoad {
    fn load_init(&mut self, _stream: &mut dyn Stream, _options: &LoadOptions) -> Result<(), CodecError> {
        Ok(())
    }

    fn load_seek_next_frame(&mut self, stream: &mut dyn Stream) -> Result<Image, CodecError> {
        if self.done {
            return Err(CodecError::NoMoreFrames);
        }
        self.done = true;

        let mut file_header = [0u8; 14];
        stream.strict_read(&mut file_header)?;
        if &file_header[0..2] != b"BM" {
            log::warn!("BMP: missing BM magic");
            return Err(CodecError::InvalidHeader(String::from("missing BM magic")));
        }
        let pixel_offset = u32::from_le_bytes(file_header[10..14].try_into().unwrap());

        let mut info_header = [0u8; 40];
        stream.strict_read(&mut info_header)?;
        let header_size = u32::from_le_bytes(info_header[0..4].try_into().unwrap());
        if header_size < INFO_HEADER_LEN {
            return Err(CodecError::InvalidHeader(format!("unsupported BITMAPINFOHEADER size {header_size}")));
        }
        let width = i32::from_le_bytes(info_header[4..8].try_into().unwrap());
        let raw_height = i32::from_le_bytes(info_header[8..12].try_into().unwrap());
        let bit_count = u16::from_le_bytes(info_header[14..16].try_into().unwrap());
        let compression = u32::from_le_bytes(info_header[16..20].try_into().unwrap());
        let mut colors_used = u32::from_le_bytes(info_header[32..36].try_into().unwrap());

        if compression != 0 {
            log::warn!("BMP: compression method {compression} is not implemented");
            return Err(CodecError::NotImplemented(format!("BMP compression method {compression}")));
        }
        if width <= 0 || raw_height == 0 {
            return Err(CodecError::DimensionsTooLarge {
                width: width.max(0) as u32,
                height: raw_height.unsigned_abs(),
            });
        }

        self.top_down = raw_height < 0;
        self.bit_count = bit_count;
        let height = raw_height.unsigned_abs();
        let width = width as u32;

        let pf = match bit_count {
            1 | 4 | 8 => {
                if colors_used == 0 {
                    colors_used = 1u32 << bit_count;
                }
                self.color_count = colors_used;
                match bit_count {
                    1 => PixelFormat::Bpp1Indexed,
                    4 => PixelFormat::Bpp4Indexed,
                    _ => PixelFormat::Bpp8Indexed,
                }
            }
            24 => PixelFormat::Bpp24Bgr,
            32 => PixelFormat::Bpp32Bgra,
            other => return Err(CodecError::UnsupportedVariant(format!("BMP bit depth {other}"))),
        };

        let mut image = Image::skeleton(width, height, pf)?;

        if matches!(bit_count, 1 | 4 | 8) {
            let mut palette_bytes = vec![0u8; self.color_count as usize * 4];
            stream.strict_read(&mut palette_bytes)?;
            // BGRX entries in the file; store as packed BGR triplets.
            let mut rgb = Vec::with_capacity(self.color_count as usize * 3);
            for entry in palette_bytes.chunks_exact(4) {
                rgb.push(entry[0]);
                rgb.push(entry[1]);
                rgb.push(entry[2]);
            }
            image.palette = Some(Palette::from_bytes(PixelFormat::Bpp24Bgr, self.color_count, rgb)?);
        }

        stream.seek(crate::io::SeekFrom::Start(u64::from(pixel_offset)))?;
        log::trace!("BMP: {width}x{height} {pf:?}, pixel data at offset {pixel_offset}");
        Ok(image)
    }

    fn load_frame(&mut self, stream: &mut dyn Stream, image: &mut Image) -> Result<(), CodecError> {
        let width = image.width as usize;
        let height = image.height as usize;
        let unpadded = image.bytes_per_line as usize;
        let padded = (unpadded + 3) & !3;

        let mut raw_rows = vec![0u8; padded * height];
        stream.strict_read(&mut raw_rows)?;

        let mut pixels = vec![0u8; unpadded * height];
        for y in 0..height {
            let src_row_index = if self.top_down { y } else { height - 1 - y };
            let src = &raw_rows[src_row_index * padded..src_row_index * padded + unpadded];
            pixels[y * unpadded..y * unpadded + unpadded].copy_from_slice(src);
        }
        let _ = width;
        image.set_pixels(pixels)
    }

    fn load_finish(&mut self, _stream: &mut dyn Stream) -> Result<(), CodecError> {
        Ok(())
    }
}

struct BmpSave;

impl Save for BmpSave {
    fn save_init(&mut self, stream: &mut dyn Stream, image: &Image, _options: &SaveOptions) -> Result<(), CodecError> {
        if !matches!(image.pixel_format, PixelFormat::Bpp24Rgb | PixelFormat::Bpp32Rgba) {
            log::warn!("BMP: cannot save pixel format {:?}", image.pixel_format);
            return Err(CodecError::UnsupportedVariant(format!(
                "BMP can only save Bpp24Rgb or Bpp32Rgba, got {:?}",
                image.pixel_format
            )));
        }
        let bit_count: u16 = if image.pixel_format == PixelFormat::Bpp32Rgba { 32 } else { 24 };
        log::trace!("BMP: saving {}x{} at {bit_count} bpp", image.width, image.height);
        let unpadded = image.bytes_per_line as usize;
        let padded = (unpadded + 3) & !3;
        let pixel_data_size = padded * image.height as usize;
        let file_size = FILE_HEADER_LEN + INFO_HEADER_LEN + pixel_data_size as u32;
        let pixel_offset = FILE_HEADER_LEN + INFO_HEADER_LEN;

        let mut file_header = Vec::with_capacity(14);
        file_header.extend_from_slice(b"BM");
        file_header.extend_from_slice(&file_size.to_le_bytes());
        file_header.extend_from_slice(&0u16.to_le_bytes());
        file_header.extend_from_slice(&0u16.to_le_bytes());
        file_header.extend_from_slice(&pixel_offset.to_le_bytes());
        stream.strict_write(&file_header)?;

        let mut info_header = Vec::with_capacity(40);
        info_header.extend_from_slice(&INFO_HEADER_LEN.to_le_bytes());
        info_header.extend_from_slice(&(image.width as i32).to_le_bytes());
        info_header.extend_from_slice(&(image.height as i32).to_le_bytes());
        info_header.extend_from_slice(&1u16.to_le_bytes());
        info_header.extend_from_slice(&bit_count.to_le_bytes());
        info_header.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
        info_header.extend_from_slice(&(pixel_data_size as u32).to_le_bytes());
        info_header.extend_from_slice(&2835i32.to_le_bytes());
        info_header.extend_from_slice(&2835i32.to_le_bytes());
        info_header.extend_from_slice(&0u32.to_le_bytes());
        info_header.extend_from_slice(&0u32.to_le_bytes());
        stream.strict_write(&info_header)
    }

    fn save_seek_next_frame(&mut self, _stream: &mut dyn Stream, _image: &Image) -> Result<(), CodecError> {
        Ok(())
    }

    fn save_frame(&mut self, stream: &mut dyn Stream, image: &Image) -> Result<(), CodecError> {
        let pixels = image
            .pixels()
            .ok_or_else(|| CodecError::InvalidData(String::from("save_frame requires pixel data")))?;
        let unpadded = image.bytes_per_line as usize;
        let padded = (unpadded + 3) & !3;
        let pad = vec![0u8; padded - unpadded];
        let bypp = image.pixel_format.bits_per_pixel() as usize / 8;

        for y in (0..image.height as usize).rev() {
            let row = &pixels[y * unpadded..y * unpadded + unpadded];
            let mut swapped = vec![0u8; unpadded];
            for (chunk_in, chunk_out) in row.chunks_exact(bypp).zip(swapped.chunks_exact_mut(bypp)) {
                chunk_out[0] = chunk_in[2];
                chunk_out[1] = chunk_in[1];
                chunk_out[2] = chunk_in[0];
                if bypp == 4 {
                    chunk_out[3] = chunk_in[3];
                }
            }
            stream.strict_write(&swapped)?;
            stream.strict_write(&pad)?;
        }
        Ok(())
    }

    fn save_finish(&mut self, _stream: &mut dyn Stream) -> Result<(), CodecError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ReadOnlyMemoryStream;

    #[test]
    fn round_trips_a_24bit_rgb_image_through_save_then_load() {
        let image = Image::with_pixels(
            2,
            1,
            PixelFormat::Bpp24Rgb,
            alloc::vec![255, 0, 0, 0, 255, 0],
        )
        .unwrap();

        let mut encoded = Vec::new();
        encoded.resize(14 + 40 + 8, 0u8);
        let mut cursor = crate::io::ReadWriteMemoryStream::new(&mut encoded);
        let mut saver = BmpSave;
        saver.save_init(&mut cursor, &image, &SaveOptions::default()).unwrap();
        saver.save_frame(&mut cursor, &image).unwrap();

        let mut stream = ReadOnlyMemoryStream::new(&encoded);
        let mut loader = BmpLoad::default();
        loader.load_init(&mut stream, &LoadOptions::default()).unwrap();
        let mut loaded = loader.load_seek_next_frame(&mut stream).unwrap();
        assert_eq!((loaded.width, loaded.height), (2, 1));
        assert_eq!(loaded.pixel_format, PixelFormat::Bpp24Bgr);
        loader.load_frame(&mut stream, &mut loaded).unwrap();
        // BMP stores BGR; the saved RGB row {255,0,0, 0,255,0} becomes BGR
        // {0,0,255, 0,255,0} on disk.
        assert_eq!(loaded.pixels().unwrap(), &[0, 0, 255, 0, 255, 0]);
    }

    #[test]
    fn rejects_unsupported_compression_methods() {
        let mut header = Vec::new();
        header.extend_from_slice(b"BM");
        header.extend_from_slice(&54u32.to_le_bytes());
        header.extend_from_slice(&0u16.to_le_bytes());
        header.extend_from_slice(&0u16.to_le_bytes());
        header.extend_from_slice(&54u32.to_le_bytes());
        header.extend_from_slice(&40u32.to_le_bytes());
        header.extend_from_slice(&1i32.to_le_bytes());
        header.extend_from_slice(&1i32.to_le_bytes());
        header.extend_from_slice(&1u16.to_le_bytes());
        header.extend_from_slice(&24u16.to_le_bytes());
        header.extend_from_slice(&1u32.to_le_bytes()); // BI_RLE8
        header.extend_from_slice(&[0u8; 20]);

        let mut stream = ReadOnlyMemoryStream::new(&header);
        let mut loader = BmpLoad::default();
        loader.load_init(&mut stream, &LoadOptions::default()).unwrap();
        assert!(matches!(
            loader.load_seek_next_frame(&mut stream),
            Err(CodecError::NotImplemented(_))
        ));
    }
}
