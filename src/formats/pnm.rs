//! PNM family: PGM (`P5`), PPM (`P6`), PAM (`P7`), and PFM (`Pf`/`PF`).
//!
//! Headers are whitespace-separated ASCII tokens with `#`-to-end-of-line
//! comments; pixel data is flat binary rows, MSB-first for 16-bit samples
//! (PGM/PPM/PAM) and native-endian little-endian IEEE754 for PFM, per the
//! format's long-standing convention.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::codec::{CodecFeatures, CodecInfo, Load, LoadOptions, MagicNumber, Save, SaveOptions};
use crate::error::CodecError;
use crate::image::Image;
use crate::io::Stream;
use crate::pixel_format::PixelFormat;

pub fn codec_info() -> CodecInfo {
    CodecInfo {
        name: "PNM",
        version: "1.0.0",
        description: "PNM family: PGM, PPM, PAM, and PFM",
        magic_numbers: alloc::vec![
            MagicNumber::literal(0, b"P5"),
            MagicNumber::literal(0, b"P6"),
            MagicNumber::literal(0, b"P7"),
            MagicNumber::literal(0, b"Pf"),
            MagicNumber::literal(0, b"PF"),
        ],
        extensions: alloc::vec!["pgm", "ppm", "pam", "pfm", "pnm"],
        mime_types: alloc::vec!["image/x-portable-graymap", "image/x-portable-pixmap"],
        load_features: CodecFeatures::STATIC,
        save_features: CodecFeatures::STATIC,
        pixel_formats: alloc::vec![
            PixelFormat::Bpp8Grayscale,
            PixelFormat::Bpp16Grayscale,
            PixelFormat::Bpp24Rgb,
            PixelFormat::Bpp48Rgb,
            PixelFormat::Bpp32Rgba,
            PixelFormat::Bpp32GrayscaleFloat,
            PixelFormat::Bpp96RgbFloat,
        ],
        compressions: alloc::vec![crate::pixel_format::Compression::None],
        default_compression: crate::pixel_format::Compression::None,
        compression_level: None,
        new_loader: Some(|| Box::new(PnmLoad::default())),
        new_saver: Some(|| Box::new(PnmSave)),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Variant {
    Pgm,
    Ppm,
    Pam { pixel_format: PixelFormat },
    Pfm { color: bool },
}

/// Pull the next whitespace-delimited token, skipping `#` comments, from a
/// byte cursor positioned right after the two-byte magic number.
struct HeaderCursor<'a> {
    stream: &'a mut dyn Stream,
}

impl HeaderCursor<'_> {
    fn read_byte(&mut self) -> Result<u8, CodecError> {
        let mut b = [0u8; 1];
        self.stream.strict_read(&mut b)?;
        Ok(b[0])
    }

    fn next_token(&mut self) -> Result<String, CodecError> {
        let mut byte;
        loop {
            byte = self.read_byte()?;
            if byte == b'#' {
                while self.read_byte()? != b'\n' {}
                continue;
            }
            if !byte.is_ascii_whitespace() {
                break;
            }
        }
        let mut token = String::new();
        token.push(byte as char);
        loop {
            let b = self.read_byte()?;
            if b.is_ascii_whitespace() {
                break;
            }
            token.push(b as char);
        }
        Ok(token)
    }

    fn next_u32(&mut self) -> Result<u32, CodecError> {
        let token = self.next_token()?;
        token
            .parse()
            .map_err(|_| CodecError::InvalidHeader(format!("expected an integer, got {token:?}")))
    }
}

#[derive(Default)]
struct PnmLoad {
    variant: Option<Variant>,
    done: bool,
}

impl Load for PnmLoad {
    fn load_init(&mut self, stream: &mut dyn Stream, _options: &LoadOptions) -> Result<(), CodecError> {
        let mut magic = [0u8; 2];
        stream.strict_read(&mut magic)?;
        self.variant = Some(match &magic {
            b"P5" => Variant::Pgm,
            b"P6" => Variant::Ppm,
            b"P7" => Variant::Pam {
                pixel_format: PixelFormat::Unknown,
            },
            b"Pf" => Variant::Pfm { color: false },
            b"PF" => Variant::Pfm { color: true },
            _ => {
                log::warn!("PNM: unrecognized magic {:?}", magic);
                return Err(CodecError::InvalidHeader(String::from("unrecognized PNM magic")));
            }
        });
        Ok(())
    }

    fn load_seek_next_frame(&mut self, stream: &mut dyn Stream) -> Result<Image, CodecError> {
        if self.done {
            return Err(CodecError::NoMoreFrames);
        }
        self.done = true;
        let mut cursor = HeaderCursor { stream };
        match self.variant.take().expect("load_init sets variant") {
            Variant::Pgm => {
                let width = cursor.next_u32()?;
                let height = cursor.next_u32()?;
                let maxval = cursor.next_u32()?;
                let pf = if maxval > 255 { PixelFormat::Bpp16Grayscale } else { PixelFormat::Bpp8Grayscale };
                self.variant = Some(Variant::Pgm);
                log::trace!("PNM: PGM {width}x{height} {pf:?}");
                Image::skeleton(width, height, pf)
            }
            Variant::Ppm => {
                let width = cursor.next_u32()?;
                let height = cursor.next_u32()?;
                let maxval = cursor.next_u32()?;
                let pf = if maxval > 255 { PixelFormat::Bpp48Rgb } else { PixelFormat::Bpp24Rgb };
                self.variant = Some(Variant::Ppm);
                log::trace!("PNM: PPM {width}x{height} {pf:?}");
                Image::skeleton(width, height, pf)
            }
            Variant::Pam { .. } => {
                let (mut width, mut height, mut depth, mut maxval) = (0u32, 0u32, 0u32, 255u32);
                loop {
                    let token = cursor.next_token()?;
                    match token.as_str() {
                        "WIDTH" => width = cursor.next_u32()?,
                        "HEIGHT" => height = cursor.next_u32()?,
                        "DEPTH" => depth = cursor.next_u32()?,
                        "MAXVAL" => maxval = cursor.next_u32()?,
                        "TUPLTYPE" => {
                            cursor.next_token()?;
                        }
                        "ENDHDR" => break,
                        other => {
                            return Err(CodecError::InvalidHeader(format!("unexpected PAM header field {other:?}")));
                        }
                    }
                }
                let pf = match (depth, maxval > 255) {
                    (1, false) => PixelFormat::Bpp8Grayscale,
                    (1, true) => PixelFormat::Bpp16Grayscale,
                    (3, false) => PixelFormat::Bpp24Rgb,
                    (3, true) => PixelFormat::Bpp48Rgb,
                    (4, false) => PixelFormat::Bpp32Rgba,
                    (4, true) => PixelFormat::Bpp64Rgba,
                    (other, _) => {
                        return Err(CodecError::UnsupportedVariant(format!("PAM depth {other} is not supported")));
                    }
                };
                self.variant = Some(Variant::Pam { pixel_format: pf });
                log::trace!("PNM: PAM {width}x{height} {pf:?}");
                Image::skeleton(width, height, pf)
            }
            Variant::Pfm { color } => {
                let width = cursor.next_u32()?;
                let height = cursor.next_u32()?;
                let _scale = cursor.next_token()?; // sign encodes endianness; magnitude unused
                let pf = if color { PixelFormat::Bpp96RgbFloat } else { PixelFormat::Bpp32GrayscaleFloat };
                self.variant = Some(Variant::Pfm { color });
                log::trace!("PNM: PFM {width}x{height} {pf:?}");
                Image::skeleton(width, height, pf)
            }
        }
    }

    fn load_frame(&mut self, stream: &mut dyn Stream, image: &mut Image) -> Result<(), CodecError> {
        let row_len = image.bytes_per_line as usize;
        let mut pixels = vec![0u8; row_len * image.height as usize];
        match self.variant {
            Some(Variant::Pfm { .. }) => {
                // PFM rows are bottom-to-top on disk; flip into top-to-bottom storage.
                for y in (0..image.height as usize).rev() {
                    let dst_row = image.height as usize - 1 - y;
                    stream.strict_read(&mut pixels[dst_row * row_len..(dst_row + 1) * row_len])?;
                }
            }
            _ => stream.strict_read(&mut pixels)?,
        }
        image.set_pixels(pixels)
    }

    fn load_finish(&mut self, _stream: &mut dyn Stream) -> Result<(), CodecError> {
        Ok(())
    }
}

struct PnmSave;

impl Save for PnmSave {
    fn save_init(&mut self, stream: &mut dyn Stream, image: &Image, _options: &SaveOptions) -> Result<(), CodecError> {
        match image.pixel_format {
            PixelFormat::Bpp8Grayscale | PixelFormat::Bpp16Grayscale => {
                let maxval = if image.pixel_format == PixelFormat::Bpp16Grayscale { 65535 } else { 255 };
                stream.strict_write(format!("P5\n{} {}\n{}\n", image.width, image.height, maxval).as_bytes())
            }
            PixelFormat::Bpp24Rgb | PixelFormat::Bpp48Rgb => {
                let maxval = if image.pixel_format == PixelFormat::Bpp48Rgb { 65535 } else { 255 };
                stream.strict_write(format!("P6\n{} {}\n{}\n", image.width, image.height, maxval).as_bytes())
            }
            PixelFormat::Bpp32Rgba | PixelFormat::Bpp64Rgba => {
                let maxval = if image.pixel_format == PixelFormat::Bpp64Rgba { 65535 } else { 255 };
                stream.strict_write(
                    format!(
                        "P7\nWIDTH {}\nHEIGHT {}\nDEPTH 4\nMAXVAL {}\nTUPLTYPE RGB_ALPHA\nENDHDR\n",
                        image.width, image.height, maxval
                    )
                    .as_bytes(),
                )
            }
            PixelFormat::Bpp32GrayscaleFloat => stream.strict_write(format!("Pf\n{} {}\n-1.0\n", image.width, image.height).as_bytes()),
            PixelFormat::Bpp96RgbFloat => stream.strict_write(format!("PF\n{} {}\n-1.0\n", image.width, image.height).as_bytes()),
            other => {
                log::warn!("PNM: cannot save pixel format {other:?}");
                Err(CodecError::UnsupportedVariant(format!("PNM cannot save {other:?} directly")))
            }
        }
    }

    fn save_seek_next_frame(&mut self, _stream: &mut dyn Stream, _image: &Image) -> Result<(), CodecError> {
        Ok(())
    }

    fn save_frame(&mut self, stream: &mut dyn Stream, image: &Image) -> Result<(), CodecError> {
        let pixels = image
            .pixels()
            .ok_or_else(|| CodecError::InvalidData(String::from("save_frame requires pixel data")))?;
        if image.pixel_format == PixelFormat::Bpp32GrayscaleFloat || image.pixel_format == PixelFormat::Bpp96RgbFloat {
            let row_len = image.bytes_per_line as usize;
            for y in (0..image.height as usize).rev() {
                stream.strict_write(&pixels[y * row_len..(y + 1) * row_len])?;
            }
            Ok(())
        } else {
            stream.strict_write(pixels)
        }
    }

    fn save_finish(&mut self, _stream: &mut dyn Stream) -> Result<(), CodecError> {
        Ok(())
    }
}
