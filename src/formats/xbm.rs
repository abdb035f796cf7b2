//! X BitMap: a C header file declaring `#define <name>_width`/`_height`
//! macros followed by a `static char .../short ... [] = { 0x1c, 0x2a, ... };`
//! array of row bytes, each byte bit-reversed relative to in-memory pixel
//! order (X11 stores the leftmost pixel in the low bit).
//!
//! A comment-skipping helper exists in at least one reference loader for
//! this format but its body is dead code — so a `/* ... */` comment
//! preamble before the first `#define` is never actually skipped, and a
//! file that opens with one is rejected because the first line read
//! doesn't start with `"#define "`. This codec reproduces that rejection
//! rather than adding comment-skipping support that was never real.
//! There is no XBM encoder here; the format's only realistic consumers
//! read it, they don't write it, so this codec is load-only.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::codec::{CodecFeatures, CodecInfo, Load, LoadOptions};
use crate::error::CodecError;
use crate::image::{Image, Palette};
use crate::io::Stream;
use crate::pixel_format::PixelFormat;

pub fn codec_info() -> CodecInfo {
    CodecInfo {
        name: "XBM",
        version: "1.0.0",
        description: "X BitMap",
        // XBM is a C source file; there is no byte-level magic to match.
        magic_numbers: Vec::new(),
        extensions: alloc::vec!["xbm"],
        mime_types: alloc::vec!["image/x-xbitmap"],
        load_features: CodecFeatures::STATIC,
        save_features: CodecFeatures::empty(),
        pixel_formats: alloc::vec![PixelFormat::Bpp1Indexed],
        compressions: alloc::vec![crate::pixel_format::Compression::None],
        default_compression: crate::pixel_format::Compression::None,
        compression_level: None,
        new_loader: Some(|| Box::new(XbmLoad::default())),
        new_saver: None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum XbmVersion {
    V10,
    V11,
}

#[derive(Default)]
struct XbmLoad {
    done: bool,
    version: Option<XbmVersion>,
}

/// Read one line (without its trailing `\n`). Returns `None` at a clean EOF
/// with no bytes read.
fn read_line(stream: &mut dyn Stream) -> Result<Option<String>, CodecError> {
    let mut line = String::new();
    let mut any = false;
    loop {
        let mut b = [0u8; 1];
        let n = stream.tolerant_read(&mut b)?;
        if n == 0 {
            break;
        }
        any = true;
        if b[0] == b'\n' {
            break;
        }
        line.push(b[0] as char);
    }
    if !any {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

fn require_line(stream: &mut dyn Stream) -> Result<String, CodecError> {
    read_line(stream)?.ok_or(CodecError::UnexpectedEof)
}

fn extract_dimension(line: &str, needle: &str) -> Result<u32, CodecError> {
    if !line.starts_with("#define ") {
        log::warn!("XBM: expected a #define line, got {line:?}");
        return Err(CodecError::InvalidHeader(String::from("XBM: expected a #define line")));
    }
    let idx = line
        .find(needle)
        .ok_or_else(|| CodecError::InvalidHeader(format!("XBM: missing {needle:?} in #define line")))?;
    let rest = line[idx + needle.len()..].trim_start();
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if end == 0 {
        return Err(CodecError::InvalidHeader(String::from("XBM: expected an integer after #define")));
    }
    rest[..end]
        .parse::<u32>()
        .map_err(|_| CodecError::InvalidHeader(String::from("XBM: malformed dimension")))
}

const REVERSE_4BITS: [u8; 16] = [0x0, 0x8, 0x4, 0xc, 0x2, 0xa, 0x6, 0xe, 0x1, 0x9, 0x5, 0xd, 0x3, 0xb, 0x7, 0xf];

fn reverse_byte(byte: u8) -> u8 {
    (REVERSE_4BITS[(byte & 0xF) as usize] << 4) | REVERSE_4BITS[(byte >> 4) as usize]
}

/// Pull every hex literal (`0x1c`, `1c`, ...) out of a C array-initializer
/// line, low byte only — matching a `sscanf("%x %c", ...)` loop, which
/// discards anything above the low 8 bits of each match.
fn scan_hex_literals(line: &str) -> Vec<u8> {
    let bytes = line.as_bytes();
    let mut i = 0;
    let mut out = Vec::new();
    while i < bytes.len() {
        while i < bytes.len() && (bytes[i] as char).is_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }
        if i + 1 < bytes.len() && bytes[i] == b'0' && (bytes[i + 1] == b'x' || bytes[i + 1] == b'X') {
            i += 2;
        }
        let hex_start = i;
        while i < bytes.len() && (bytes[i] as char).is_ascii_hexdigit() {
            i += 1;
        }
        if i == hex_start {
            break;
        }
        if let Ok(val) = u32::from_str_radix(&line[hex_start..i], 16) {
            out.push(val as u8);
        }
        if i < bytes.len() {
            i += 1; // consume the delimiter (comma, brace, ...) like the %c in sscanf
        }
    }
    out
}

impl Load for XbmLoad {
    fn load_init(&mut self, _stream: &mut dyn Stream, _options: &LoadOptions) -> Result<(), CodecError> {
        Ok(())
    }

    fn load_seek_next_frame(&mut self, stream: &mut dyn Stream) -> Result<Image, CodecError> {
        if self.done {
            return Err(CodecError::NoMoreFrames);
        }
        self.done = true;

        let width_line = require_line(stream)?;
        let width = extract_dimension(&width_line, "_width ")?;

        let height_line = require_line(stream)?;
        let height = extract_dimension(&height_line, "_height ")?;

        // Skip any other #define lines (e.g. _x_hot/_y_hot) until the array
        // declaration.
        let mut decl = require_line(stream)?;
        while decl.contains("#define ") {
            decl = require_line(stream)?;
        }

        let bracket = decl.find('[').filter(|&i| decl[i..].contains('{'));
        if bracket.is_none() {
            log::warn!("XBM: C array declaration not found");
            return Err(CodecError::InvalidHeader(String::from("XBM: C array declaration not found")));
        }

        self.version = Some(if decl.contains("short") {
            XbmVersion::V10
        } else if decl.contains("char") {
            XbmVersion::V11
        } else {
            log::warn!("XBM: data array declared neither char nor short");
            return Err(CodecError::InvalidHeader(String::from(
                "XBM: data array must be declared [unsigned] char or [unsigned] short",
            )));
        });

        log::trace!("XBM: {width}x{height}, {:?}", self.version);
        let mut image = Image::skeleton(width, height, PixelFormat::Bpp1Indexed)?;
        image.source_image.pixel_format = Some(PixelFormat::Bpp1Indexed);
        image.source_image.compression = Some(crate::pixel_format::Compression::None);
        // Black-and-white palette: index 0 is white, index 1 is black.
        image.palette = Some(Palette::from_bytes(PixelFormat::Bpp24Rgb, 2, alloc::vec![255, 255, 255, 0, 0, 0])?);
        Ok(image)
    }

    fn load_frame(&mut self, stream: &mut dyn Stream, image: &mut Image) -> Result<(), CodecError> {
        let version = self
            .version
            .ok_or_else(|| CodecError::WrongState(String::from("load_frame called before load_seek_next_frame")))?;

        let row_bytes = (image.width + 7) / 8;
        let literals_to_read = match version {
            XbmVersion::V11 => row_bytes * image.height,
            XbmVersion::V10 => ((row_bytes + 1) / 2) * image.height,
        } as usize;

        let mut pixels = vec![0u8; image.bytes_per_line as usize * image.height as usize];
        let mut read = 0usize;
        while read < literals_to_read {
            let line = require_line(stream)?;
            for byte in scan_hex_literals(&line) {
                if read >= literals_to_read || read >= pixels.len() {
                    break;
                }
                pixels[read] = reverse_byte(byte);
                read += 1;
            }
        }
        image.set_pixels(pixels)
    }

    fn load_finish(&mut self, _stream: &mut dyn Stream) -> Result<(), CodecError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ReadOnlyMemoryStream;

    #[test]
    fn reverse_byte_matches_bit_mirror() {
        assert_eq!(reverse_byte(0b1000_0001), 0b1000_0001);
        assert_eq!(reverse_byte(0b0000_0001), 0b1000_0000);
        assert_eq!(reverse_byte(0b0000_1111), 0b1111_0000);
    }

    #[test]
    fn loads_tiny_bitmap() {
        let data = b"#define test_width 8\n#define test_height 1\nstatic char test_bits[] = {\n0x81 };\n";
        let mut stream = ReadOnlyMemoryStream::new(data);
        let mut loader = XbmLoad::default();
        loader.load_init(&mut stream, &LoadOptions::default()).unwrap();
        let mut image = loader.load_seek_next_frame(&mut stream).unwrap();
        assert_eq!((image.width, image.height), (8, 1));
        loader.load_frame(&mut stream, &mut image).unwrap();
        assert_eq!(image.pixels().unwrap(), &[reverse_byte(0x81)]);
    }

    #[test]
    fn rejects_missing_define() {
        let data = b"/* a comment */\n#define test_width 8\n";
        let mut stream = ReadOnlyMemoryStream::new(data);
        let mut loader = XbmLoad::default();
        loader.load_init(&mut stream, &LoadOptions::default()).unwrap();
        assert!(loader.load_seek_next_frame(&mut stream).is_err());
    }
}
