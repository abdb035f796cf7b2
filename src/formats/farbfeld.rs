//! farbfeld: `"farbfeld"` magic, big-endian width/height, then straight
//! 16-bit-per-channel RGBA rows. One frame, no compression, no metadata.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::codec::{CodecFeatures, CodecInfo, Load, LoadOptions, MagicNumber, Save, SaveOptions};
use crate::error::CodecError;
use crate::image::Image;
use crate::io::Stream;
use crate::pixel_format::PixelFormat;

const MAGIC: &[u8; 8] = b"farbfeld";

pub fn codec_info() -> CodecInfo {
    CodecInfo {
        name: "FARBFELD",
        version: "1.0.0",
        description: "farbfeld lossless RGBA16 image format",
        magic_numbers: alloc::vec![MagicNumber::literal(0, MAGIC)],
        extensions: alloc::vec!["ff"],
        mime_types: alloc::vec!["image/farbfeld"],
        load_features: CodecFeatures::STATIC,
        save_features: CodecFeatures::STATIC,
        pixel_formats: alloc::vec![PixelFormat::Bpp64Rgba],
        compressions: alloc::vec![crate::pixel_format::Compression::None],
        default_compression: crate::pixel_format::Compression::None,
        compression_level: None,
        new_loader: Some(|| Box::new(FarbfeldLoad::default())),
        new_saver: Some(|| Box::new(FarbfeldSave)),
    }
}

#[derive(Default)]
struct FarbfeldLoad {
    done: bool,
}

impl Load for FarbfeldLoad {
    fn load_init(&mut self, stream: &mut dyn Stream, _options: &LoadOptions) -> Result<(), CodecError> {
        let mut magic = [0u8; 8];
        stream.strict_read(&mut magic)?;
        if &magic != MAGIC {
            log::warn!("farbfeld: missing magic");
            return Err(CodecError::InvalidHeader(String::from("missing farbfeld magic")));
        }
        Ok(())
    }

    fn load_seek_next_frame(&mut self, stream: &mut dyn Stream) -> Result<Image, CodecError> {
        if self.done {
            return Err(CodecError::NoMoreFrames);
        }
        self.done = true;
        let mut dims = [0u8; 8];
        stream.strict_read(&mut dims)?;
        let width = u32::from_be_bytes(dims[0..4].try_into().unwrap());
        let height = u32::from_be_bytes(dims[4..8].try_into().unwrap());
        log::trace!("farbfeld: {width}x{height}");
        Image::skeleton(width, height, PixelFormat::Bpp64Rgba)
    }

    fn load_frame(&mut self, stream: &mut dyn Stream, image: &mut Image) -> Result<(), CodecError> {
        let mut pixels = vec![0u8; image.height as usize * image.bytes_per_line as usize];
        stream.strict_read(&mut pixels)?;
        image.set_pixels(pixels)
    }

    fn load_finish(&mut self, _stream: &mut dyn Stream) -> Result<(), CodecError> {
        Ok(())
    }
}

struct FarbfeldSave;

impl Save for FarbfeldSave {
    fn save_init(&mut self, stream: &mut dyn Stream, image: &Image, _options: &SaveOptions) -> Result<(), CodecError> {
        if image.pixel_format != PixelFormat::Bpp64Rgba {
            log::warn!("farbfeld: cannot save pixel format {:?}", image.pixel_format);
            return Err(CodecError::PixelFormatMismatch {
                expected: PixelFormat::Bpp64Rgba,
                actual: image.pixel_format,
            });
        }
        log::trace!("farbfeld: saving {}x{}", image.width, image.height);
        stream.strict_write(MAGIC)?;
        stream.strict_write(&image.width.to_be_bytes())?;
        stream.strict_write(&image.height.to_be_bytes())
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
