//! QOI ("Quite OK Image") — delegates the actual codec to `rapid-qoi`;
//! this module only adapts its one-shot API to the streaming `Load`/`Save`
//! contract and the crate's `Image` model.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use rapid_qoi::{Colors, Qoi};

use crate::codec::{CodecFeatures, CodecInfo, Load, LoadOptions, MagicNumber, Save, SaveOptions};
use crate::error::CodecError;
use crate::image::Image;
use crate::io::Stream;
use crate::pixel_format::PixelFormat;

pub fn codec_info() -> CodecInfo {
    CodecInfo {
        name: "QOI",
        version: "1.0.0",
        description: "Quite OK Image format",
        magic_numbers: alloc::vec![MagicNumber::literal(0, b"qoif")],
        extensions: alloc::vec!["qoi"],
        mime_types: alloc::vec!["image/qoi", "image/x-qoi"],
        load_features: CodecFeatures::STATIC,
        save_features: CodecFeatures::STATIC,
        pixel_formats: alloc::vec![PixelFormat::Bpp24Rgb, PixelFormat::Bpp32Rgba],
        compressions: alloc::vec![crate::pixel_format::Compression::Qoi],
        default_compression: crate::pixel_format::Compression::Qoi,
        compression_level: None,
        new_loader: Some(|| Box::new(QoiLoad::default())),
        new_saver: Some(|| Box::new(QoiSave)),
    }
}

fn map_error(e: rapid_qoi::DecodeError) -> CodecError {
    CodecError::InvalidData(format!("QOI decode error: {e:?}"))
}

#[derive(Default)]
struct QoiLoad {
    done: bool,
}

impl Load for QoiLoad {
    fn load_init(&mut self, _stream: &mut dyn Stream, _options: &LoadOptions) -> Result<(), CodecError> {
        Ok(())
    }

    fn load_seek_next_frame(&mut self, stream: &mut dyn Stream) -> Result<Image, CodecError> {
        if self.done {
            return Err(CodecError::NoMoreFrames);
        }
        self.done = true;

        let size = stream.size()? as usize;
        let mut data = alloc::vec![0u8; size];
        stream.strict_read(&mut data)?;
        let (header, decoded) = Qoi::decode_alloc(&data).map_err(|e| {
            log::warn!("QOI: decode failed: {e:?}");
            map_error(e)
        })?;

        let pf = match header.colors {
            Colors::Rgb | Colors::Srgb => PixelFormat::Bpp24Rgb,
            Colors::Rgba | Colors::SrgbLinA => PixelFormat::Bpp32Rgba,
        };
        log::trace!("QOI: {}x{} {pf:?}", header.width, header.height);
        let image = Image::with_pixels(header.width, header.height, pf, decoded)?;
        Ok(image)
    }

    fn load_frame(&mut self, _stream: &mut dyn Stream, _image: &mut Image) -> Result<(), CodecError> {
        // The whole image is decoded eagerly in load_seek_next_frame since
        // rapid-qoi has no partial/streaming decode entry point.
        Ok(())
    }

    fn load_finish(&mut self, _stream: &mut dyn Stream) -> Result<(), CodecError> {
        Ok(())
    }
}

struct QoiSave;

impl Save for QoiSave {
    fn save_init(&mut self, _stream: &mut dyn Stream, image: &Image, _options: &SaveOptions) -> Result<(), CodecError> {
        if !matches!(image.pixel_format, PixelFormat::Bpp24Rgb | PixelFormat::Bpp32Rgba) {
            log::warn!("QOI: cannot save pixel format {:?}", image.pixel_format);
            return Err(CodecError::UnsupportedVariant(format!(
                "QOI can only save Bpp24Rgb or Bpp32Rgba, got {:?}",
                image.pixel_format
            )));
        }
        Ok(())
    }

    fn save_seek_next_frame(&mut self, _stream: &mut dyn Stream, _image: &Image) -> Result<(), CodecError> {
        Ok(())
    }

    fn save_frame(&mut self, stream: &mut dyn Stream, image: &Image) -> Result<(), CodecError> {
        let pixels = image
            .pixels()
            .ok_or_else(|| CodecError::InvalidData(String::from("save_frame requires pixel data")))?;
        let colors = if image.pixel_format == PixelFormat::Bpp32Rgba { Colors::Rgba } else { Colors::Rgb };
        let header = Qoi { width: image.width, height: image.height, colors };
        let encoded = header.encode_alloc(pixels).map_err(|e| {
            log::error!("QOI: encode failed: {e:?}");
            CodecError::InvalidData(format!("QOI encode error: {e:?}"))
        })?;
        stream.strict_write(&encoded)
    }

    fn save_finish(&mut self, _stream: &mut dyn Stream) -> Result<(), CodecError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{ExpandingBufferStream, ReadOnlyMemoryStream};

    #[test]
    fn round_trips_an_rgba_image_through_save_then_load() {
        let image = Image::with_pixels(
            2,
            1,
            PixelFormat::Bpp32Rgba,
            alloc::vec![10, 20, 30, 255, 40, 50, 60, 128],
        )
        .unwrap();

        let mut out = ExpandingBufferStream::new();
        let mut saver = QoiSave;
        saver.save_init(&mut out, &image, &SaveOptions::default()).unwrap();
        saver.save_frame(&mut out, &image).unwrap();
        let encoded = out.into_inner();
        assert!(encoded.starts_with(b"qoif"));

        let mut stream = ReadOnlyMemoryStream::new(&encoded);
        let mut loader = QoiLoad::default();
        loader.load_init(&mut stream, &LoadOptions::default()).unwrap();
        let loaded = loader.load_seek_next_frame(&mut stream).unwrap();
        assert_eq!((loaded.width, loaded.height), (2, 1));
        assert_eq!(loaded.pixel_format, PixelFormat::Bpp32Rgba);
        assert_eq!(
            loaded.pixels().unwrap(),
            &[10, 20, 30, 255, 40, 50, 60, 128]
        );
    }

    #[test]
    fn rejects_saving_an_unsupported_pixel_format() {
        let image = Image::skeleton(1, 1, PixelFormat::Bpp8Grayscale).unwrap();
        let mut out = ExpandingBufferStream::new();
        let mut saver = QoiSave;
        assert!(matches!(
            saver.save_init(&mut out, &image, &SaveOptions::default()),
            Err(CodecError::UnsupportedVariant(_))
        ));
    }
}
