//! Advanced façade: the Junior façade's path/save convenience plus an
//! explicit streaming session (`start` → repeated `next_frame` → `stop`,
//! i.e. [`LoadSession`]/[`SaveSession`] directly), memory-backed streams, and
//! an optional codec hint that skips magic-number probing.

use alloc::boxed::Box;
use alloc::vec::Vec;
use std::path::Path;

use crate::codec::{CodecInfo, LoadOptions, SaveOptions};
use crate::engine::{LoadSession, SaveSession};
use crate::error::CodecError;
use crate::image::Image;
use crate::io::{ExpandingBufferStream, FileStream, ReadOnlyMemoryStream, ReadWriteMemoryStream};

/// Begin a streaming load from a file. Pass `codec_hint` to skip probing
/// when the caller already knows the format (e.g. from a content-type
/// header the filename doesn't reflect).
pub fn start_loading_from_file(
    path: impl AsRef<Path>,
    codec_hint: Option<&'static CodecInfo>,
) -> Result<LoadSession<'static>, CodecError> {
    let path = path.as_ref();
    let mut stream = FileStream::open_for_read(path)?;
    let codec = match codec_hint {
        Some(c) => c,
        None => crate::engine::probe(&mut stream).or_else(|_| {
            crate::codec::registry::from_path(&path.to_string_lossy()).ok_or(CodecError::UnrecognizedFormat)
        })?,
    };
    LoadSession::from_owned_stream(codec, Box::new(stream), &LoadOptions::default(), &enough::Unstoppable)
}

/// Begin a streaming load from an in-memory buffer.
pub fn start_loading_from_memory<'d>(
    data: &'d [u8],
    codec_hint: Option<&'static CodecInfo>,
) -> Result<LoadSession<'d>, CodecError> {
    let mut stream = ReadOnlyMemoryStream::new(data);
    let codec = match codec_hint {
        Some(c) => c,
        None => crate::engine::probe(&mut stream)?,
    };
    LoadSession::from_owned_stream(codec, Box::new(stream), &LoadOptions::default(), &enough::Unstoppable)
}

/// Begin a streaming save to a file.
pub fn start_saving_to_file(
    path: impl AsRef<Path>,
    image: &Image,
    codec_hint: Option<&'static CodecInfo>,
) -> Result<SaveSession<'static>, CodecError> {
    let path = path.as_ref();
    let codec = codec_hint
        .or_else(|| crate::codec::registry::from_path(&path.to_string_lossy()))
        .ok_or(CodecError::UnrecognizedFormat)?;
    let stream = FileStream::create_for_write(path)?;
    SaveSession::from_owned_stream(codec, Box::new(stream), image, &SaveOptions::default(), &enough::Unstoppable)
}

/// Begin a streaming save into a caller-owned fixed-size buffer. The buffer
/// must already be large enough for the encoded output; oversized writes
/// fail with `CodecError::Io` the same as any other fixed memory stream.
pub fn start_saving_to_memory<'d>(
    buffer: &'d mut [u8],
    image: &Image,
    codec_hint: &'static CodecInfo,
) -> Result<SaveSession<'d>, CodecError> {
    let stream = ReadWriteMemoryStream::new(buffer);
    SaveSession::from_owned_stream(codec_hint, Box::new(stream), image, &SaveOptions::default(), &enough::Unstoppable)
}

/// Encode `image` in one call and return the freshly allocated bytes.
///
/// Unlike the other `start_saving_*` functions this does not hand back a
/// session: once an [`ExpandingBufferStream`] is boxed as `Box<dyn Stream>`
/// inside a `SaveSession` there is no way to get the concrete buffer back
/// out, so the single-shot form drives the adapter directly instead.
pub fn save_to_new_buffer(image: &Image, codec: &'static CodecInfo) -> Result<Vec<u8>, CodecError> {
    let mut stream = ExpandingBufferStream::new();
    let options = SaveOptions::default();
    let new_saver = codec
        .new_saver
        .ok_or_else(|| CodecError::NotImplemented(alloc::format!("{} has no save adapter", codec.name)))?;
    let mut adapter = new_saver();
    adapter.save_init(&mut stream, image, &options)?;
    adapter.save_seek_next_frame(&mut stream, image)?;
    adapter.save_frame(&mut stream, image)?;
    adapter.save_finish(&mut stream)?;
    Ok(stream.into_inner())
}
