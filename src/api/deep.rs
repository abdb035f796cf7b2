//! Deep façade: like [`super::advanced`], but the codec is mandatory (no
//! magic-number probing, no extension guessing) and the caller supplies a
//! fully populated [`LoadOptions`]/[`SaveOptions`] instead of defaults.

use alloc::boxed::Box;
use std::path::Path;

use crate::codec::{CodecInfo, LoadOptions, SaveOptions};
use crate::engine::{LoadSession, SaveSession};
use crate::error::CodecError;
use crate::image::Image;
use crate::io::{FileStream, ReadOnlyMemoryStream, ReadWriteMemoryStream};

pub fn load_from_file(
    path: impl AsRef<Path>,
    codec: &'static CodecInfo,
    options: &LoadOptions,
) -> Result<LoadSession<'static>, CodecError> {
    let stream = FileStream::open_for_read(path)?;
    LoadSession::from_owned_stream(codec, Box::new(stream), options, &enough::Unstoppable)
}

pub fn load_from_memory<'d>(
    data: &'d [u8],
    codec: &'static CodecInfo,
    options: &LoadOptions,
) -> Result<LoadSession<'d>, CodecError> {
    let stream = ReadOnlyMemoryStream::new(data);
    LoadSession::from_owned_stream(codec, Box::new(stream), options, &enough::Unstoppable)
}

pub fn save_to_file(
    path: impl AsRef<Path>,
    image: &Image,
    codec: &'static CodecInfo,
    options: &SaveOptions,
) -> Result<SaveSession<'static>, CodecError> {
    let stream = FileStream::create_for_write(path)?;
    SaveSession::from_owned_stream(codec, Box::new(stream), image, options, &enough::Unstoppable)
}

pub fn save_to_memory<'d>(
    buffer: &'d mut [u8],
    image: &Image,
    codec: &'static CodecInfo,
    options: &SaveOptions,
) -> Result<SaveSession<'d>, CodecError> {
    let stream = ReadWriteMemoryStream::new(buffer);
    SaveSession::from_owned_stream(codec, Box::new(stream), image, options, &enough::Unstoppable)
}
