//! Technical façade: drive the engine against any caller-supplied
//! [`Stream`] implementation — a gzip wrapper, an encrypted transport, a
//! network socket, a memory view the other façades don't cover. This is the
//! thinnest façade: its functions are direct re-exports of
//! [`crate::engine`]'s constructors, `no_std`-compatible since it never
//! touches the filesystem.

use crate::codec::{CodecInfo, LoadOptions, SaveOptions};
use crate::engine::{LoadSession, SaveSession};
use crate::error::CodecError;
use crate::image::Image;
use crate::io::Stream;
use enough::Stop;

pub fn load_from_stream<'s>(
    stream: &'s mut dyn Stream,
    codec: &CodecInfo,
    options: &LoadOptions,
) -> Result<LoadSession<'s>, CodecError> {
    LoadSession::new(codec, stream, options)
}

pub fn load_from_stream_with_stop<'s>(
    stream: &'s mut dyn Stream,
    codec: &CodecInfo,
    options: &LoadOptions,
    stop: &'s dyn Stop,
) -> Result<LoadSession<'s>, CodecError> {
    LoadSession::new_with_stop(codec, stream, options, stop)
}

pub fn save_to_stream<'s>(
    stream: &'s mut dyn Stream,
    image: &Image,
    codec: &CodecInfo,
    options: &SaveOptions,
) -> Result<SaveSession<'s>, CodecError> {
    SaveSession::new(codec, stream, image, options)
}

pub fn save_to_stream_with_stop<'s>(
    stream: &'s mut dyn Stream,
    image: &Image,
    codec: &CodecInfo,
    options: &SaveOptions,
    stop: &'s dyn Stop,
) -> Result<SaveSession<'s>, CodecError> {
    SaveSession::new_with_stop(codec, stream, image, options, stop)
}

/// Identify a stream's format by magic number without consuming it.
pub fn probe_stream(stream: &mut dyn Stream) -> Result<&'static CodecInfo, CodecError> {
    crate::engine::probe(stream)
}
