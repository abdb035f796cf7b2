//! Junior façade: path in, image out. Single frame, default options, codec
//! chosen automatically — the easiest way to decode or encode one file.

use alloc::boxed::Box;
use std::path::Path;

use crate::codec::{LoadOptions, SaveOptions};
use crate::engine::{LoadSession, SaveSession};
use crate::error::CodecError;
use crate::image::Image;
use crate::io::FileStream;

/// Decode the first frame of the image at `path`.
///
/// The codec is chosen by sniffing the file's magic number; if no codec
/// claims the header, the extension is tried as a fallback (some formats,
/// like XBM, have no fixed magic bytes to sniff).
pub fn load_from_file(path: impl AsRef<Path>) -> Result<Image, CodecError> {
    let path = path.as_ref();
    let mut stream = FileStream::open_for_read(path)?;
    let codec = crate::engine::probe(&mut stream).or_else(|_| {
        crate::codec::registry::from_path(&path.to_string_lossy()).ok_or(CodecError::UnrecognizedFormat)
    })?;
    let options = LoadOptions::default();
    let mut session =
        LoadSession::from_owned_stream(codec, Box::new(stream), &options, &enough::Unstoppable)?;
    let image = session
        .next_frame()?
        .ok_or_else(|| CodecError::InvalidData(alloc::string::String::from("empty image stream")))?;
    session.finish()?;
    Ok(image)
}

/// Encode `image` and write it to `path`, choosing the codec by the path's
/// extension (there is no pixel content to sniff a format from on save).
pub fn save_to_file(path: impl AsRef<Path>, image: &Image) -> Result<(), CodecError> {
    let path = path.as_ref();
    let codec = crate::codec::registry::from_path(&path.to_string_lossy()).ok_or(CodecError::UnrecognizedFormat)?;
    let stream = FileStream::create_for_write(path)?;
    let options = SaveOptions::default();
    let mut session =
        SaveSession::from_owned_stream(codec, Box::new(stream), image, &options, &enough::Unstoppable)?;
    session.write_frame(image)?;
    session.finish()
}
