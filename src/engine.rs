//! The streaming load/save state machine and format probing.
//!
//! State machine per call:
//!
//! ```text
//! S0 Initial --init()--> S1 Ready --seek_next_frame()--> S2 FrameOpen
//!   S2 --frame()--> S1 (ready for next frame)
//!   S1 --seek_next_frame() at EOF--> S3 Drained (NoMoreFrames)
//!   S1 | S3 --finish()--> S4 Closed
//! ```
//!
//! `finish` is called exactly once no matter which state the state machine
//! was in when the caller stopped — [`LoadSession`] and [`SaveSession`] are
//! scope guards whose `Drop` calls it if the caller never did, so a
//! mid-stream error never leaves a codec's `*_finish` unrun.

use alloc::boxed::Box;
use alloc::vec::Vec;

use enough::Stop;

use crate::codec::{CodecInfo, Load, LoadOptions, Save, SaveOptions};
use crate::error::CodecError;
use crate::image::Image;
use crate::io::Stream;
use crate::limits::Limits;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoadState {
    Ready,
    Drained,
    Closed,
}

/// A single load pass over one stream, bound to one codec.
///
/// Holds its stream as a `Box<dyn Stream + 's>` rather than a bare `&'s mut
/// dyn Stream` so the Junior/Advanced façades can hand over an owned
/// `FileStream`/`ReadOnlyMemoryStream` they opened internally, while the
/// Technical façade can still hand over a plain borrowed reference (boxed via
/// `io`'s blanket `impl Stream for &mut S`) — one session type serves both.
pub struct LoadSession<'s> {
    stream: Box<dyn Stream + 's>,
    adapter: Box<dyn Load>,
    state: LoadState,
    limits: Limits,
    frame_number: u32,
    stop: &'s dyn Stop,
}

impl<'s> LoadSession<'s> {
    pub fn new(codec: &CodecInfo, stream: &'s mut dyn Stream, options: &LoadOptions) -> Result<Self, CodecError> {
        Self::new_with_stop(codec, stream, options, &enough::Unstoppable)
    }

    /// Like [`Self::new`], but checked for cancellation between frames via
    /// `stop`. The engine has no built-in cancellation token beyond aborting
    /// the stream outright; this cooperative per-frame check is the one
    /// concession kept from `enough`'s pervasive `Stop` plumbing, and it
    /// costs nothing when callers pass `enough::Unstoppable`.
    pub fn new_with_stop(
        codec: &CodecInfo,
        stream: &'s mut dyn Stream,
        options: &LoadOptions,
        stop: &'s dyn Stop,
    ) -> Result<Self, CodecError> {
        Self::from_owned_stream(codec, Box::new(stream), options, stop)
    }

    /// Like [`Self::new_with_stop`], but takes ownership of the stream
    /// outright. Used by façades that open their own `FileStream`/memory
    /// stream and want it to live exactly as long as the session.
    pub fn from_owned_stream(
        codec: &CodecInfo,
        mut stream: Box<dyn Stream + 's>,
        options: &LoadOptions,
        stop: &'s dyn Stop,
    ) -> Result<Self, CodecError> {
        let new_loader = codec.new_loader.ok_or_else(|| {
            log::error!("{} has no load adapter", codec.name);
            CodecError::NotImplemented(alloc::format!("{} has no load adapter", codec.name))
        })?;
        let mut adapter = new_loader();
        adapter.load_init(&mut *stream, options)?;
        log::debug!("{}: load session opened", codec.name);
        Ok(Self {
            stream,
            adapter,
            state: LoadState::Ready,
            limits: options.limits.clone(),
            frame_number: 0,
            stop,
        })
    }

    /// Read the next frame's skeleton and pixels in one step. Returns
    /// `Ok(None)` once the stream is exhausted (mirrors `NoMoreFrames`
    /// becoming a sentinel value rather than an error at this layer).
    pub fn next_frame(&mut self) -> Result<Option<Image>, CodecError> {
        if self.state != LoadState::Ready {
            return Err(CodecError::WrongState(alloc::string::String::from(
                "next_frame called after the stream was drained or closed",
            )));
        }
        self.stop.check()?;
        self.limits.check_frame(self.frame_number)?;
        match self.adapter.load_seek_next_frame(&mut *self.stream) {
            Ok(mut image) => {
                self.limits.check(image.width, image.height)?;
                self.adapter.load_frame(&mut *self.stream, &mut image)?;
                image.check_valid()?;
                if let Some(pixels) = image.pixels() {
                    self.limits.check_memory(pixels.len())?;
                }
                self.frame_number += 1;
                Ok(Some(image))
            }
            Err(CodecError::NoMoreFrames) => {
                log::trace!("load session drained after {} frame(s)", self.frame_number);
                self.state = LoadState::Drained;
                Ok(None)
            }
            Err(e) => {
                log::warn!("load session frame {} failed: {e}", self.frame_number);
                Err(e)
            }
        }
    }

    /// Read every remaining frame.
    pub fn all_frames(&mut self) -> Result<Vec<Image>, CodecError> {
        let mut frames = Vec::new();
        while let Some(image) = self.next_frame()? {
            frames.push(image);
        }
        Ok(frames)
    }

    pub fn finish(mut self) -> Result<(), CodecError> {
        self.finish_mut()
    }

    fn finish_mut(&mut self) -> Result<(), CodecError> {
        if self.state == LoadState::Closed {
            return Ok(());
        }
        self.state = LoadState::Closed;
        self.adapter.load_finish(&mut *self.stream)
    }
}

impl Drop for LoadSession<'_> {
    fn drop(&mut self) {
        let _ = self.finish_mut();
    }
}

/// A single save pass over one stream, bound to one codec. See
/// [`LoadSession`] for why the stream is boxed rather than borrowed bare.
pub struct SaveSession<'s> {
    stream: Box<dyn Stream + 's>,
    adapter: Box<dyn Save>,
    closed: bool,
    stop: &'s dyn Stop,
}

impl<'s> SaveSession<'s> {
    pub fn new(codec: &CodecInfo, stream: &'s mut dyn Stream, image: &Image, options: &SaveOptions) -> Result<Self, CodecError> {
        Self::new_with_stop(codec, stream, image, options, &enough::Unstoppable)
    }

    /// Like [`Self::new`], checked for cancellation between frames via `stop`.
    pub fn new_with_stop(
        codec: &CodecInfo,
        stream: &'s mut dyn Stream,
        image: &Image,
        options: &SaveOptions,
        stop: &'s dyn Stop,
    ) -> Result<Self, CodecError> {
        Self::from_owned_stream(codec, Box::new(stream), image, options, stop)
    }

    /// Like [`Self::new_with_stop`], but takes ownership of the stream
    /// outright (façades opening their own `FileStream`/memory stream).
    pub fn from_owned_stream(
        codec: &CodecInfo,
        mut stream: Box<dyn Stream + 's>,
        image: &Image,
        options: &SaveOptions,
        stop: &'s dyn Stop,
    ) -> Result<Self, CodecError> {
        let new_saver = codec.new_saver.ok_or_else(|| {
            log::error!("{} has no save adapter", codec.name);
            CodecError::NotImplemented(alloc::format!("{} has no save adapter", codec.name))
        })?;
        let mut adapter = new_saver();
        adapter.save_init(&mut *stream, image, options)?;
        log::debug!("{}: save session opened for {}x{}", codec.name, image.width, image.height);
        Ok(Self {
            stream,
            adapter,
            closed: false,
            stop,
        })
    }

    pub fn write_frame(&mut self, image: &Image) -> Result<(), CodecError> {
        self.stop.check()?;
        image.check_valid()?;
        self.adapter.save_seek_next_frame(&mut *self.stream, image)?;
        self.adapter.save_frame(&mut *self.stream, image)
    }

    pub fn finish(mut self) -> Result<(), CodecError> {
        self.finish_mut()
    }

    fn finish_mut(&mut self) -> Result<(), CodecError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.adapter.save_finish(&mut *self.stream)
    }
}

impl Drop for SaveSession<'_> {
    fn drop(&mut self) {
        let _ = self.finish_mut();
    }
}

/// Probe a stream's format by magic number, without consuming it (the
/// registry lookup rewinds after reading the header).
pub fn probe(stream: &mut dyn Stream) -> Result<&'static CodecInfo, CodecError> {
    match crate::codec::registry::from_magic_number_from_io(stream)? {
        Some(codec) => {
            log::debug!("probe: recognized {}", codec.name);
            Ok(codec)
        }
        None => {
            log::warn!("probe: no registered codec recognized this stream");
            Err(CodecError::UnrecognizedFormat)
        }
    }
}

/// Pick the codec's closest supported pixel format to `requested`, per the
/// "best acceptable format" rule:
///
/// 1. An exact match wins outright.
/// 2. Otherwise, among formats in the same family with bits-per-pixel >=
///    the requested format's, the smallest such bits-per-pixel wins (ties
///    broken by the codec's declared order).
/// 3. Otherwise, fall back to the codec's declared format whose channel
///    count is closest to `requested`'s (ties broken by declared order).
///
/// Returns `CodecError::UnsupportedVariant` if the codec lists no formats.
pub fn best_acceptable_format(
    codec: &CodecInfo,
    requested: crate::pixel_format::PixelFormat,
) -> Result<crate::pixel_format::PixelFormat, CodecError> {
    if codec.pixel_formats.is_empty() {
        log::error!("{} declares no supported pixel formats", codec.name);
        return Err(CodecError::UnsupportedVariant(alloc::format!(
            "{} declares no supported pixel formats",
            codec.name
        )));
    }
    if codec.pixel_formats.contains(&requested) {
        return Ok(requested);
    }
    let requested_family = requested.family();
    let requested_bpp = requested.bits_per_pixel();
    let same_family_candidate = codec
        .pixel_formats
        .iter()
        .copied()
        .filter(|pf| pf.family() == requested_family && pf.bits_per_pixel() >= requested_bpp)
        .min_by_key(|pf| pf.bits_per_pixel());
    if let Some(pf) = same_family_candidate {
        return Ok(pf);
    }
    let closest_channel_count = codec
        .pixel_formats
        .iter()
        .copied()
        .min_by_key(|pf| (pf.channels() as i64 - requested.channels() as i64).abs());
    let fallback = closest_channel_count.unwrap_or(codec.pixel_formats[0]);
    log::debug!("{}: no bpp-compatible match for {requested:?}, falling back to {fallback:?}", codec.name);
    Ok(fallback)
}
