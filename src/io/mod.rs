//! Virtual I/O stream abstraction.
//!
//! Every load/save path in the engine goes through a `dyn Stream`. Built-in
//! factories cover files, fixed memory, and expanding write buffers; the
//! Technical façade accepts any caller type that implements [`Stream`]
//! directly — there is no separate "caller-supplied callback table" needed,
//! since a Rust trait object already is that table.
//!
//! `close()` has no method on this trait: Rust's `Drop` is the idiomatic
//! mapping for "idempotent, always-called cleanup" — the scoped-resource
//! guard applies one level up, at the engine's load/save state; the stream
//! itself just implements `Drop` normally.

mod expanding;
mod memory;

#[cfg(feature = "std")]
mod file;

pub use expanding::ExpandingBufferStream;
pub use memory::{ReadWriteMemoryStream, ReadOnlyMemoryStream};

#[cfg(feature = "std")]
pub use file::FileStream;

use crate::error::CodecError;

bitflags::bitflags! {
    /// Stream capability bits. Today only `SEEKABLE` is defined.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct StreamFeatures: u32 {
        const SEEKABLE = 0b0000_0001;
    }
}

/// Seek origin, mirroring `std::io::SeekFrom` without requiring `std`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekFrom {
    Start(u64),
    Current(i64),
    End(i64),
}

/// A uniform read/write/seek/tell/eof/size stream.
///
/// `tolerant_read` and `strict_read` are distinct methods (not one method
/// with a flag) because their error semantics differ: tolerant short reads
/// are not an error at all, while a strict short read is always
/// `CodecError::UnexpectedEof`. Collapsing them into a boolean parameter
/// would make every call site guess which error variant applies.
pub trait Stream {
    /// Read up to `buf.len()` bytes. A short read (including zero bytes at
    /// EOF) is `Ok`; the actual count read is returned.
    fn tolerant_read(&mut self, buf: &mut [u8]) -> Result<usize, CodecError>;

    /// Read exactly `buf.len()` bytes or fail with `UnexpectedEof`.
    fn strict_read(&mut self, buf: &mut [u8]) -> Result<(), CodecError> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.tolerant_read(&mut buf[filled..])?;
            if n == 0 {
                return Err(CodecError::UnexpectedEof);
            }
            filled += n;
        }
        Ok(())
    }

    /// Write up to `buf.len()` bytes, returning the count actually written.
    fn tolerant_write(&mut self, buf: &[u8]) -> Result<usize, CodecError>;

    /// Write exactly `buf.len()` bytes or fail with `CodecError::Io`.
    fn strict_write(&mut self, buf: &[u8]) -> Result<(), CodecError> {
        let mut written = 0;
        while written < buf.len() {
            let n = self.tolerant_write(&buf[written..])?;
            if n == 0 {
                return Err(CodecError::Io(alloc::string::String::from(
                    "short write: stream refused to accept more bytes",
                )));
            }
            written += n;
        }
        Ok(())
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, CodecError>;

    fn tell(&mut self) -> Result<u64, CodecError> {
        self.seek(SeekFrom::Current(0))
    }

    /// No-op for read-only streams. Must be idempotent.
    fn flush(&mut self) -> Result<(), CodecError> {
        Ok(())
    }

    /// Must not consume bytes: implementations compare position to size,
    /// never read-ahead.
    fn eof(&mut self) -> Result<bool, CodecError> {
        let pos = self.tell()?;
        Ok(pos >= self.size()?)
    }

    /// Count of valid bytes. For an expanding write buffer this is the
    /// number of bytes written so far, not the backing capacity.
    fn size(&mut self) -> Result<u64, CodecError>;

    fn features(&self) -> StreamFeatures;
}

/// Forwarding impl so a borrowed `&mut dyn Stream` can be boxed as a
/// `Box<dyn Stream>` alongside owned streams (file/memory/expanding), the
/// same way the engine and façades store either. Lets
/// [`crate::engine::LoadSession`]/[`crate::engine::SaveSession`] hold one
/// `Box<dyn Stream + 's>` regardless of whether the caller handed over an
/// owned stream (Junior/Advanced façades opening a file) or a borrowed one
/// (Technical façade driving a caller-supplied stream).
impl<S: Stream + ?Sized> Stream for &mut S {
    fn tolerant_read(&mut self, buf: &mut [u8]) -> Result<usize, CodecError> {
        (**self).tolerant_read(buf)
    }

    fn strict_read(&mut self, buf: &mut [u8]) -> Result<(), CodecError> {
        (**self).strict_read(buf)
    }

    fn tolerant_write(&mut self, buf: &[u8]) -> Result<usize, CodecError> {
        (**self).tolerant_write(buf)
    }

    fn strict_write(&mut self, buf: &[u8]) -> Result<(), CodecError> {
        (**self).strict_write(buf)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, CodecError> {
        (**self).seek(pos)
    }

    fn tell(&mut self) -> Result<u64, CodecError> {
        (**self).tell()
    }

    fn flush(&mut self) -> Result<(), CodecError> {
        (**self).flush()
    }

    fn eof(&mut self) -> Result<bool, CodecError> {
        (**self).eof()
    }

    fn size(&mut self) -> Result<u64, CodecError> {
        (**self).size()
    }

    fn features(&self) -> StreamFeatures {
        (**self).features()
    }
}
