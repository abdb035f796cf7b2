//! A write buffer that grows instead of rejecting overflowing writes.

use alloc::vec::Vec;

use super::memory::resolve_seek;
use super::{SeekFrom, Stream, StreamFeatures};
use crate::error::CodecError;

const GROWTH_FACTOR: usize = 3; // multiply by 3, divide by 2 => x1.5

/// An in-memory stream whose backing buffer grows by a factor of 1.5
/// whenever a write would overflow it. `size()` reports the count of valid
/// bytes written so far, not the backing capacity — callers that want the
/// final bytes should use [`ExpandingBufferStream::into_inner`] rather than
/// reading capacity-sized slack off the end.
#[derive(Default)]
pub struct ExpandingBufferStream {
    data: Vec<u8>,
    len: usize,
    pos: usize,
}

impl ExpandingBufferStream {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            len: 0,
            pos: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            len: 0,
            pos: 0,
        }
    }

    /// The valid bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Consume the stream, returning only the valid bytes written.
    pub fn into_inner(mut self) -> Vec<u8> {
        self.data.truncate(self.len);
        self.data
    }

    fn ensure_capacity(&mut self, additional: usize) {
        let needed = self.pos + additional;
        if needed <= self.data.len() {
            return;
        }
        let mut new_cap = self.data.len().max(64);
        while new_cap < needed {
            new_cap = (new_cap * GROWTH_FACTOR) / 2 + 1;
        }
        self.data.resize(new_cap, 0);
    }
}

impl Stream for ExpandingBufferStream {
    fn tolerant_read(&mut self, buf: &mut [u8]) -> Result<usize, CodecError> {
        let available = self.len.saturating_sub(self.pos);
        let n = available.min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn tolerant_write(&mut self, buf: &[u8]) -> Result<usize, CodecError> {
        self.ensure_capacity(buf.len());
        self.data[self.pos..self.pos + buf.len()].copy_from_slice(buf);
        self.pos += buf.len();
        self.len = self.len.max(self.pos);
        Ok(buf.len())
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, CodecError> {
        let new_pos = resolve_seek(pos, self.pos as u64, self.len as u64)?;
        self.pos = new_pos as usize;
        Ok(new_pos)
    }

    fn size(&mut self) -> Result<u64, CodecError> {
        Ok(self.len as u64)
    }

    fn features(&self) -> StreamFeatures {
        StreamFeatures::SEEKABLE
    }
}
