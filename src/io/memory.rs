//! Fixed-memory streams: read-only and read-write over a bounded buffer.

use alloc::string::String;

use super::{SeekFrom, Stream, StreamFeatures};
use crate::error::CodecError;

/// A read-only view over a borrowed byte slice. Writes are always rejected.
pub struct ReadOnlyMemoryStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ReadOnlyMemoryStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl Stream for ReadOnlyMemoryStream<'_> {
    fn tolerant_read(&mut self, buf: &mut [u8]) -> Result<usize, CodecError> {
        let available = self.data.len().saturating_sub(self.pos);
        let n = available.min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn tolerant_write(&mut self, _buf: &[u8]) -> Result<usize, CodecError> {
        Err(CodecError::Io(String::from(
            "write attempted on a read-only memory stream",
        )))
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, CodecError> {
        let new_pos = resolve_seek(pos, self.pos as u64, self.data.len() as u64)?;
        self.pos = new_pos as usize;
        Ok(new_pos)
    }

    fn size(&mut self) -> Result<u64, CodecError> {
        Ok(self.data.len() as u64)
    }

    fn features(&self) -> StreamFeatures {
        StreamFeatures::SEEKABLE
    }
}

/// A bounded buffer open for both reading and writing. Writes past the end
/// of the buffer return a `WRITE_IO`-equivalent error (`CodecError::Io`) —
/// unlike [`super::ExpandingBufferStream`], this stream never grows.
pub struct ReadWriteMemoryStream<'a> {
    data: &'a mut [u8],
    pos: usize,
}

impl<'a> ReadWriteMemoryStream<'a> {
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl Stream for ReadWriteMemoryStream<'_> {
    fn tolerant_read(&mut self, buf: &mut [u8]) -> Result<usize, CodecError> {
        let available = self.data.len().saturating_sub(self.pos);
        let n = available.min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn tolerant_write(&mut self, buf: &[u8]) -> Result<usize, CodecError> {
        if self.pos >= self.data.len() {
            return Err(CodecError::Io(String::from(
                "write past the end of a fixed-size memory stream",
            )));
        }
        let available = self.data.len() - self.pos;
        let n = available.min(buf.len());
        self.data[self.pos..self.pos + n].copy_from_slice(&buf[..n]);
        self.pos += n;
        Ok(n)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, CodecError> {
        let new_pos = resolve_seek(pos, self.pos as u64, self.data.len() as u64)?;
        self.pos = new_pos as usize;
        Ok(new_pos)
    }

    fn size(&mut self) -> Result<u64, CodecError> {
        Ok(self.data.len() as u64)
    }

    fn features(&self) -> StreamFeatures {
        StreamFeatures::SEEKABLE
    }
}

pub(crate) fn resolve_seek(pos: SeekFrom, current: u64, len: u64) -> Result<u64, CodecError> {
    let target = match pos {
        SeekFrom::Start(n) => n as i64,
        SeekFrom::Current(n) => current as i64 + n,
        SeekFrom::End(n) => len as i64 + n,
    };
    if target < 0 {
        return Err(CodecError::Io(alloc::format!(
            "seek to negative offset {target}"
        )));
    }
    Ok(target as u64)
}
