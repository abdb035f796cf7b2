//! A filesystem-backed stream. Only compiled with the `std` feature.

use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use super::{SeekFrom as StreamSeekFrom, Stream, StreamFeatures};
use crate::error::CodecError;

/// Wraps a `std::fs::File` opened for the access pattern the caller asked
/// for (read for loading, write-truncate-create for saving).
pub struct FileStream {
    file: File,
}

impl FileStream {
    pub fn open_for_read(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let file = File::open(path).map_err(|e| CodecError::Io(e.to_string()))?;
        Ok(Self { file })
    }

    pub fn create_for_write(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let file = File::create(path).map_err(|e| CodecError::Io(e.to_string()))?;
        Ok(Self { file })
    }
}

impl Stream for FileStream {
    fn tolerant_read(&mut self, buf: &mut [u8]) -> Result<usize, CodecError> {
        self.file.read(buf).map_err(|e| CodecError::Io(e.to_string()))
    }

    fn tolerant_write(&mut self, buf: &[u8]) -> Result<usize, CodecError> {
        self.file.write(buf).map_err(|e| CodecError::Io(e.to_string()))
    }

    fn seek(&mut self, pos: StreamSeekFrom) -> Result<u64, CodecError> {
        let std_pos = match pos {
            StreamSeekFrom::Start(n) => std::io::SeekFrom::Start(n),
            StreamSeekFrom::Current(n) => std::io::SeekFrom::Current(n),
            StreamSeekFrom::End(n) => std::io::SeekFrom::End(n),
        };
        self.file.seek(std_pos).map_err(|e| CodecError::Io(e.to_string()))
    }

    fn flush(&mut self) -> Result<(), CodecError> {
        self.file.flush().map_err(|e| CodecError::Io(e.to_string()))
    }

    fn size(&mut self) -> Result<u64, CodecError> {
        self.file
            .metadata()
            .map(|m| m.len())
            .map_err(|e| CodecError::Io(e.to_string()))
    }

    fn features(&self) -> StreamFeatures {
        StreamFeatures::SEEKABLE
    }
}
