//! The virtual I/O stream implementations: memory, expanding-buffer, and
//! (under `std`) file streams.

use rastersail::{ExpandingBufferStream, FileStream, ReadOnlyMemoryStream, ReadWriteMemoryStream, SeekFrom, Stream};

#[test]
fn read_only_memory_stream_tolerant_read_short_reads_at_eof() {
    let data = [1u8, 2, 3];
    let mut stream = ReadOnlyMemoryStream::new(&data);
    let mut buf = [0u8; 5];
    let n = stream.tolerant_read(&mut buf).unwrap();
    assert_eq!(n, 3);
    assert_eq!(&buf[..3], &data);
    // A second read at EOF is Ok(0), not an error.
    let n2 = stream.tolerant_read(&mut buf).unwrap();
    assert_eq!(n2, 0);
}

#[test]
fn read_only_memory_stream_strict_read_errors_past_eof() {
    let data = [1u8, 2];
    let mut stream = ReadOnlyMemoryStream::new(&data);
    let mut buf = [0u8; 3];
    assert!(stream.strict_read(&mut buf).is_err());
}

#[test]
fn read_only_memory_stream_rejects_writes() {
    let data = [0u8; 4];
    let mut stream = ReadOnlyMemoryStream::new(&data);
    assert!(stream.tolerant_write(&[1, 2]).is_err());
}

#[test]
fn memory_stream_seek_from_end_and_current() {
    let data = [10u8, 20, 30, 40];
    let mut stream = ReadOnlyMemoryStream::new(&data);
    let pos = stream.seek(SeekFrom::End(-1)).unwrap();
    assert_eq!(pos, 3);
    let mut one = [0u8; 1];
    stream.tolerant_read(&mut one).unwrap();
    assert_eq!(one[0], 40);

    stream.seek(SeekFrom::Start(1)).unwrap();
    let pos = stream.seek(SeekFrom::Current(1)).unwrap();
    assert_eq!(pos, 2);
}

#[test]
fn memory_stream_seek_to_negative_offset_errors() {
    let data = [0u8; 4];
    let mut stream = ReadOnlyMemoryStream::new(&data);
    assert!(stream.seek(SeekFrom::Start(0)).is_ok());
    assert!(stream.seek(SeekFrom::Current(-1)).is_err());
}

#[test]
fn read_write_memory_stream_roundtrips_in_place() {
    let mut backing = [0u8; 8];
    {
        let mut stream = ReadWriteMemoryStream::new(&mut backing);
        stream.tolerant_write(&[1, 2, 3, 4]).unwrap();
        stream.seek(SeekFrom::Start(0)).unwrap();
        let mut buf = [0u8; 4];
        stream.tolerant_read(&mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3, 4]);
    }
}

#[test]
fn read_write_memory_stream_rejects_writes_past_its_fixed_end() {
    let mut backing = [0u8; 2];
    let mut stream = ReadWriteMemoryStream::new(&mut backing);
    stream.tolerant_write(&[1, 2]).unwrap();
    assert!(stream.tolerant_write(&[3]).is_err());
}

#[test]
fn expanding_buffer_grows_past_initial_capacity() {
    let mut stream = ExpandingBufferStream::new();
    let chunk = [7u8; 200];
    stream.tolerant_write(&chunk).unwrap();
    stream.tolerant_write(&chunk).unwrap();
    assert_eq!(stream.size().unwrap(), 400);
    assert_eq!(stream.as_slice().len(), 400);
    assert!(stream.as_slice().iter().all(|&b| b == 7));
}

#[test]
fn expanding_buffer_size_reports_valid_bytes_not_capacity() {
    let mut stream = ExpandingBufferStream::with_capacity(1024);
    stream.tolerant_write(&[1, 2, 3]).unwrap();
    assert_eq!(stream.size().unwrap(), 3);
    let out = stream.into_inner();
    assert_eq!(out, vec![1, 2, 3]);
}

#[test]
fn expanding_buffer_overwrite_after_seek_does_not_grow_len() {
    let mut stream = ExpandingBufferStream::new();
    stream.tolerant_write(&[1, 2, 3, 4]).unwrap();
    stream.seek(SeekFrom::Start(1)).unwrap();
    stream.tolerant_write(&[9]).unwrap();
    assert_eq!(stream.size().unwrap(), 4);
    assert_eq!(stream.into_inner(), vec![1, 9, 3, 4]);
}

#[test]
fn file_stream_write_then_read_roundtrip() {
    let dir = std::env::temp_dir();
    let path = dir.join(format!("rastersail-test-{}.bin", std::process::id()));

    {
        let mut stream = FileStream::create_for_write(&path).unwrap();
        stream.tolerant_write(b"hello stream").unwrap();
        stream.flush().unwrap();
    }
    {
        let mut stream = FileStream::open_for_read(&path).unwrap();
        assert_eq!(stream.size().unwrap(), 12);
        let mut buf = [0u8; 12];
        stream.strict_read(&mut buf).unwrap();
        assert_eq!(&buf, b"hello stream");
        assert!(stream.eof().unwrap());
    }

    std::fs::remove_file(&path).ok();
}

#[test]
fn file_stream_open_for_read_missing_file_errors() {
    let path = std::env::temp_dir().join("rastersail-test-does-not-exist.bin");
    assert!(FileStream::open_for_read(&path).is_err());
}
