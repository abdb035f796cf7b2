//! The process-wide codec registry.
//!
//! Built once, lazily, on first use: an immutable structure initialized
//! exactly once, not a mutable singleton guarded by a separate init call.
//! Lookup failure returns `None`/an empty list rather than an error — only
//! the engine turns "no codec found" into `CodecError::UnrecognizedFormat`.

use alloc::vec::Vec;

use super::CodecInfo;

struct Registry {
    codecs: Vec<CodecInfo>,
}

#[cfg(feature = "std")]
static REGISTRY: std::sync::OnceLock<Registry> = std::sync::OnceLock::new();

#[cfg(not(feature = "std"))]
static REGISTRY: spin_once::OnceCellSync<Registry> = spin_once::OnceCellSync::new();

#[cfg(not(feature = "std"))]
mod spin_once {
    //! Minimal `no_std` substitute for `std::sync::OnceLock`, used only when
    //! the `std` feature is disabled. Single-initialization is guaranteed by
    //! a compare-and-swap spin loop; readers after the first successful
    //! write only ever observe a fully initialized value.
    use core::cell::UnsafeCell;
    use core::sync::atomic::{AtomicU8, Ordering};

    const EMPTY: u8 = 0;
    const WRITING: u8 = 1;
    const READY: u8 = 2;

    pub struct OnceCellSync<T> {
        state: AtomicU8,
        value: UnsafeCell<Option<T>>,
    }

    unsafe impl<T: Sync> Sync for OnceCellSync<T> {}

    impl<T> OnceCellSync<T> {
        pub const fn new() -> Self {
            Self {
                state: AtomicU8::new(EMPTY),
                value: UnsafeCell::new(None),
            }
        }

        pub fn get_or_init(&self, f: impl FnOnce() -> T) -> &T {
            loop {
                match self
                    .state
                    .compare_exchange(EMPTY, WRITING, Ordering::AcqRel, Ordering::Acquire)
                {
                    Ok(_) => {
                        unsafe { *self.value.get() = Some(f()) };
                        self.state.store(READY, Ordering::Release);
                        break;
                    }
                    Err(READY) => break,
                    Err(_) => core::hint::spin_loop(),
                }
            }
            unsafe { (*self.value.get()).as_ref().unwrap() }
        }
    }
}

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| Registry {
        codecs: crate::formats::all_codecs(),
    })
}

/// All registered codecs, in registration order.
pub fn list() -> &'static [CodecInfo] {
    &registry().codecs
}

pub fn from_name(name: &str) -> Option<&'static CodecInfo> {
    registry().codecs.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Look up by filename extension, taken from whatever follows the final
/// `.` in `path` (case-insensitive, no leading dot).
pub fn from_path(path: &str) -> Option<&'static CodecInfo> {
    let extension = path.rsplit('.').next()?;
    from_extension(extension)
}

pub fn from_extension(extension: &str) -> Option<&'static CodecInfo> {
    registry().codecs.iter().find(|c| c.has_extension(extension))
}

pub fn from_mime_type(mime_type: &str) -> Option<&'static CodecInfo> {
    registry().codecs.iter().find(|c| c.has_mime_type(mime_type))
}

/// Probe a byte buffer's magic numbers. Used by `from_magic_number_from_io`
/// and `from_magic_number_from_path` after reading a small header.
pub fn from_magic_number_from_memory(data: &[u8]) -> Option<&'static CodecInfo> {
    registry().codecs.iter().find(|c| c.matches_magic(data))
}

pub fn from_magic_number_from_io(stream: &mut dyn crate::io::Stream) -> Result<Option<&'static CodecInfo>, crate::error::CodecError> {
    use crate::io::SeekFrom;

    let start = stream.tell()?;
    let mut header = alloc::vec![0u8; 32];
    let read = stream.tolerant_read(&mut header)?;
    header.truncate(read);
    stream.seek(SeekFrom::Start(start))?;
    Ok(from_magic_number_from_memory(&header))
}

#[cfg(feature = "std")]
pub fn from_magic_number_from_path(path: impl AsRef<std::path::Path>) -> Result<Option<&'static CodecInfo>, crate::error::CodecError> {
    use std::io::Read;

    let mut file = std::fs::File::open(path).map_err(|e| crate::error::CodecError::Io(e.to_string()))?;
    let mut header = [0u8; 32];
    let read = file.read(&mut header).map_err(|e| crate::error::CodecError::Io(e.to_string()))?;
    Ok(from_magic_number_from_memory(&header[..read]))
}
