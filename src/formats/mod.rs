//! Built-in codecs and the registration table consumed by
//! [`crate::codec::registry`].

pub mod farbfeld;
pub mod pnm;

#[cfg(feature = "bmp")]
pub mod bmp;

#[cfg(feature = "qoi")]
pub mod qoi;

#[cfg(feature = "tga")]
pub mod tga;

#[cfg(feature = "wal")]
pub mod wal;

#[cfg(feature = "xbm")]
pub mod xbm;

mod stubs;

use alloc::vec::Vec;

use crate::codec::CodecInfo;

/// Every codec this build knows about, in registration order. Third-party
/// formats (JPEG, PNG, TIFF, ...) are adapter-only stubs: registered so
/// probing/extension lookup works, but their `Load`/`Save` impls return
/// `CodecError::NotImplemented` since wrapping the actual third-party
/// decoders is out of scope here.
pub fn all_codecs() -> Vec<CodecInfo> {
    let mut codecs = Vec::new();
    codecs.push(pnm::codec_info());
    codecs.push(farbfeld::codec_info());

    #[cfg(feature = "bmp")]
    codecs.push(bmp::codec_info());

    #[cfg(feature = "qoi")]
    codecs.push(qoi::codec_info());

    #[cfg(feature = "tga")]
    codecs.push(tga::codec_info());

    #[cfg(feature = "wal")]
    codecs.push(wal::codec_info());

    #[cfg(feature = "xbm")]
    codecs.push(xbm::codec_info());

    codecs.extend(stubs::codec_infos());
    codecs
}
