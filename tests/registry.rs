//! Codec registry: discovery, lookup, and probing.

use rastersail::*;

#[test]
fn codec_list_is_stable_across_calls() {
    let first: Vec<&str> = codecs().iter().map(|c| c.name).collect();
    let second: Vec<&str> = codecs().iter().map(|c| c.name).collect();
    assert_eq!(first, second);
    assert!(first.contains(&"PNM"));
    assert!(first.contains(&"FARBFELD"));
    assert!(first.contains(&"BMP"));
    assert!(first.contains(&"TGA"));
    assert!(first.contains(&"WAL"));
    assert!(first.contains(&"XBM"));
    assert!(first.contains(&"QOI"));
}

#[test]
fn every_codec_declares_at_least_one_pixel_format() {
    for codec in codecs() {
        assert!(!codec.pixel_formats.is_empty(), "{} declares no pixel formats", codec.name);
    }
}

#[test]
fn from_name_is_case_insensitive() {
    let lower = codec::registry::from_name("bmp").expect("bmp registered");
    let upper = codec::registry::from_name("BMP").expect("BMP registered");
    assert_eq!(lower.name, upper.name);
}

#[test]
fn from_name_rejects_unknown_codec() {
    assert!(codec::registry::from_name("not-a-real-codec").is_none());
}

#[test]
fn from_extension_finds_every_built_in_format() {
    for (ext, name) in [
        ("ppm", "PNM"),
        ("pgm", "PNM"),
        ("pam", "PNM"),
        ("pfm", "PNM"),
        ("ff", "FARBFELD"),
        ("bmp", "BMP"),
        ("tga", "TGA"),
        ("wal", "WAL"),
        ("xbm", "XBM"),
        ("qoi", "QOI"),
    ] {
        let found = codec::registry::from_extension(ext).unwrap_or_else(|| panic!("no codec for extension {ext:?}"));
        assert_eq!(found.name, name);
    }
}

#[test]
fn from_path_strips_directories_and_uses_final_extension() {
    let codec = codec::registry::from_path("/tmp/some.dir/photo.bmp").expect("bmp by path");
    assert_eq!(codec.name, "BMP");
}

#[test]
fn from_mime_type_matches_registered_entries() {
    let codec = codec::registry::from_mime_type("image/x-tga").expect("tga by mime type");
    assert_eq!(codec.name, "TGA");
}

#[test]
fn probe_recognizes_farbfeld_magic() {
    let mut data = b"farbfeld".to_vec();
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(&[0u8; 8]);
    let mut stream = ReadOnlyMemoryStream::new(&data);
    let codec = probe(&mut stream).expect("farbfeld magic recognized");
    assert_eq!(codec.name, "FARBFELD");
}

#[test]
fn probe_rewinds_the_stream_after_sniffing() {
    let mut data = b"farbfeld".to_vec();
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(&[0u8; 8]);
    let mut stream = ReadOnlyMemoryStream::new(&data);
    probe(&mut stream).expect("farbfeld magic recognized");
    assert_eq!(stream.tell().unwrap(), 0, "probing must not consume bytes");
}

#[test]
fn probe_fails_on_unrecognized_bytes() {
    let data = [0u8; 32];
    let mut stream = ReadOnlyMemoryStream::new(&data);
    assert!(matches!(probe(&mut stream), Err(CodecError::UnrecognizedFormat)));
}

#[test]
fn best_acceptable_format_prefers_exact_match() {
    let bmp = codec::registry::from_name("BMP").unwrap();
    let got = best_acceptable_format(bmp, PixelFormat::Bpp24Rgb).unwrap();
    assert_eq!(got, PixelFormat::Bpp24Rgb);
}

#[test]
fn best_acceptable_format_widens_within_family() {
    // farbfeld only declares Bpp64Rgba; asking for Bpp32Rgba (same Rgba
    // family, fewer bits) should widen up to the codec's one format.
    let ff = codec::registry::from_name("FARBFELD").unwrap();
    let got = best_acceptable_format(ff, PixelFormat::Bpp32Rgba).unwrap();
    assert_eq!(got, PixelFormat::Bpp64Rgba);
}

#[test]
fn best_acceptable_format_errors_for_codec_with_no_formats() {
    let empty = CodecInfo {
        name: "EMPTY",
        version: "1.0.0",
        description: "test fixture with no supported formats",
        magic_numbers: Vec::new(),
        extensions: Vec::new(),
        mime_types: Vec::new(),
        load_features: CodecFeatures::empty(),
        save_features: CodecFeatures::empty(),
        pixel_formats: Vec::new(),
        compressions: Vec::new(),
        default_compression: Compression::None,
        compression_level: None,
        new_loader: None,
        new_saver: None,
    };
    assert!(best_acceptable_format(&empty, PixelFormat::Bpp24Rgb).is_err());
}
