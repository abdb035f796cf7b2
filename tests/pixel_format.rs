//! Pixel format properties: canonical stride, comparator totality, and
//! frozen bits-per-pixel values.

use rastersail::{bytes_per_line, CodecError, PixelFormat};

#[test]
fn bytes_per_line_is_canonical_for_representative_widths_and_formats() {
    // P3: bytes_per_line(w, pf) == ceil(w * bits_per_pixel(pf) / 8)
    let widths = [1u32, 7, 8, 9, 11, 12, 13, 100];
    let formats = [
        PixelFormat::Bpp1Indexed,
        PixelFormat::Bpp4Indexed,
        PixelFormat::Bpp8Indexed,
        PixelFormat::Bpp8Grayscale,
        PixelFormat::Bpp24Rgb,
        PixelFormat::Bpp32Rgba,
        PixelFormat::Bpp48Rgb,
        PixelFormat::Bpp64Rgba,
    ];
    for &pf in &formats {
        for &w in &widths {
            let bpp = pf.bits_per_pixel() as u64;
            let expected = (w as u64 * bpp).div_ceil(8) as u32;
            assert_eq!(bytes_per_line(w, pf).unwrap(), expected, "pf={pf:?} w={w}");
        }
    }
}

#[test]
fn bytes_per_line_rejects_unknown_format() {
    assert!(bytes_per_line(10, PixelFormat::Unknown).is_err());
}

#[test]
fn comparators_agree_with_integer_bits_per_pixel_comparison() {
    // P4: for any pair of known formats, the five comparators agree with
    // comparing their bits_per_pixel() integers directly.
    let formats = [
        PixelFormat::Bpp1Indexed,
        PixelFormat::Bpp8Grayscale,
        PixelFormat::Bpp16Grayscale,
        PixelFormat::Bpp24Rgb,
        PixelFormat::Bpp32Rgba,
        PixelFormat::Bpp48Rgb,
        PixelFormat::Bpp64Rgba,
        PixelFormat::Bpp96RgbFloat,
    ];
    for &a in &formats {
        for &b in &formats {
            let (abpp, bbpp) = (a.bits_per_pixel(), b.bits_per_pixel());
            assert_eq!(a.less(b).unwrap(), abpp < bbpp, "{a:?} < {b:?}");
            assert_eq!(a.less_equal(b).unwrap(), abpp <= bbpp, "{a:?} <= {b:?}");
            assert_eq!(a.equal(b).unwrap(), abpp == bbpp, "{a:?} == {b:?}");
            assert_eq!(a.greater_equal(b).unwrap(), abpp >= bbpp, "{a:?} >= {b:?}");
            assert_eq!(a.greater(b).unwrap(), abpp > bbpp, "{a:?} > {b:?}");
        }
    }
}

#[test]
fn comparators_reject_unknown_as_either_operand() {
    assert!(matches!(
        PixelFormat::Unknown.less(PixelFormat::Bpp24Rgb),
        Err(CodecError::UnsupportedVariant(_))
    ));
    assert!(matches!(
        PixelFormat::Bpp24Rgb.equal(PixelFormat::Unknown),
        Err(CodecError::UnsupportedVariant(_))
    ));
}

#[test]
fn frozen_bits_per_pixel_values_never_change() {
    // P10 / INV-5: these wire values are part of the crate's binary-
    // compatibility contract and must never be renumbered.
    assert_eq!(PixelFormat::Unknown.bits_per_pixel(), 0);
    assert_eq!(PixelFormat::Bpp1Indexed.bits_per_pixel(), 1);
    assert_eq!(PixelFormat::Bpp4Indexed.bits_per_pixel(), 4);
    assert_eq!(PixelFormat::Bpp8Indexed.bits_per_pixel(), 8);
    assert_eq!(PixelFormat::Bpp8Grayscale.bits_per_pixel(), 8);
    assert_eq!(PixelFormat::Bpp16Grayscale.bits_per_pixel(), 16);
    assert_eq!(PixelFormat::Bpp16Rgb555.bits_per_pixel(), 16);
    assert_eq!(PixelFormat::Bpp24Rgb.bits_per_pixel(), 24);
    assert_eq!(PixelFormat::Bpp24Bgr.bits_per_pixel(), 24);
    assert_eq!(PixelFormat::Bpp32Rgba.bits_per_pixel(), 32);
    assert_eq!(PixelFormat::Bpp32Cmyk.bits_per_pixel(), 32);
    assert_eq!(PixelFormat::Bpp48Rgb.bits_per_pixel(), 48);
    assert_eq!(PixelFormat::Bpp64Rgba.bits_per_pixel(), 64);
    assert_eq!(PixelFormat::Bpp96RgbFloat.bits_per_pixel(), 96);
    assert_eq!(PixelFormat::Bpp128RgbaFloat.bits_per_pixel(), 128);
}

#[test]
fn indexed_and_storage_format_classification() {
    assert!(PixelFormat::Bpp8Indexed.is_indexed());
    assert!(!PixelFormat::Bpp24Rgb.is_indexed());
    assert!(PixelFormat::Bpp24Rgb.is_storage_format());
    assert!(PixelFormat::Bpp32Rgba.is_storage_format());
    assert!(!PixelFormat::Bpp8Indexed.is_storage_format());
    assert!(!PixelFormat::Bpp32Cmyk.is_storage_format());
}
