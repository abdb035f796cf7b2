//! Pixel format conversion, rotation, scaling, and quantization.

use rastersail::{
    convert, quantize, rotate, scale, Angle, CodecError, IccProfile, Image, MetaDataKey, MetaDataNode, PixelFormat,
    Resolution, ResolutionUnit, ScaleAlgorithm, Variant,
};

/// An RGB checkerboard carrying every ancillary field `convert`/`rotate`/
/// `scale` must preserve, so a dropped field shows up as a failed
/// equality assertion rather than silently passing.
fn rgb_checkerboard_with_ancillary_fields(w: u32, h: u32) -> Image {
    let mut image = rgb_checkerboard(w, h);
    image.resolution = Some(Resolution { x: 72.0, y: 96.0, unit: ResolutionUnit::Inch });
    image.iccp = Some(IccProfile::new(vec![1, 2, 3, 4]));
    image.meta_data.push(MetaDataNode::new(MetaDataKey::Unknown("comment".into()), Variant::String("hi".into())));
    image.gamma = 2.2;
    image.delay = 40;
    image.interlaced = true;
    image.tuning.insert("quality".into(), Variant::Int(80));
    image
}

fn rgb_checkerboard(w: u32, h: u32) -> Image {
    let mut pixels = vec![0u8; (w * h * 3) as usize];
    for y in 0..h {
        for x in 0..w {
            let o = ((y * w + x) * 3) as usize;
            if (x + y) % 2 == 0 {
                pixels[o] = 255;
                pixels[o + 1] = 0;
                pixels[o + 2] = 0;
            } else {
                pixels[o] = 0;
                pixels[o + 1] = 255;
                pixels[o + 2] = 0;
            }
        }
    }
    Image::with_pixels(w, h, PixelFormat::Bpp24Rgb, pixels).unwrap()
}

#[test]
fn convert_identity_is_a_plain_clone() {
    let image = rgb_checkerboard(4, 3);
    let same = convert(&image, PixelFormat::Bpp24Rgb).unwrap();
    assert_eq!(same.pixels(), image.pixels());
}

#[test]
fn convert_rgb_to_grayscale_uses_rec601_luma() {
    let image = Image::with_pixels(1, 1, PixelFormat::Bpp24Rgb, vec![255, 0, 0]).unwrap();
    let gray = convert(&image, PixelFormat::Bpp8Grayscale).unwrap();
    // (255*299)/1000 = 76
    assert_eq!(gray.pixels().unwrap(), &[76]);
}

#[test]
fn convert_rgb_to_rgba_sets_full_alpha() {
    let image = rgb_checkerboard(2, 2);
    let rgba = convert(&image, PixelFormat::Bpp32Rgba).unwrap();
    assert_eq!(rgba.pixel_format, PixelFormat::Bpp32Rgba);
    for chunk in rgba.pixels().unwrap().chunks_exact(4) {
        assert_eq!(chunk[3], 255);
    }
}

#[test]
fn convert_rgb_bgr_swaps_channel_order() {
    let image = Image::with_pixels(1, 1, PixelFormat::Bpp24Rgb, vec![10, 20, 30]).unwrap();
    let bgr = convert(&image, PixelFormat::Bpp24Bgr).unwrap();
    assert_eq!(bgr.pixels().unwrap(), &[30, 20, 10]);
}

#[test]
fn convert_cmyk_roundtrip_is_lossy_but_close() {
    let image = Image::with_pixels(1, 1, PixelFormat::Bpp24Rgb, vec![200, 100, 50]).unwrap();
    let cmyk = convert(&image, PixelFormat::Bpp32Cmyk).unwrap();
    let back = convert(&cmyk, PixelFormat::Bpp24Rgb).unwrap();
    for (a, b) in image.pixels().unwrap().iter().zip(back.pixels().unwrap()) {
        assert!((*a as i32 - *b as i32).abs() <= 2, "CMYK roundtrip drifted too far: {a} vs {b}");
    }
}

#[test]
fn convert_to_indexed_format_is_rejected() {
    let image = rgb_checkerboard(2, 2);
    let err = convert(&image, PixelFormat::Bpp8Indexed).unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedConversion(_)));
}

#[test]
fn convert_rejects_skeleton_images() {
    let skeleton = Image::skeleton(2, 2, PixelFormat::Bpp24Rgb).unwrap();
    assert!(convert(&skeleton, PixelFormat::Bpp8Grayscale).is_err());
}

#[test]
fn convert_preserves_ancillary_fields() {
    let image = rgb_checkerboard_with_ancillary_fields(2, 2);
    let gray = convert(&image, PixelFormat::Bpp8Grayscale).unwrap();
    assert_eq!(gray.resolution, image.resolution);
    assert_eq!(gray.iccp.unwrap().data(), image.iccp.unwrap().data());
    assert_eq!(gray.meta_data.len(), 1);
    assert_eq!(gray.gamma, image.gamma);
    assert_eq!(gray.delay, image.delay);
    assert_eq!(gray.interlaced, image.interlaced);
    assert_eq!(gray.tuning.get("quality").and_then(Variant::as_i64), Some(80));
}

#[test]
fn rotate_90_swaps_dimensions() {
    let image = rgb_checkerboard(4, 2);
    let rotated = rotate(&image, Angle::Rotate90).unwrap();
    assert_eq!((rotated.width, rotated.height), (2, 4));
}

#[test]
fn rotate_180_twice_is_identity() {
    let image = rgb_checkerboard(3, 5);
    let once = rotate(&image, Angle::Rotate180).unwrap();
    let twice = rotate(&once, Angle::Rotate180).unwrap();
    assert_eq!(twice.pixels(), image.pixels());
    assert_eq!((twice.width, twice.height), (image.width, image.height));
}

#[test]
fn rotate_90_then_270_is_identity() {
    let image = rgb_checkerboard(3, 5);
    let rotated = rotate(&image, Angle::Rotate90).unwrap();
    let back = rotate(&rotated, Angle::Rotate270).unwrap();
    assert_eq!((back.width, back.height), (image.width, image.height));
    assert_eq!(back.pixels(), image.pixels());
}

#[test]
fn rotate_moves_the_top_left_pixel_to_the_top_right_on_a_90_turn() {
    // A 2x1 image: left pixel red, right pixel green.
    let image = Image::with_pixels(2, 1, PixelFormat::Bpp24Rgb, vec![255, 0, 0, 0, 255, 0]).unwrap();
    let rotated = rotate(&image, Angle::Rotate90).unwrap();
    assert_eq!((rotated.width, rotated.height), (1, 2));
    // Rotate90: (dx, dy) = (height - 1 - y, x); for the single source row
    // y=0, the left source pixel (x=0) lands at dy=0, the right one (x=1)
    // lands at dy=1.
    let pixels = rotated.pixels().unwrap();
    assert_eq!(&pixels[0..3], &[255, 0, 0]);
    assert_eq!(&pixels[3..6], &[0, 255, 0]);
}

#[test]
fn rotate_rejects_sub_byte_pixel_formats() {
    let mut image = Image::skeleton(8, 1, PixelFormat::Bpp1Indexed).unwrap();
    image.set_pixels(vec![0u8]).unwrap();
    assert!(rotate(&image, Angle::Rotate90).is_err());
}

#[test]
fn rotate_preserves_ancillary_fields() {
    let image = rgb_checkerboard_with_ancillary_fields(4, 2);
    let rotated = rotate(&image, Angle::Rotate90).unwrap();
    assert_eq!(rotated.resolution, image.resolution);
    assert_eq!(rotated.iccp.unwrap().data(), image.iccp.unwrap().data());
    assert_eq!(rotated.meta_data.len(), 1);
    assert_eq!(rotated.gamma, image.gamma);
    assert_eq!(rotated.delay, image.delay);
    assert_eq!(rotated.interlaced, image.interlaced);
    assert_eq!(rotated.tuning.get("quality").and_then(Variant::as_i64), Some(80));
}

#[test]
fn rotate_preserves_the_palette_on_indexed_images() {
    let mut image = Image::skeleton(2, 1, PixelFormat::Bpp8Indexed).unwrap();
    image.set_pixels(vec![0u8, 1u8]).unwrap();
    image.palette = Some(rastersail::Palette::from_bytes(PixelFormat::Bpp24Rgb, 2, vec![255, 0, 0, 0, 255, 0]).unwrap());

    let rotated = rotate(&image, Angle::Rotate90).unwrap();
    rotated.check_valid().expect("rotate must keep the palette an indexed result needs");
    assert_eq!(rotated.palette.unwrap().data(), image.palette.unwrap().data());
}

#[test]
fn scale_nearest_neighbor_upscale_preserves_dimensions_requested() {
    let image = rgb_checkerboard(2, 2);
    let scaled = scale(&image, 6, 4, ScaleAlgorithm::NearestNeighbor).unwrap();
    assert_eq!((scaled.width, scaled.height), (6, 4));
    assert_eq!(scaled.pixels().unwrap().len(), (6 * 4 * 3) as usize);
}

#[test]
fn scale_to_same_size_is_effectively_identity_under_nearest_neighbor() {
    let image = rgb_checkerboard(4, 4);
    let scaled = scale(&image, 4, 4, ScaleAlgorithm::NearestNeighbor).unwrap();
    assert_eq!(scaled.pixels(), image.pixels());
}

#[test]
fn scale_rejects_zero_dimensions() {
    let image = rgb_checkerboard(2, 2);
    assert!(scale(&image, 0, 4, ScaleAlgorithm::Bilinear).is_err());
}

#[test]
fn scale_preserves_ancillary_fields() {
    let image = rgb_checkerboard_with_ancillary_fields(4, 4);
    let scaled = scale(&image, 6, 4, ScaleAlgorithm::NearestNeighbor).unwrap();
    assert_eq!(scaled.resolution, image.resolution);
    assert_eq!(scaled.iccp.unwrap().data(), image.iccp.unwrap().data());
    assert_eq!(scaled.meta_data.len(), 1);
    assert_eq!(scaled.gamma, image.gamma);
    assert_eq!(scaled.delay, image.delay);
    assert_eq!(scaled.interlaced, image.interlaced);
    assert_eq!(scaled.tuning.get("quality").and_then(Variant::as_i64), Some(80));
}

#[test]
fn scale_bilinear_average_of_uniform_image_is_unchanged() {
    // A flat-color image scaled with bilinear interpolation should come
    // back exactly the same color everywhere, regardless of target size.
    let pixels = vec![128u8; (4 * 4 * 3) as usize];
    let image = Image::with_pixels(4, 4, PixelFormat::Bpp24Rgb, pixels).unwrap();
    let scaled = scale(&image, 3, 5, ScaleAlgorithm::Bilinear).unwrap();
    assert!(scaled.pixels().unwrap().iter().all(|&b| b == 128));
}

#[test]
fn quantize_reduces_a_two_color_image_to_two_palette_entries() {
    let image = rgb_checkerboard(8, 8);
    let indexed = quantize(&image, 4, false).unwrap();
    assert!(indexed.pixel_format.is_indexed());
    let palette = indexed.palette.as_ref().expect("quantize always attaches a palette");
    assert!(palette.color_count() <= 4);
    assert!(palette.color_count() >= 2);
}

#[test]
fn quantize_clamps_color_count_to_the_valid_range() {
    let image = rgb_checkerboard(4, 4);
    let indexed = quantize(&image, 1, false).unwrap();
    assert!(indexed.palette.as_ref().unwrap().color_count() >= 2);

    let too_many = quantize(&image, 10_000, false).unwrap();
    assert!(too_many.palette.as_ref().unwrap().color_count() <= 256);
}

#[test]
fn quantize_without_dither_is_deterministic() {
    let image = rgb_checkerboard(6, 6);
    let a = quantize(&image, 8, false).unwrap();
    let b = quantize(&image, 8, false).unwrap();
    assert_eq!(a.pixels(), b.pixels());
    assert_eq!(a.palette.unwrap().data(), b.palette.unwrap().data());
}

#[test]
fn quantize_with_dithering_is_also_deterministic() {
    // Floyd-Steinberg here has no randomness, so repeated runs over the
    // same input must produce byte-identical output.
    let image = rgb_checkerboard(10, 10);
    let a = quantize(&image, 4, true).unwrap();
    let b = quantize(&image, 4, true).unwrap();
    assert_eq!(a.pixels(), b.pixels());
}

#[test]
fn quantize_rejects_a_skeleton_image_instead_of_panicking() {
    // A skeleton already at the Bpp32Rgba pivot format used to skip the
    // convert() call entirely and panic on its unpopulated pixel buffer.
    let skeleton = Image::skeleton(2, 2, PixelFormat::Bpp32Rgba).unwrap();
    assert!(matches!(quantize(&skeleton, 4, false), Err(CodecError::InvalidData(_))));
}

#[test]
fn quantize_preserves_ancillary_fields() {
    let image = rgb_checkerboard_with_ancillary_fields(6, 6);
    let indexed = quantize(&image, 4, false).unwrap();
    assert_eq!(indexed.resolution, image.resolution);
    assert_eq!(indexed.iccp.unwrap().data(), image.iccp.unwrap().data());
    assert_eq!(indexed.meta_data.len(), 1);
    assert_eq!(indexed.gamma, image.gamma);
    assert_eq!(indexed.delay, image.delay);
    assert_eq!(indexed.interlaced, image.interlaced);
    assert_eq!(indexed.tuning.get("quality").and_then(Variant::as_i64), Some(80));
}

#[test]
fn quantize_of_a_single_color_image_collapses_to_one_effective_color() {
    let pixels = vec![42u8; (4 * 4 * 3) as usize];
    let image = Image::with_pixels(4, 4, PixelFormat::Bpp24Rgb, pixels).unwrap();
    let indexed = quantize(&image, 16, false).unwrap();
    let palette = indexed.palette.unwrap();
    // Every sample is identical, so median-cut never finds a channel with
    // nonzero range to split on and collapses to a single box.
    assert_eq!(palette.color_count(), 2, "quantize clamps even a single-color image to at least 2 entries");
    let entry0 = palette.entry_clamped(0);
    assert_eq!(entry0, [42, 42, 42]);
}
