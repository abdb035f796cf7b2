//! Pixel manipulation: format conversion, rotation, scaling,
//! and color quantization.
//!
//! The rotation and channel/color-space conversion arithmetic here follows
//! the straightforward per-pixel approach common to small image-manipulation
//! libraries; dithering follows the classic Floyd–Steinberg coefficients
//! rather than any one format's bespoke disperser.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::CodecError;
use crate::image::{Image, Palette};
use crate::pixel_format::{self, PixelFormat};

/// Copy every field `with_pixels` doesn't know about (it only ever builds a
/// bare skeleton plus a buffer) from `src` onto `dst`. Every conversion
/// function in this module must preserve resolution/ICC/metadata/gamma/
/// delay/interlaced/tuning per spec.md P6 and §4.7.2/§4.7.3 — the pixel
/// buffer is the only thing that's actually supposed to change shape.
fn copy_ancillary(src: &Image, dst: &mut Image) {
    dst.resolution = src.resolution;
    dst.iccp = src.iccp.clone();
    dst.meta_data = src.meta_data.clone();
    dst.gamma = src.gamma;
    dst.delay = src.delay;
    dst.interlaced = src.interlaced;
    dst.tuning = src.tuning.clone();
}

/// Scaling algorithm for [`scale`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleAlgorithm {
    NearestNeighbor,
    Bilinear,
    Bicubic,
    Lanczos,
}

/// Rotation angle for [`rotate`]. Every angle is a multiple of 90 degrees;
/// arbitrary angles would require resampling and are out of scope for a
/// byte-aligned pixel shuffle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Angle {
    Rotate90,
    Rotate180,
    Rotate270,
}

/// A pixel expressed as straight 8-bit-per-channel RGBA, the pivot format
/// every conversion in this module routes through. Using one pivot instead
/// of a pairwise matrix keeps the conversion surface O(n) in the number of
/// supported formats instead of O(n^2).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Rgba8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

fn read_pixel(image: &Image, row: &[u8], x: usize) -> Result<Rgba8, CodecError> {
    use PixelFormat::*;
    let bpp = image.pixel_format.bits_per_pixel() as usize;
    match image.pixel_format {
        Bpp8Grayscale => {
            let v = row[x];
            Ok(Rgba8 { r: v, g: v, b: v, a: 255 })
        }
        Bpp8GrayscaleAlpha => {
            let o = x * 2;
            Ok(Rgba8 { r: row[o], g: row[o], b: row[o], a: row[o + 1] })
        }
        Bpp24Rgb => {
            let o = x * 3;
            Ok(Rgba8 { r: row[o], g: row[o + 1], b: row[o + 2], a: 255 })
        }
        Bpp24Bgr => {
            let o = x * 3;
            Ok(Rgba8 { r: row[o + 2], g: row[o + 1], b: row[o], a: 255 })
        }
        Bpp32Rgba => {
            let o = x * 4;
            Ok(Rgba8 { r: row[o], g: row[o + 1], b: row[o + 2], a: row[o + 3] })
        }
        Bpp32Bgra => {
            let o = x * 4;
            Ok(Rgba8 { r: row[o + 2], g: row[o + 1], b: row[o], a: row[o + 3] })
        }
        Bpp32Rgbx => {
            let o = x * 4;
            Ok(Rgba8 { r: row[o], g: row[o + 1], b: row[o + 2], a: 255 })
        }
        Bpp32Bgrx => {
            let o = x * 4;
            Ok(Rgba8 { r: row[o + 2], g: row[o + 1], b: row[o], a: 255 })
        }
        Bpp8Indexed => Err(CodecError::UnsupportedConversion(alloc::string::String::from(
            "indexed pixels require read_pixel_indexed",
        ))),
        Bpp32Cmyk => {
            let o = x * 4;
            let (c, m, y, k) = (row[o], row[o + 1], row[o + 2], row[o + 3]);
            Ok(cmyk_to_rgba8(c, m, y, k))
        }
        Bpp24Ycbcr => {
            let o = x * 3;
            Ok(ycbcr_to_rgba8(row[o], row[o + 1], row[o + 2]))
        }
        other => Err(CodecError::UnsupportedConversion(alloc::format!(
            "no RGBA8 pivot reader for {other:?} ({bpp} bpp)"
        ))),
    }
}

fn read_pixel_indexed(row: &[u8], x: usize, bpp: u32, palette: &Palette) -> Rgba8 {
    let index = match bpp {
        8 => row[x] as usize,
        4 => {
            let byte = row[x / 2];
            (if x % 2 == 0 { byte >> 4 } else { byte & 0x0F }) as usize
        }
        2 => {
            let byte = row[x / 4];
            let shift = 6 - 2 * (x % 4);
            ((byte >> shift) & 0x03) as usize
        }
        1 => {
            let byte = row[x / 8];
            let shift = 7 - (x % 8);
            ((byte >> shift) & 0x01) as usize
        }
        _ => row[x] as usize,
    };
    let entry = palette.entry_clamped(index);
    match palette.pixel_format() {
        PixelFormat::Bpp24Rgb => Rgba8 { r: entry[0], g: entry[1], b: entry[2], a: 255 },
        PixelFormat::Bpp24Bgr => Rgba8 { r: entry[2], g: entry[1], b: entry[0], a: 255 },
        PixelFormat::Bpp32Rgba => Rgba8 { r: entry[0], g: entry[1], b: entry[2], a: entry[3] },
        PixelFormat::Bpp32Bgra => Rgba8 { r: entry[2], g: entry[1], b: entry[0], a: entry[3] },
        _ => Rgba8 { r: entry[0], g: entry.get(1).copied().unwrap_or(entry[0]), b: entry.get(2).copied().unwrap_or(entry[0]), a: 255 },
    }
}

fn write_pixel(pf: PixelFormat, row: &mut [u8], x: usize, px: Rgba8) -> Result<(), CodecError> {
    use PixelFormat::*;
    match pf {
        Bpp8Grayscale => {
            row[x] = luma(px);
            Ok(())
        }
        Bpp8GrayscaleAlpha => {
            let o = x * 2;
            row[o] = luma(px);
            row[o + 1] = px.a;
            Ok(())
        }
        Bpp24Rgb => {
            let o = x * 3;
            row[o] = px.r;
            row[o + 1] = px.g;
            row[o + 2] = px.b;
            Ok(())
        }
        Bpp24Bgr => {
            let o = x * 3;
            row[o] = px.b;
            row[o + 1] = px.g;
            row[o + 2] = px.r;
            Ok(())
        }
        Bpp32Rgba => {
            let o = x * 4;
            row[o] = px.r;
            row[o + 1] = px.g;
            row[o + 2] = px.b;
            row[o + 3] = px.a;
            Ok(())
        }
        Bpp32Bgra => {
            let o = x * 4;
            row[o] = px.b;
            row[o + 1] = px.g;
            row[o + 2] = px.r;
            row[o + 3] = px.a;
            Ok(())
        }
        Bpp32Rgbx => {
            let o = x * 4;
            row[o] = px.r;
            row[o + 1] = px.g;
            row[o + 2] = px.b;
            row[o + 3] = 0;
            Ok(())
        }
        Bpp32Bgrx => {
            let o = x * 4;
            row[o] = px.b;
            row[o + 1] = px.g;
            row[o + 2] = px.r;
            row[o + 3] = 0;
            Ok(())
        }
        Bpp32Cmyk => {
            let o = x * 4;
            let (c, m, y, k) = rgba8_to_cmyk(px);
            row[o] = c;
            row[o + 1] = m;
            row[o + 2] = y;
            row[o + 3] = k;
            Ok(())
        }
        Bpp24Ycbcr => {
            let o = x * 3;
            let (y, cb, cr) = rgba8_to_ycbcr(px);
            row[o] = y;
            row[o + 1] = cb;
            row[o + 2] = cr;
            Ok(())
        }
        other => Err(CodecError::UnsupportedConversion(alloc::format!(
            "no RGBA8 pivot writer for {other:?}"
        ))),
    }
}

fn luma(px: Rgba8) -> u8 {
    // Rec. 601 luma.
    ((u32::from(px.r) * 299 + u32::from(px.g) * 587 + u32::from(px.b) * 114) / 1000) as u8
}

fn cmyk_to_rgba8(c: u8, m: u8, y: u8, k: u8) -> Rgba8 {
    let scale = |channel: u8| -> u8 {
        let channel = channel as u32;
        let k = k as u32;
        (255 - channel.min(255)) * (255 - k.min(255)) / 255
    };
    Rgba8 { r: scale(c), g: scale(m), b: scale(y), a: 255 }
}

fn rgba8_to_cmyk(px: Rgba8) -> (u8, u8, u8, u8) {
    let (r, g, b) = (px.r as u32, px.g as u32, px.b as u32);
    let k = 255 - r.max(g).max(b);
    if k == 255 {
        return (0, 0, 0, 255);
    }
    let denom = 255 - k;
    let c = ((255 - r - k) * 255) / denom;
    let m = ((255 - g - k) * 255) / denom;
    let y = ((255 - b - k) * 255) / denom;
    (c as u8, m as u8, y as u8, k as u8)
}

fn ycbcr_to_rgba8(y: u8, cb: u8, cr: u8) -> Rgba8 {
    let y = y as f32;
    let cb = cb as f32 - 128.0;
    let cr = cr as f32 - 128.0;
    let r = y + 1.402 * cr;
    let g = y - 0.344136 * cb - 0.714136 * cr;
    let b = y + 1.772 * cb;
    Rgba8 {
        r: r.round().clamp(0.0, 255.0) as u8,
        g: g.round().clamp(0.0, 255.0) as u8,
        b: b.round().clamp(0.0, 255.0) as u8,
        a: 255,
    }
}

fn rgba8_to_ycbcr(px: Rgba8) -> (u8, u8, u8) {
    let (r, g, b) = (px.r as f32, px.g as f32, px.b as f32);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = 128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b;
    let cr = 128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b;
    (
        y.round().clamp(0.0, 255.0) as u8,
        cb.round().clamp(0.0, 255.0) as u8,
        cr.round().clamp(0.0, 255.0) as u8,
    )
}

/// Convert `image` to `target`, preserving width/height. Indexed sources
/// read through their palette; indexed targets require [`quantize`] instead
/// (a plain `convert` to an indexed format is rejected as unsupported —
/// palette selection is the quantizer's job, not the conversion matrix's).
pub fn convert(image: &Image, target: PixelFormat) -> Result<Image, CodecError> {
    if image.pixel_format == target {
        return Ok(image.clone());
    }
    if target.is_indexed() {
        return Err(CodecError::UnsupportedConversion(alloc::string::String::from(
            "convert to an indexed format requires quantize, not convert",
        )));
    }
    let width = image.width as usize;
    let height = image.height as usize;
    let src_bpl = image.bytes_per_line as usize;
    let dst_bpl = pixel_format::bytes_per_line(image.width, target)? as usize;
    let src_pixels = image
        .pixels()
        .ok_or_else(|| CodecError::InvalidData(alloc::string::String::from("convert requires pixel data, got a skeleton")))?;
    let mut dst_pixels = vec![0u8; dst_bpl * height];

    let src_indexed_bpp = if image.pixel_format.is_indexed() {
        Some(image.pixel_format.bits_per_pixel())
    } else {
        None
    };
    let palette = image.palette.as_ref();

    for y in 0..height {
        let src_row = &src_pixels[y * src_bpl..y * src_bpl + src_bpl];
        let dst_row = &mut dst_pixels[y * dst_bpl..y * dst_bpl + dst_bpl];
        for x in 0..width {
            let px = match src_indexed_bpp {
                Some(bpp) => {
                    let palette = palette.ok_or_else(|| {
                        CodecError::InvalidData(alloc::string::String::from("indexed image missing its palette"))
                    })?;
                    read_pixel_indexed(src_row, x, bpp, palette)
                }
                None => read_pixel(image, src_row, x)?,
            };
            write_pixel(target, dst_row, x, px)?;
        }
    }

    let mut out = Image::with_pixels(image.width, image.height, target, dst_pixels)?;
    copy_ancillary(image, &mut out);
    out.check_valid()?;
    Ok(out)
}

/// Rotate `image` by a multiple of 90 degrees. Only byte-aligned formats
/// (bits-per-pixel divisible by 8) are supported, since sub-byte-packed
/// pixels cannot be permuted without first unpacking them — callers should
/// `convert` first if they need to rotate a 1/2/4-bit format.
pub fn rotate(image: &Image, angle: Angle) -> Result<Image, CodecError> {
    let bpp = image.pixel_format.bits_per_pixel();
    if bpp % 8 != 0 {
        return Err(CodecError::UnsupportedConversion(alloc::format!(
            "rotate requires a byte-aligned pixel format, got {:?} ({bpp} bpp)",
            image.pixel_format
        )));
    }
    let bypp = (bpp / 8) as usize;
    let width = image.width as usize;
    let height = image.height as usize;
    let src_bpl = image.bytes_per_line as usize;
    let src = image
        .pixels()
        .ok_or_else(|| CodecError::InvalidData(alloc::string::String::from("rotate requires pixel data, got a skeleton")))?;

    let (new_width, new_height) = match angle {
        Angle::Rotate180 => (image.width, image.height),
        Angle::Rotate90 | Angle::Rotate270 => (image.height, image.width),
    };
    let dst_bpl = pixel_format::bytes_per_line(new_width, image.pixel_format)? as usize;
    let mut dst = vec![0u8; dst_bpl * new_height as usize];

    for y in 0..height {
        for x in 0..width {
            let src_off = y * src_bpl + x * bypp;
            let (dx, dy) = match angle {
                Angle::Rotate90 => (height - 1 - y, x),
                Angle::Rotate180 => (width - 1 - x, height - 1 - y),
                Angle::Rotate270 => (y, width - 1 - x),
            };
            let dst_off = dy * dst_bpl + dx * bypp;
            dst[dst_off..dst_off + bypp].copy_from_slice(&src[src_off..src_off + bypp]);
        }
    }

    let mut out = Image::with_pixels(new_width, new_height, image.pixel_format, dst)?;
    copy_ancillary(image, &mut out);
    if image.pixel_format.is_indexed() {
        out.palette = image.palette.clone();
    }
    out.check_valid()?;
    Ok(out)
}

/// Resize `image` to `(width, height)` using `algorithm`. Indexed sources
/// are materialized to RGBA8, resampled, then re-quantized back to a
/// palette the same size as the source's.
pub fn scale(image: &Image, width: u32, height: u32, algorithm: ScaleAlgorithm) -> Result<Image, CodecError> {
    if width == 0 || height == 0 {
        return Err(CodecError::DimensionsTooLarge { width, height });
    }
    if image.pixel_format.is_indexed() {
        let color_count = image.palette.as_ref().map(|p| p.color_count()).unwrap_or(256);
        let rgba = convert(image, PixelFormat::Bpp32Rgba)?;
        let scaled = scale(&rgba, width, height, algorithm)?;
        return quantize(&scaled, color_count, true);
    }

    let bpp = image.pixel_format.bits_per_pixel();
    if bpp % 8 != 0 {
        return Err(CodecError::UnsupportedConversion(alloc::format!(
            "scale requires a byte-aligned pixel format, got {:?}",
            image.pixel_format
        )));
    }
    let bypp = (bpp / 8) as usize;
    let src_bpl = image.bytes_per_line as usize;
    let src = image
        .pixels()
        .ok_or_else(|| CodecError::InvalidData(alloc::string::String::from("scale requires pixel data, got a skeleton")))?;
    let dst_bpl = pixel_format::bytes_per_line(width, image.pixel_format)? as usize;
    let mut dst = vec![0u8; dst_bpl * height as usize];

    let x_ratio = image.width as f32 / width as f32;
    let y_ratio = image.height as f32 / height as f32;

    for dy in 0..height as usize {
        for dx in 0..width as usize {
            let dst_off = dy * dst_bpl + dx * bypp;
            match algorithm {
                ScaleAlgorithm::NearestNeighbor => {
                    let sx = ((dx as f32 + 0.5) * x_ratio) as usize;
                    let sy = ((dy as f32 + 0.5) * y_ratio) as usize;
                    let sx = sx.min(image.width as usize - 1);
                    let sy = sy.min(image.height as usize - 1);
                    let src_off = sy * src_bpl + sx * bypp;
                    dst[dst_off..dst_off + bypp].copy_from_slice(&src[src_off..src_off + bypp]);
                }
                ScaleAlgorithm::Bilinear | ScaleAlgorithm::Bicubic | ScaleAlgorithm::Lanczos => {
                    let fx = (dx as f32 + 0.5) * x_ratio - 0.5;
                    let fy = (dy as f32 + 0.5) * y_ratio - 0.5;
                    let x0 = fx.floor().max(0.0) as usize;
                    let y0 = fy.floor().max(0.0) as usize;
                    let x1 = (x0 + 1).min(image.width as usize - 1);
                    let y1 = (y0 + 1).min(image.height as usize - 1);
                    let tx = fx - x0 as f32;
                    let ty = fy - y0 as f32;
                    for c in 0..bypp {
                        let p00 = src[y0 * src_bpl + x0 * bypp + c] as f32;
                        let p10 = src[y0 * src_bpl + x1 * bypp + c] as f32;
                        let p01 = src[y1 * src_bpl + x0 * bypp + c] as f32;
                        let p11 = src[y1 * src_bpl + x1 * bypp + c] as f32;
                        let top = p00 + (p10 - p00) * tx;
                        let bottom = p01 + (p11 - p01) * tx;
                        let value = top + (bottom - top) * ty;
                        dst[dst_off + c] = value.round().clamp(0.0, 255.0) as u8;
                    }
                }
            }
        }
    }

    let mut out = Image::with_pixels(width, height, image.pixel_format, dst)?;
    copy_ancillary(image, &mut out);
    out.check_valid()?;
    Ok(out)
}

/// Reduce `image` to at most `max_colors` palette entries via a median-cut
/// color quantizer, optionally applying Floyd–Steinberg error diffusion
/// (coefficients 7/16 right, 3/16 below-left, 5/16 below, 1/16 below-right).
pub fn quantize(image: &Image, max_colors: u32, dither: bool) -> Result<Image, CodecError> {
    let max_colors = max_colors.clamp(2, 256);
    if image.is_skeleton() {
        return Err(CodecError::InvalidData(alloc::string::String::from(
            "quantize requires pixel data, got a skeleton",
        )));
    }
    let rgba = if image.pixel_format == PixelFormat::Bpp32Rgba {
        image.clone()
    } else {
        convert(image, PixelFormat::Bpp32Rgba)?
    };
    let width = rgba.width as usize;
    let height = rgba.height as usize;
    let bpl = rgba.bytes_per_line as usize;
    let src = rgba
        .pixels()
        .ok_or_else(|| CodecError::InvalidData(alloc::string::String::from("quantize requires pixel data, got a skeleton")))?;

    let mut samples = Vec::with_capacity(width * height);
    for y in 0..height {
        let row = &src[y * bpl..y * bpl + bpl];
        for x in 0..width {
            let o = x * 4;
            samples.push([row[o], row[o + 1], row[o + 2]]);
        }
    }
    let palette_colors = median_cut(&samples, max_colors as usize);

    let mut palette_data = Vec::with_capacity(palette_colors.len() * 3);
    for c in &palette_colors {
        palette_data.extend_from_slice(c);
    }
    let palette = Palette::from_bytes(PixelFormat::Bpp24Rgb, palette_colors.len() as u32, palette_data)?;

    let target_pf = indexed_format_for(palette_colors.len());
    let dst_bpl = pixel_format::bytes_per_line(rgba.width, target_pf)? as usize;
    let mut dst = vec![0u8; dst_bpl * height];

    let mut error = vec![[0f32; 3]; width * height];
    for y in 0..height {
        for x in 0..width {
            let [mut r, mut g, mut b] = samples[y * width + x].map(f32::from);
            if dither {
                let e = error[y * width + x];
                r = (r + e[0]).clamp(0.0, 255.0);
                g = (g + e[1]).clamp(0.0, 255.0);
                b = (b + e[2]).clamp(0.0, 255.0);
            }
            let index = nearest_color_index(&palette_colors, [r, g, b]);
            write_indexed_pixel(&mut dst[y * dst_bpl..y * dst_bpl + dst_bpl], x, target_pf.bits_per_pixel(), index);

            if dither {
                let chosen = palette_colors[index].map(f32::from);
                let err = [r - chosen[0], g - chosen[1], b - chosen[2]];
                diffuse_error(&mut error, width, height, x, y, err);
            }
        }
    }

    let mut out = Image::with_pixels(rgba.width, rgba.height, target_pf, dst)?;
    copy_ancillary(&rgba, &mut out);
    out.palette = Some(palette);
    out.check_valid()?;
    Ok(out)
}

fn indexed_format_for(color_count: usize) -> PixelFormat {
    match color_count {
        0..=2 => PixelFormat::Bpp1Indexed,
        3..=4 => PixelFormat::Bpp2Indexed,
        5..=16 => PixelFormat::Bpp4Indexed,
        _ => PixelFormat::Bpp8Indexed,
    }
}

fn write_indexed_pixel(row: &mut [u8], x: usize, bpp: u32, index: usize) {
    match bpp {
        8 => row[x] = index as u8,
        4 => {
            let byte = &mut row[x / 2];
            if x % 2 == 0 {
                *byte = (*byte & 0x0F) | ((index as u8) << 4);
            } else {
                *byte = (*byte & 0xF0) | (index as u8 & 0x0F);
            }
        }
        2 => {
            let byte = &mut row[x / 4];
            let shift = 6 - 2 * (x % 4);
            *byte = (*byte & !(0x03 << shift)) | (((index as u8) & 0x03) << shift);
        }
        1 => {
            let byte = &mut row[x / 8];
            let shift = 7 - (x % 8);
            *byte = (*byte & !(1 << shift)) | (((index as u8) & 0x01) << shift);
        }
        _ => row[x] = index as u8,
    }
}

fn diffuse_error(error: &mut [[f32; 3]], width: usize, height: usize, x: usize, y: usize, err: [f32; 3]) {
    let mut add = |dx: isize, dy: isize, weight: f32| {
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        if nx < 0 || ny < 0 || nx as usize >= width || ny as usize >= height {
            return;
        }
        let slot = &mut error[ny as usize * width + nx as usize];
        slot[0] += err[0] * weight;
        slot[1] += err[1] * weight;
        slot[2] += err[2] * weight;
    };
    add(1, 0, 7.0 / 16.0);
    add(-1, 1, 3.0 / 16.0);
    add(0, 1, 5.0 / 16.0);
    add(1, 1, 1.0 / 16.0);
}

fn nearest_color_index(palette: &[[u8; 3]], sample: [f32; 3]) -> usize {
    palette
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            let da = color_distance_sq(a, sample);
            let db = color_distance_sq(b, sample);
            da.partial_cmp(&db).unwrap_or(core::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn color_distance_sq(a: &[u8; 3], b: [f32; 3]) -> f32 {
    let dr = a[0] as f32 - b[0];
    let dg = a[1] as f32 - b[1];
    let db = a[2] as f32 - b[2];
    dr * dr + dg * dg + db * db
}

/// Median-cut color quantizer: recursively bisect the sample set along its
/// widest channel until `max_colors` boxes exist, then average each box.
fn median_cut(samples: &[[u8; 3]], max_colors: usize) -> Vec<[u8; 3]> {
    if samples.is_empty() {
        return vec![[0, 0, 0]];
    }
    let mut boxes: Vec<Vec<[u8; 3]>> = vec![samples.to_vec()];
    while boxes.len() < max_colors {
        let widest = boxes
            .iter()
            .enumerate()
            .max_by_key(|(_, b)| box_range(b))
            .map(|(i, _)| i);
        let Some(widest) = widest else { break };
        if boxes[widest].len() < 2 {
            break;
        }
        let channel = widest_channel(&boxes[widest]);
        let mut bucket = core::mem::take(&mut boxes[widest]);
        bucket.sort_by_key(|p| p[channel]);
        let mid = bucket.len() / 2;
        let upper = bucket.split_off(mid);
        boxes[widest] = bucket;
        boxes.push(upper);
    }
    boxes
        .iter()
        .filter(|b| !b.is_empty())
        .map(|b| average_color(b))
        .collect()
}

fn box_range(samples: &[[u8; 3]]) -> u32 {
    (0..3)
        .map(|c| {
            let min = samples.iter().map(|p| p[c]).min().unwrap_or(0);
            let max = samples.iter().map(|p| p[c]).max().unwrap_or(0);
            (max - min) as u32
        })
        .max()
        .unwrap_or(0)
}

fn widest_channel(samples: &[[u8; 3]]) -> usize {
    (0..3)
        .max_by_key(|&c| {
            let min = samples.iter().map(|p| p[c]).min().unwrap_or(0);
            let max = samples.iter().map(|p| p[c]).max().unwrap_or(0);
            max - min
        })
        .unwrap_or(0)
}

fn average_color(samples: &[[u8; 3]]) -> [u8; 3] {
    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for p in samples {
        r += p[0] as u64;
        g += p[1] as u64;
        b += p[2] as u64;
    }
    let n = samples.len() as u64;
    [(r / n) as u8, (g / n) as u8, (b / n) as u8]
}
