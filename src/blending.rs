//! 8-bit alpha blending primitives used to assemble the watermark overlay.
//!
//! All arithmetic is integer fixed-point so results are reproducible to the
//! bit across platforms:
//!
//! - [`apply_opacity`] scales an alpha channel: `a' = a * opacity / 255`, truncating.
//! - [`paste_masked`] stamps a tile through its own alpha:
//!   `dst = (src * m + dst * (255 - m)) / 255`, rounded, on all four channels.
//! - [`alpha_composite`] is the Porter-Duff "over" operator.

use image::{Rgba, RgbaImage};

/// Fractional bits carried by the "over" blend coefficients.
const PRECISION_BITS: u32 = 7;

/// Rounded division by 255 for values up to `255 * 255 + 128`.
#[inline]
fn div255(value: u32) -> u32 {
    let tmp = value + 0x80;
    ((tmp >> 8) + tmp) >> 8
}

/// Approximate `value / 255` by shifting, for fixed-point intermediates.
#[inline]
fn shift_div255(value: u32) -> u32 {
    ((value >> 8) + value) >> 8
}

/// Scale every pixel's alpha by `opacity / 255`, leaving color untouched.
///
/// Alpha can only go down: `opacity = 255` is the identity and `opacity = 0`
/// makes the whole image transparent.
pub fn apply_opacity(image: &mut RgbaImage, opacity: u8) {
    let opacity = u16::from(opacity);
    for px in image.pixels_mut() {
        #[allow(clippy::cast_possible_truncation)]
        {
            px[3] = (u16::from(px[3]) * opacity / 255) as u8;
        }
    }
}

/// Paste `tile` onto `canvas` with its top-left corner at `(x, y)`, using the
/// tile's alpha channel as the mask.
///
/// Coordinates may be negative or run past the canvas; the tile is clipped.
/// Where the mask is 0 the canvas is left as is, where it is 255 the tile
/// pixel replaces the canvas pixel, and in between every channel, alpha
/// included, is linearly blended.
pub fn paste_masked(canvas: &mut RgbaImage, tile: &RgbaImage, x: i64, y: i64) {
    let canvas_w = i64::from(canvas.width());
    let canvas_h = i64::from(canvas.height());
    let tile_w = i64::from(tile.width());
    let tile_h = i64::from(tile.height());

    // Clip to canvas bounds, in tile coordinates
    let tx0 = (-x).max(0);
    let ty0 = (-y).max(0);
    let tx1 = tile_w.min(canvas_w - x);
    let ty1 = tile_h.min(canvas_h - y);

    if tx0 >= tx1 || ty0 >= ty1 {
        return;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    for ty in ty0..ty1 {
        for tx in tx0..tx1 {
            let src = tile.get_pixel(tx as u32, ty as u32);
            let mask = u32::from(src[3]);
            if mask == 0 {
                continue;
            }
            let dst = canvas.get_pixel_mut((x + tx) as u32, (y + ty) as u32);
            for ch in 0..4 {
                let blended = u32::from(dst[ch]) * (255 - mask) + u32::from(src[ch]) * mask;
                dst[ch] = div255(blended) as u8;
            }
        }
    }
}

/// Blend a single `src` pixel over `dst`.
#[must_use]
pub fn over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let src_a = u32::from(src[3]);
    if src_a == 0 {
        return dst;
    }

    let blend = u32::from(dst[3]) * (255 - src_a);
    let out_a255 = src_a * 255 + blend;
    let coef1 = src_a * 255 * 255 * (1 << PRECISION_BITS) / out_a255;
    let coef2 = 255 * (1 << PRECISION_BITS) - coef1;

    let mut out = [0u8; 4];
    #[allow(clippy::cast_possible_truncation)]
    {
        for ch in 0..3 {
            let tmp = u32::from(src[ch]) * coef1 + u32::from(dst[ch]) * coef2;
            out[ch] = (shift_div255(tmp + (0x80 << PRECISION_BITS)) >> PRECISION_BITS) as u8;
        }
        out[3] = shift_div255(out_a255 + 0x80) as u8;
    }
    Rgba(out)
}

/// Composite `overlay` over `base` in place ("over" operator).
///
/// Both images must have the same dimensions; pixels outside the overlap are
/// ignored. A fully transparent overlay pixel leaves the base pixel bit-exact.
pub fn alpha_composite(base: &mut RgbaImage, overlay: &RgbaImage) {
    debug_assert_eq!(base.dimensions(), overlay.dimensions());
    for (dst, src) in base.pixels_mut().zip(overlay.pixels()) {
        *dst = over(*src, *dst);
    }
}
