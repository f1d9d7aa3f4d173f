//! Tile a watermark across a base image and flatten the result.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Limits, RgbImage, RgbaImage};
use tracing::debug;

use crate::blending;
use crate::error::{Error, Result};
use crate::params::WatermarkParams;
use crate::tiling;

/// Size of the watermark tile for a base of `base_width` pixels.
///
/// Width is `floor(base_width * scale_ratio)`; height follows the original
/// watermark's aspect ratio, also truncated.
///
/// # Errors
///
/// Returns [`Error::Geometry`] when the watermark is empty, either tile
/// dimension comes out as zero or larger than `u32::MAX`, or resizing to the
/// tile would allocate more than the `image` crate's default `max_alloc`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn scaled_watermark_size(
    base_width: u32,
    wm_width: u32,
    wm_height: u32,
    scale_ratio: f64,
) -> Result<(u32, u32)> {
    let new_width = (f64::from(base_width) * scale_ratio).floor();
    let (tile_width, tile_height) = if wm_width == 0 || !new_width.is_finite() {
        (0, 0)
    } else {
        let aspect_ratio = f64::from(wm_height) / f64::from(wm_width);
        let new_width = new_width as u64;
        let new_height = (new_width as f64 * aspect_ratio).floor() as u64;
        (new_width, new_height)
    };

    match (u32::try_from(tile_width), u32::try_from(tile_height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 && resize_fits_alloc_limit(w, h, wm_height) => {
            Ok((w, h))
        }
        _ => Err(Error::Geometry {
            base_width,
            wm_width,
            wm_height,
            tile_width,
            tile_height,
        }),
    }
}

/// Whether a Lanczos resize to `width` x `height` stays under the default
/// allocation cap. Counts the RGBA8 output and the RGBA f32 buffer holding
/// the horizontal pass, which is `width` x `src_height`.
fn resize_fits_alloc_limit(width: u32, height: u32, src_height: u32) -> bool {
    let Some(max_alloc) = Limits::default().max_alloc else {
        return true;
    };
    let output = u64::from(width)
        .saturating_mul(u64::from(height))
        .saturating_mul(4);
    let intermediate = u64::from(width)
        .saturating_mul(u64::from(src_height))
        .saturating_mul(16);
    output <= max_alloc && intermediate <= max_alloc
}

/// Convert the watermark to RGBA and resize it for a base of `base_width`
/// pixels with a Lanczos3 filter.
///
/// # Errors
///
/// See [`scaled_watermark_size`].
pub fn scale_watermark(
    watermark: &DynamicImage,
    base_width: u32,
    scale_ratio: f64,
) -> Result<RgbaImage> {
    let (width, height) =
        scaled_watermark_size(base_width, watermark.width(), watermark.height(), scale_ratio)?;
    let rgba = watermark.to_rgba8();
    Ok(imageops::resize(&rgba, width, height, FilterType::Lanczos3))
}

/// Build a transparent `width` x `height` canvas carrying `tile` in the
/// staggered brick layout.
#[must_use]
pub fn build_overlay(width: u32, height: u32, tile: &RgbaImage, spacing: u32) -> RgbaImage {
    let mut overlay = RgbaImage::new(width, height);
    for placement in tiling::tile_positions(width, height, tile.width(), tile.height(), spacing) {
        blending::paste_masked(&mut overlay, tile, placement.x, placement.y);
    }
    overlay
}

/// Stamp a tiled, semi-transparent `watermark` over `base`.
///
/// Neither input is modified. The output has exactly the base's dimensions
/// and no alpha channel, and is fully determined by the inputs.
///
/// # Errors
///
/// - [`Error::InvalidParameter`] if a ratio is non-finite or not positive.
/// - [`Error::Geometry`] if the scaled watermark would be empty.
pub fn composite(
    base: &DynamicImage,
    watermark: &DynamicImage,
    params: &WatermarkParams,
) -> Result<RgbImage> {
    params.validate()?;

    let (base_width, base_height) = (base.width(), base.height());
    let mut tile = scale_watermark(watermark, base_width, params.scale_ratio)?;
    blending::apply_opacity(&mut tile, params.opacity);

    let spacing = tiling::spacing_for(base_width, params.spacing_ratio);
    debug!(
        base_width,
        base_height,
        tile_width = tile.width(),
        tile_height = tile.height(),
        spacing,
        opacity = params.opacity,
        "compositing tiled watermark"
    );

    let overlay = build_overlay(base_width, base_height, &tile, spacing);

    let mut canvas = base.to_rgba8();
    blending::alpha_composite(&mut canvas, &overlay);
    Ok(DynamicImage::ImageRgba8(canvas).to_rgb8())
}
