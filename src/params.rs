//! Watermark tunables.

use crate::error::{Error, Result};

/// Default alpha multiplier applied to the watermark.
pub const DEFAULT_OPACITY: u8 = 128;
/// Default gap between tiles, as a fraction of the base width.
pub const DEFAULT_SPACING_RATIO: f64 = 0.05;
/// Default tile width, as a fraction of the base width.
pub const DEFAULT_SCALE_RATIO: f64 = 0.1;

/// The three knobs that shape a tiled watermark.
///
/// Built fresh for every request. The compositor checks the ratios itself via
/// [`WatermarkParams::validate`], so callers may pass raw user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatermarkParams {
    /// Multiplier for the watermark's own alpha (`0` hides it, `255` keeps it).
    pub opacity: u8,
    /// Gap between neighbouring tiles, as a fraction of the base width.
    pub spacing_ratio: f64,
    /// Tile width, as a fraction of the base width.
    pub scale_ratio: f64,
}

impl Default for WatermarkParams {
    fn default() -> Self {
        Self {
            opacity: DEFAULT_OPACITY,
            spacing_ratio: DEFAULT_SPACING_RATIO,
            scale_ratio: DEFAULT_SCALE_RATIO,
        }
    }
}

impl WatermarkParams {
    /// Create a parameter set.
    #[must_use]
    pub fn new(opacity: u8, spacing_ratio: f64, scale_ratio: f64) -> Self {
        Self {
            opacity,
            spacing_ratio,
            scale_ratio,
        }
    }

    /// Check that both ratios are finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] naming the first bad ratio.
    pub fn validate(&self) -> Result<()> {
        check_ratio("spacing ratio", self.spacing_ratio)?;
        check_ratio("scale ratio", self.scale_ratio)
    }
}

fn check_ratio(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}
