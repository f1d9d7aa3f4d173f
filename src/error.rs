//! Error types for the tiled-watermark crate.

/// Errors that can occur while compositing or writing watermarked images.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An input or watermark byte stream is not a decodable image.
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),

    /// The scaled watermark tile would have no area.
    #[error(
        "watermark tile would be {tile_width}x{tile_height} on a {base_width}px wide base \
         (watermark {wm_width}x{wm_height})"
    )]
    Geometry {
        /// Width of the base image in pixels.
        base_width: u32,
        /// Original watermark width in pixels.
        wm_width: u32,
        /// Original watermark height in pixels.
        wm_height: u32,
        /// Computed tile width.
        tile_width: u64,
        /// Computed tile height.
        tile_height: u64,
    },

    /// A tunable is outside the range the compositor can work with.
    #[error("invalid {name}: {value}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// An I/O error occurred while reading a source or writing an output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The composited image could not be encoded as JPEG.
    #[error("failed to encode JPEG: {0}")]
    Encode(image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
