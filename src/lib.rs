//! Stamp a staggered, semi-transparent watermark pattern across images.
//!
//! The watermark is scaled relative to each base image's width, faded by an
//! opacity factor, and repeated in a brick layout where every odd row is
//! shifted by half a tile. The result is flattened to RGB and, in batch mode,
//! written out as `watermarked_{i}.jpg`.
//!
//! # Quick Start
//!
//! ```no_run
//! use tiled_watermark::{composite, WatermarkParams};
//!
//! let base = image::open("photo.jpg").unwrap();
//! let logo = image::open("logo.png").unwrap();
//! let out = composite(&base, &logo, &WatermarkParams::default()).unwrap();
//! out.save("stamped.jpg").unwrap();
//! ```
//!
//! # Batches
//!
//! ```no_run
//! use std::path::Path;
//! use tiled_watermark::{process_batch, BatchOptions, ImageSource, WatermarkParams};
//!
//! let images = ["a.jpg", "b.png"].map(|p| ImageSource::from(Path::new(p)));
//! let paths = process_batch(
//!     &images,
//!     &ImageSource::from(Path::new("logo.png")),
//!     WatermarkParams::default(),
//!     BatchOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(paths.len(), 2);
//! ```

#![deny(missing_docs)]

mod batch;
pub mod blending;
mod compositor;
pub mod error;
mod params;
pub mod tiling;

pub use batch::{
    encode_jpeg, output_file_name, process_batch, BatchOptions, BatchProcessor, ImageSource,
    DEFAULT_JPEG_QUALITY,
};
pub use compositor::{build_overlay, composite, scale_watermark, scaled_watermark_size};
pub use error::{Error, Result};
pub use params::{
    WatermarkParams, DEFAULT_OPACITY, DEFAULT_SCALE_RATIO, DEFAULT_SPACING_RATIO,
};
