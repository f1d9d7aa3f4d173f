//! Batch driver: composite a list of images and write them out as JPEG.

use std::fmt;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader, RgbImage};
use tracing::{debug, info};

use crate::compositor;
use crate::error::{Error, Result};
use crate::params::WatermarkParams;

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Where an image's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A file on disk.
    Path(PathBuf),
    /// An encoded image already in memory.
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Decode the source, guessing the format from its content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Decode`] if the bytes are not a supported image.
    pub fn decode(&self) -> Result<DynamicImage> {
        match self {
            Self::Path(path) => ImageReader::open(path)?
                .with_guessed_format()?
                .decode()
                .map_err(Error::Decode),
            Self::Bytes(bytes) => image::load_from_memory(bytes).map_err(Error::Decode),
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Bytes(bytes) => write!(f, "<{} bytes in memory>", bytes.len()),
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// Options controlling where and how results are written.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory receiving `watermarked_{i}.jpg`; created if missing.
    pub output_dir: PathBuf,
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// File name of the `index`-th (1-based) output.
#[must_use]
pub fn output_file_name(index: usize) -> String {
    format!("watermarked_{index}.jpg")
}

/// Encode an RGB image as baseline JPEG.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `quality` is outside 1-100 and
/// [`Error::Encode`] if encoding fails.
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    check_quality(quality)?;
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality)
        .encode_image(img)
        .map_err(Error::Encode)?;
    Ok(bytes)
}

fn check_quality(quality: u8) -> Result<()> {
    if (1..=100).contains(&quality) {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name: "JPEG quality",
            value: f64::from(quality),
        })
    }
}

/// A decoded watermark plus the settings to stamp it with.
///
/// Create once and call [`BatchProcessor::run`] for any number of batches;
/// the watermark is never modified.
pub struct BatchProcessor {
    watermark: DynamicImage,
    params: WatermarkParams,
    options: BatchOptions,
}

impl BatchProcessor {
    /// Create a processor around an already decoded watermark.
    #[must_use]
    pub fn new(watermark: DynamicImage, params: WatermarkParams, options: BatchOptions) -> Self {
        Self {
            watermark,
            params,
            options,
        }
    }

    /// Decode the watermark from `source` and create a processor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] or [`Error::Io`] if the watermark cannot be loaded.
    pub fn from_source(
        source: &ImageSource,
        params: WatermarkParams,
        options: BatchOptions,
    ) -> Result<Self> {
        let watermark = source.decode()?;
        debug!(
            source = %source,
            width = watermark.width(),
            height = watermark.height(),
            "loaded watermark"
        );
        Ok(Self::new(watermark, params, options))
    }

    /// Decode `source` and composite the watermark onto it.
    ///
    /// # Errors
    ///
    /// Propagates decode errors and the compositor's errors.
    pub fn process_image(&self, source: &ImageSource) -> Result<RgbImage> {
        let base = source.decode()?;
        compositor::composite(&base, &self.watermark, &self.params)
    }

    /// Watermark every image in order and write `watermarked_{i}.jpg` for
    /// each, `i` starting at 1.
    ///
    /// Images are handled one at a time. The first failure aborts the batch;
    /// files already written for earlier images are left in place.
    ///
    /// # Errors
    ///
    /// Returns the first decode, geometry, parameter, encode or I/O error.
    pub fn run(&self, images: &[ImageSource]) -> Result<Vec<PathBuf>> {
        self.params.validate()?;
        check_quality(self.options.jpeg_quality)?;

        let output_dir = &self.options.output_dir;
        std::fs::create_dir_all(output_dir)?;

        let mut outputs = Vec::with_capacity(images.len());
        for (i, source) in images.iter().enumerate() {
            let index = i + 1;
            debug!(index, source = %source, "watermarking image");

            let watermarked = self.process_image(source)?;
            let bytes = encode_jpeg(&watermarked, self.options.jpeg_quality)?;

            let path = output_dir.join(output_file_name(index));
            std::fs::write(&path, bytes)?;
            info!(index, path = %path.display(), "wrote watermarked image");

            outputs.push(path);
        }

        Ok(outputs)
    }
}

/// Decode `watermark` and stamp it onto every image in `images`.
///
/// The watermark is decoded before anything is written, so a corrupt
/// watermark produces no output files. See [`BatchProcessor::run`] for the
/// per-image behaviour.
///
/// # Errors
///
/// Returns the first error encountered.
pub fn process_batch(
    images: &[ImageSource],
    watermark: &ImageSource,
    params: WatermarkParams,
    options: BatchOptions,
) -> Result<Vec<PathBuf>> {
    BatchProcessor::from_source(watermark, params, options)?.run(images)
}
