use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use tiled_watermark::{
    process_batch, BatchOptions, ImageSource, WatermarkParams, DEFAULT_JPEG_QUALITY,
    DEFAULT_OPACITY, DEFAULT_SCALE_RATIO, DEFAULT_SPACING_RATIO,
};

#[derive(Parser)]
#[command(
    name = "tile-watermark",
    about = "Stamp a staggered, semi-transparent watermark across images and export JPEGs",
    version,
    after_help = "Outputs are named watermarked_1.jpg, watermarked_2.jpg, ... in input order.\n\
                  Existing files with those names in the output directory are overwritten."
)]
struct Cli {
    /// Images to watermark
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Watermark image (any format; transparency is respected)
    #[arg(short, long)]
    watermark: PathBuf,

    /// Watermark opacity (0-255)
    #[arg(long, default_value_t = DEFAULT_OPACITY)]
    opacity: u8,

    /// Gap between tiles as a fraction of image width
    #[arg(long, default_value_t = DEFAULT_SPACING_RATIO)]
    spacing: f64,

    /// Tile width as a fraction of image width
    #[arg(long, default_value_t = DEFAULT_SCALE_RATIO)]
    scale: f64,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
    quality: u8,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn warn_outside_recommended(cli: &Cli) {
    if !(0.01..=0.2).contains(&cli.spacing) {
        warn!(spacing = cli.spacing, "spacing outside recommended range 0.01-0.2");
    }
    if !(0.05..=0.3).contains(&cli.scale) {
        warn!(scale = cli.scale, "scale outside recommended range 0.05-0.3");
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);
    warn_outside_recommended(&cli);

    let params = WatermarkParams::new(cli.opacity, cli.spacing, cli.scale);
    let options = BatchOptions {
        output_dir: cli.output,
        jpeg_quality: cli.quality,
    };
    let images: Vec<ImageSource> = cli.images.into_iter().map(ImageSource::from).collect();
    let watermark = ImageSource::from(cli.watermark);

    match process_batch(&images, &watermark, params, options) {
        Ok(paths) => {
            for path in &paths {
                println!("{}", path.display());
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
