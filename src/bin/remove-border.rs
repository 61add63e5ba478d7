use std::path::PathBuf;
use std::process;

use clap::Parser;

use borderless::codec::is_supported_image;
use borderless::{logging, BorderEngine, BorderOptions};

#[derive(Parser)]
#[command(
    name = "remove-border",
    about = "Make an edge-connected border transparent while keeping same-colored interior shapes",
    version,
    after_help = "Only border-connected regions that are at most --minw pixels thick in either\n\
                  direction are removed. Thicker regions (a white route line, a sun disc) stay."
)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Source image
    input: PathBuf,

    /// Destination image (PNG, WebP, TIFF, BMP, ICO or QOI)
    output: PathBuf,

    /// Crop the canvas to the remaining non-transparent content
    #[arg(long)]
    crop: bool,

    /// Color distance threshold to the edge color (0-441.67)
    #[arg(long, default_value_t = 12.0)]
    th: f64,

    /// Regions at most this many pixels thick are removed
    #[arg(long, default_value_t = 4)]
    minw: u32,

    /// Extra pixels of padding kept around the crop box
    #[arg(long, default_value_t = 0)]
    pad: u32,

    /// Depth of the edge strips used to estimate the border color
    #[arg(long, default_value_t = 8)]
    strip: u32,

    /// Remove every border-connected region regardless of thickness
    #[arg(long)]
    no_preserve: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let opts = BorderOptions {
        threshold: cli.th,
        min_thickness: cli.minw,
        strip: cli.strip,
        crop: cli.crop,
        pad: cli.pad,
        preserve_thick: !cli.no_preserve,
    };

    let engine = match BorderEngine::new(opts) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if !is_supported_image(&cli.input) {
        tracing::debug!(
            path = %cli.input.display(),
            "unrecognized input extension, detecting format from contents"
        );
    }

    match engine.process_file(&cli.input, &cli.output) {
        Ok(report) => {
            tracing::debug!(
                regions = report.regions,
                removed = report.removed_regions,
                "done"
            );
            if let Some(b) = report.crop {
                tracing::info!(width = b.width(), height = b.height(), "cropped");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
