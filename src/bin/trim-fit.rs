use std::path::PathBuf;
use std::process;

use clap::{ArgGroup, Parser};

use borderless::fit::{self, FitTarget};
use borderless::{codec, logging, Result};

#[derive(Parser)]
#[command(
    name = "trim-fit",
    about = "Trim transparent margins, then resize without changing aspect ratio",
    version,
    group(ArgGroup::new("target").args(["fit", "width", "height"]))
)]
struct Cli {
    /// Input image (PNG/JPG/WebP etc.)
    input: PathBuf,

    /// Output image (PNG recommended)
    output: PathBuf,

    /// Alpha threshold (0-255) above which a pixel counts as content
    #[arg(long = "alpha-th", default_value_t = 1)]
    alpha_th: u8,

    /// Scale so the longest side equals this value
    #[arg(long)]
    fit: Option<u32>,

    /// Scale to this width (keeps aspect)
    #[arg(long)]
    width: Option<u32>,

    /// Scale to this height (keeps aspect)
    #[arg(long)]
    height: Option<u32>,

    /// Only trim; don't resize
    #[arg(long)]
    no_resize: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn run(cli: &Cli) -> Result<()> {
    let target = if cli.no_resize {
        None
    } else {
        FitTarget::from_choices(cli.fit, cli.width, cli.height)?
    };
    codec::output_format(&cli.output)?;

    let image = codec::load_rgba(&cli.input)?;
    let out = fit::trim_and_fit(image, cli.alpha_th, target);
    codec::save_rgba(&out, &cli.output)?;

    tracing::info!(
        output = %cli.output.display(),
        width = out.width(),
        height = out.height(),
        "trimmed"
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        eprintln!("ERROR: {e}");
        process::exit(1);
    }
}
