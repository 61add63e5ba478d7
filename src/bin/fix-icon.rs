use std::path::PathBuf;
use std::process;

use clap::Parser;

use borderless::icon::{self, IconOptions};
use borderless::{codec, logging, Result};

#[derive(Parser)]
#[command(
    name = "fix-icon",
    about = "Trim an icon, scale it down and center it on a solid square canvas",
    version
)]
struct Cli {
    /// Input icon
    input: PathBuf,

    /// Output image (PNG recommended)
    output: PathBuf,

    /// Canvas edge length in pixels
    #[arg(long, default_value_t = 1024)]
    size: u32,

    /// Canvas color as #rrggbb or #rrggbbaa
    #[arg(long, default_value = "#1e5f8f")]
    background: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn run(cli: &Cli) -> Result<()> {
    let opts = IconOptions {
        size: cli.size,
        background: icon::parse_hex_color(&cli.background)?,
    };
    opts.validate()?;
    codec::output_format(&cli.output)?;

    let image = codec::load_rgba(&cli.input)?;
    let out = icon::center_on_canvas(image, &opts);
    codec::save_rgba(&out, &cli.output)?;

    tracing::info!(output = %cli.output.display(), size = opts.size, "icon written");
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
