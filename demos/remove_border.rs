//! Strip the border from a single image.
//!
//! Usage:
//! ```sh
//! cargo run --example remove_border -- input.jpg output.png
//! ```

use std::env;
use std::process;

use borderless::{BorderEngine, BorderOptions};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <input> <output>", args[0]);
        process::exit(1);
    }

    let input = &args[1];
    let output = &args[2];

    let opts = BorderOptions {
        crop: true,
        ..BorderOptions::default()
    };
    let engine = BorderEngine::new(opts).expect("default options are valid");

    match engine.process_file(input.as_ref(), output.as_ref()) {
        Ok(report) => {
            println!(
                "Done: removed {} of {} border regions ({} pixels)",
                report.removed_regions, report.regions, report.cleared_pixels
            );
            if let Some(b) = report.crop {
                println!("Cropped to {}x{}", b.width(), b.height());
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
