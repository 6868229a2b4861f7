//! Normalize a single PNG.
//!
//! Usage:
//! ```sh
//! cargo run --example normalize_one -- input.png output.png [size]
//! ```

use std::env;
use std::process;

use sprite_normalizer::{NormalizeOptions, Normalizer};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <input> <output> [size]", args[0]);
        process::exit(1);
    }

    let input = &args[1];
    let output = &args[2];
    let size = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(340);

    let opts = NormalizeOptions {
        size,
        ..NormalizeOptions::default()
    };
    let normalizer = Normalizer::new(opts).expect("size must be greater than 0");
    let result = normalizer.process_file(input.as_ref(), output.as_ref());

    match result.outcome {
        Ok(()) => println!("Done: {}", result.destination.display()),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
