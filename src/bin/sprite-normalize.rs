use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sprite_normalizer::params::DEFAULT_SIZE;
use sprite_normalizer::{parse_lenient, Error, NormalizeOptions, Normalizer, ProcessResult};

#[derive(Parser, Debug)]
#[command(
    name = "sprite-normalize",
    about = "Resize/crop PNGs to squares and make white pixels transparent",
    version,
    after_help = "Tolerance 1.0 removes only pure white, 0.0 makes every pixel transparent.\n\
                  Legacy 0-255 tolerance values are divided by 255."
)]
struct Cli {
    /// Input directory containing PNGs
    #[arg(short, long, default_value = ".")]
    input: PathBuf,

    /// Output directory for processed PNGs
    #[arg(short, long, default_value = "./out")]
    output: PathBuf,

    /// Output square size in pixels
    #[arg(short, long, default_value_t = DEFAULT_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    size: u32,

    /// Whiteness tolerance (0.0-1.0, or legacy 0-255)
    #[arg(short, long, default_value = "1.0", allow_hyphen_values = true)]
    tolerance: String,

    /// Search the input directory recursively and mirror its layout
    #[arg(short, long)]
    recursive: bool,

    /// Edge smoothing (0.0-1.0), Gaussian blur of the alpha mask
    #[arg(short = 'm', long, default_value = "0.0", allow_hyphen_values = true)]
    smoothing: String,

    /// Enable verbose diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Only report failures
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let opts = NormalizeOptions {
        size: cli.size,
        tolerance: parse_lenient("tolerance", &cli.tolerance),
        smoothing: parse_lenient("smoothing", &cli.smoothing),
    };

    let normalizer = match Normalizer::new(opts) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let input_dir = absolute(&cli.input);
    let output_dir = absolute(&cli.output);

    let results = match normalizer.process_directory(&input_dir, &output_dir, cli.recursive) {
        Ok(results) => results,
        Err(Error::InputNotDirectory(dir)) => {
            println!("Input directory does not exist: {}", dir.display());
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Fatal: {e}");
            process::exit(1);
        }
    };

    if results.is_empty() {
        println!("No PNG files found in {}", input_dir.display());
        return;
    }

    let mut success_count = 0u32;
    let mut fail_count = 0u32;

    for r in &results {
        print_result(r, cli.quiet);
        if r.is_success() {
            success_count += 1;
        } else {
            fail_count += 1;
        }
    }

    if !cli.quiet {
        println!(
            "[Summary] Processed: {success_count}, Failed: {fail_count} (Total: {})",
            results.len()
        );
    }
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn print_result(result: &ProcessResult, quiet: bool) {
    match &result.outcome {
        Ok(()) => {
            if !quiet {
                println!(
                    "Processed: {} -> {}",
                    result.source.display(),
                    result.destination.display()
                );
            }
        }
        Err(e) => println!("Failed to process {}: {e}", result.source.display()),
    }
}
