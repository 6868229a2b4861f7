//! Square-crop PNG sprites and turn near-white backgrounds transparent.
//!
//! Each image is scaled so its smaller side equals the target size,
//! center-cropped to a square, and given a new alpha channel: pixels whose
//! R, G and B all reach the whiteness threshold become fully transparent,
//! every other pixel fully opaque. The mask can be Gaussian-blurred first to
//! soften the cut-out edges.
//!
//! # Quick Start
//!
//! ```no_run
//! use sprite_normalizer::{NormalizeOptions, Normalizer};
//!
//! let normalizer = Normalizer::new(NormalizeOptions::default()).expect("size is non-zero");
//! let img = image::open("icon.png").unwrap();
//! let square = normalizer.normalize(&img);
//! square.save("icon_square.png").unwrap();
//! ```
//!
//! # Batch processing
//!
//! ```no_run
//! use std::path::Path;
//! use sprite_normalizer::{NormalizeOptions, Normalizer};
//!
//! let opts = NormalizeOptions { size: 128, tolerance: 0.95, smoothing: 0.2 };
//! let normalizer = Normalizer::new(opts).unwrap();
//! let results = normalizer
//!     .process_directory(Path::new("sprites"), Path::new("out"), true)
//!     .unwrap();
//! for r in &results {
//!     if let Err(e) = &r.outcome {
//!         eprintln!("{}: {e}", r.source.display());
//!     }
//! }
//! ```

#![deny(missing_docs)]

mod engine;
pub mod error;
pub mod mask;
pub mod params;
pub mod resize;

pub use engine::{
    collect_pngs, destination_path, is_png, load_png, save_png, Normalizer, ProcessResult,
};
pub use error::{Error, Result};
pub use params::{parse_lenient, NormalizeOptions};
