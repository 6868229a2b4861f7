//! Normalization engine and batch driver.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::mask;
use crate::params::NormalizeOptions;
use crate::resize;

/// Outcome of processing a single source file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Source PNG path.
    pub source: PathBuf,
    /// Destination PNG path.
    pub destination: PathBuf,
    /// `Ok(())` when the destination was written.
    pub outcome: Result<()>,
}

impl ProcessResult {
    /// Whether the file was normalized and written.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Turns images into `size x size` squares with transparent white backgrounds.
///
/// Create once with [`Normalizer::new()`] and reuse for every file in a batch.
/// The normalizer holds no state besides its options.
#[derive(Debug, Clone)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    /// Create a normalizer from options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroSize`] if `options.size` is 0.
    pub fn new(options: NormalizeOptions) -> Result<Self> {
        if options.size == 0 {
            return Err(Error::ZeroSize);
        }
        Ok(Self { options })
    }

    /// The options this normalizer was built with.
    #[must_use]
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize a decoded image.
    ///
    /// Scales and center-crops to `size x size`, then replaces the alpha
    /// channel with the (optionally smoothed) whiteness mask.
    #[must_use]
    pub fn normalize(&self, image: &DynamicImage) -> RgbaImage {
        let rgba = image.to_rgba8();
        let mut out = resize::square(&rgba, self.options.size);

        let threshold = self.options.threshold();
        let radius = self.options.blur_radius();
        debug!(threshold, radius, "building alpha mask");

        let alpha = mask::smooth(&mask::whiteness_mask(&out, threshold), radius);
        mask::apply_alpha(&mut out, &alpha);
        out
    }

    /// Process a single file: decode, normalize, encode.
    ///
    /// The parent directory of `output` is created if missing. Any failure is
    /// recorded in the returned [`ProcessResult`] rather than returned.
    #[must_use]
    pub fn process_file(&self, input: &Path, output: &Path) -> ProcessResult {
        let outcome = self.try_process_file(input, output);
        if let Err(e) = &outcome {
            debug!(source = %input.display(), error = %e, "processing failed");
        }
        ProcessResult {
            source: input.to_path_buf(),
            destination: output.to_path_buf(),
            outcome,
        }
    }

    fn try_process_file(&self, input: &Path, output: &Path) -> Result<()> {
        let image = load_png(input)?;
        debug!(
            source = %input.display(),
            width = image.width(),
            height = image.height(),
            "decoded"
        );
        let normalized = self.normalize(&image);

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        save_png(&normalized, output)
    }

    /// Process every PNG in `input_dir`, writing results under `output_dir`.
    ///
    /// In recursive mode subdirectories are walked and their layout is
    /// mirrored in `output_dir`; otherwise only top-level files are read and
    /// written by base name. Uses parallel iteration when the `cli` feature
    /// is enabled (via rayon). Results are returned in discovery order, one
    /// per file; an empty vector means no PNG files were found.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputNotDirectory`] if `input_dir` is not a directory,
    /// and [`Error::Io`] or [`Error::Walk`] if the output directory cannot be
    /// created or the input directory cannot be read. Failures of individual
    /// files are reported in their [`ProcessResult`] instead.
    pub fn process_directory(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        recursive: bool,
    ) -> Result<Vec<ProcessResult>> {
        if !input_dir.is_dir() {
            return Err(Error::InputNotDirectory(input_dir.to_path_buf()));
        }
        std::fs::create_dir_all(output_dir)?;

        let sources = collect_pngs(input_dir, recursive)?;
        debug!(count = sources.len(), dir = %input_dir.display(), "found PNG files");

        let process = |source: &PathBuf| {
            let destination = destination_path(input_dir, source, output_dir, recursive);
            self.process_file(source, &destination)
        };

        #[cfg(feature = "cli")]
        {
            use rayon::prelude::*;
            Ok(sources.par_iter().map(process).collect())
        }

        #[cfg(not(feature = "cli"))]
        {
            Ok(sources.iter().map(process).collect())
        }
    }
}

/// Check if a file name ends in `.png`, ignoring case.
///
/// Matches on the raw file name, so `.png` itself and names that are not
/// valid UTF-8 are accepted too.
#[must_use]
pub fn is_png(path: &Path) -> bool {
    path.file_name().is_some_and(|name| {
        let bytes = name.as_encoded_bytes();
        bytes.len() >= 4 && bytes[bytes.len() - 4..].eq_ignore_ascii_case(b".png")
    })
}

/// List the PNG files in `dir`, sorted by file name within each directory.
///
/// Only the top level is scanned unless `recursive` is set. Unreadable
/// subdirectories are logged and skipped.
///
/// # Errors
///
/// Returns [`Error::Walk`] if `dir` itself cannot be read.
pub fn collect_pngs(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .sort_by_file_name();

    let mut pngs = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if is_png(path) && path.is_file() {
            pngs.push(entry.into_path());
        }
    }
    Ok(pngs)
}

/// Destination of `source` under `output_dir`.
///
/// Recursive mode keeps the path relative to `input_dir`; otherwise the
/// destination is flattened to the source's base name.
#[must_use]
pub fn destination_path(
    input_dir: &Path,
    source: &Path,
    output_dir: &Path,
    recursive: bool,
) -> PathBuf {
    let base = || Path::new(source.file_name().unwrap_or_default());
    let relative = if recursive {
        source.strip_prefix(input_dir).unwrap_or_else(|_| base())
    } else {
        base()
    };
    output_dir.join(relative)
}

/// Decode a PNG file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened and [`Error::Decode`]
/// if it is not a valid PNG.
pub fn load_png(path: &Path) -> Result<DynamicImage> {
    let file = File::open(path)?;
    image::load(BufReader::new(file), ImageFormat::Png).map_err(Error::Decode)
}

/// Encode an RGBA image as PNG, regardless of the path's extension.
///
/// # Errors
///
/// Returns [`Error::Encode`] if encoding or writing fails.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)
        .map_err(Error::Encode)
}
