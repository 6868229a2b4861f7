//! Error types for the sprite-normalizer crate.

use std::path::PathBuf;

/// Errors that can occur while normalizing images.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target square size was zero.
    #[error("target size must be greater than 0")]
    ZeroSize,

    /// The batch input path is missing or is not a directory.
    #[error("input directory does not exist: {}", .0.display())]
    InputNotDirectory(PathBuf),

    /// Failed to decode the source PNG.
    #[error("failed to decode PNG: {0}")]
    Decode(image::ImageError),

    /// Failed to encode or write the output PNG.
    #[error("failed to encode PNG: {0}")]
    Encode(image::ImageError),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input directory could not be scanned.
    #[error("failed to scan directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
