//! Error types for the borderless crate.

use std::path::PathBuf;

/// Errors that can occur while loading, transforming or saving an image.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source image is missing, unreadable or not decodable.
    #[error("failed to read input image {}: {source}", path.display())]
    Input {
        /// Path of the source image.
        path: PathBuf,
        /// Underlying decode or I/O failure.
        source: image::ImageError,
    },

    /// An option is outside its valid domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The destination could not be written.
    #[error("failed to write output image {}: {source}", path.display())]
    Output {
        /// Path of the destination image.
        path: PathBuf,
        /// Underlying encode or I/O failure.
        source: image::ImageError,
    },

    /// The output format is unknown or cannot store an alpha channel.
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
