//! Error types for the alpha-matte crate.

use std::path::PathBuf;

/// Errors that can occur while extracting an alpha channel.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The white-pass and black-pass images have different dimensions.
    #[error(
        "dimension mismatch: white pass is {}x{}, black pass is {}x{}",
        .white.0, .white.1, .black.0, .black.1
    )]
    DimensionMismatch {
        /// White-pass `(width, height)`.
        white: (u32, u32),
        /// Black-pass `(width, height)`.
        black: (u32, u32),
    },

    /// The background color spec is neither a keyword nor a `#RRGGBB` literal.
    #[error("invalid background color {0:?} (expected white, black, auto or #RRGGBB)")]
    InvalidColor(String),

    /// The chroma key tolerance is outside `[0, 255]`.
    #[error("invalid tolerance {0} (expected 0-255)")]
    InvalidTolerance(i32),

    /// A referenced source file does not exist.
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// A pixel buffer does not hold exactly `width * height * 4` bytes.
    #[error("pixel buffer of {actual} bytes does not match {width}x{height} RGBA ({expected} bytes)")]
    InvalidBuffer {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// Required buffer length, if it fits in memory.
        expected: usize,
        /// Supplied buffer length.
        actual: usize,
    },

    /// The image has a zero dimension.
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output format is not supported.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An error occurred while decoding or encoding an image.
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
