//! Error types for star field construction and frame output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while constructing a star field or renderer.
///
/// Rendering itself never fails; degenerate stars are skipped.
#[derive(Debug, Error, PartialEq)]
pub enum SkyError {
    /// A periodic extent was zero, negative, or not finite.
    #[error("field extent `{axis}` must be finite and > 0, got {value}")]
    InvalidDimension {
        /// Axis name (`x`, `y` or `z`).
        axis: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The output raster has a zero dimension.
    #[error("image size must be non-zero, got {width}x{height}")]
    InvalidImageSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A rendering knob was zero, negative, or not finite.
    #[error("render setting `{name}` must be finite and > 0, got {value}")]
    InvalidSetting {
        /// Setting name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Errors raised while persisting a rendered frame.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The frame could not be encoded or written.
    #[error("failed to write frame {path}: {source}")]
    Encode {
        /// Destination file.
        path: PathBuf,
        /// Underlying codec or I/O error.
        #[source]
        source: image::ImageError,
    },
}
