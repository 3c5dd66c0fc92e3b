//! Error handling for ScaleMark
//!
//! Provides error types for every layer that can fail:
//! - Length parse errors (real-world length input during calibration)
//! - Asset errors (loading a background image or document page)
//! - Export errors (flattening the annotated view into an image)
//!
//! None of these are fatal. Callers report them and leave state unchanged.
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Length parse error type
///
/// Raised when a real-world length string such as `"150cm"` cannot be
/// interpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LengthParseError {
    /// Input was empty or only whitespace
    #[error("Length is empty")]
    Empty,

    /// The numeric part could not be parsed
    #[error("Invalid number in length: {input}")]
    InvalidNumber {
        /// The offending input.
        input: String,
    },

    /// The unit suffix is not one of m, cm or mm
    #[error("Unknown length unit '{unit}' (expected m, cm or mm)")]
    UnknownUnit {
        /// The unrecognised unit text.
        unit: String,
    },

    /// The value parsed but is zero, which cannot define a scale
    #[error("Length must be greater than zero")]
    NotPositive,
}

/// Asset error type
///
/// Represents failures while loading or paging a background asset.
#[derive(Error, Debug, Clone)]
pub enum AssetError {
    /// File type is not an image or document we can show
    #[error("Unsupported file type: {name}")]
    UnsupportedType {
        /// File name or media type that was rejected.
        name: String,
    },

    /// The asset was recognised but could not be decoded
    #[error("Failed to decode {name}: {reason}")]
    DecodeFailed {
        /// File name of the asset.
        name: String,
        /// Decoder message.
        reason: String,
    },

    /// Requested page does not exist
    #[error("Page {page} out of range (document has {count} pages)")]
    PageOutOfRange {
        /// Requested 1-based page number.
        page: u32,
        /// Number of pages in the document.
        count: u32,
    },

    /// A load finished after a newer load had already been started
    #[error("Load superseded by a newer background")]
    Superseded,
}

/// Export error type
#[derive(Error, Debug, Clone)]
pub enum ExportError {
    /// Nothing has been loaded yet
    #[error("No background loaded")]
    NoBackground,

    /// Raster surface could not be created
    #[error("Cannot allocate a {width}x{height} surface")]
    Surface {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// Encoding or writing the output failed
    #[error("Failed to write export: {reason}")]
    Write {
        /// Encoder or I/O message.
        reason: String,
    },
}

/// Main error type for ScaleMark
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Length parse error
    #[error(transparent)]
    Length(#[from] LengthParseError),

    /// Asset error
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a length input error
    pub fn is_length_error(&self) -> bool {
        matches!(self, Error::Length(_))
    }

    /// Check if this is an asset loading error
    pub fn is_asset_error(&self) -> bool {
        matches!(self, Error::Asset(_))
    }

    /// Check if this is an export error
    pub fn is_export_error(&self) -> bool {
        matches!(self, Error::Export(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
