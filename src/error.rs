//! Error types for outline-tasks.

use std::io;
use thiserror::Error;

/// Result type alias for outline-tasks operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading outlines or exporting projects.
///
/// Classification problems inside a single build are not errors; they are
/// reported as [`crate::build::Inconsistency`] values and never abort a build.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not recognized as a PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// The PDF has no outline (bookmarks) to compile.
    #[error("Document has no outline")]
    MissingOutline,

    /// A todo depth range lies outside the outline's depth bounds.
    #[error("Todo depth range {lower}-{upper} is outside 0-{max_depth}")]
    DepthOutOfRange {
        lower: usize,
        upper: usize,
        max_depth: usize,
    },

    /// The outline contains no labeled entries, so no depth is valid.
    #[error("Outline has no labeled entries")]
    EmptyOutline,

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error serializing a project payload.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}
