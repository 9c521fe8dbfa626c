//! Error types for OOXML operations

use thiserror::Error;

/// Errors that can occur while reading, composing or writing a template
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Required file not found in archive
    #[error("Required file not found: {0}")]
    MissingFile(String),

    /// Stored template text could not be decoded into bytes
    #[error("Invalid template encoding: {0}")]
    Encoding(String),

    /// Composition of the report failed after the archive was read
    #[error("Render error: {0}")]
    Render(String),
}

impl OoxmlError {
    /// Whether the input could not be opened as a document package at all.
    ///
    /// These failures are reported before any placeholder processing happens.
    pub fn is_malformed_archive(&self) -> bool {
        matches!(
            self,
            OoxmlError::Archive(_) | OoxmlError::MissingFile(_) | OoxmlError::Encoding(_)
        )
    }
}

/// Result type for OOXML operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
