//! Error types for titlescribe-core

use thiserror::Error;

/// Errors raised by the domain layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Custom placeholder key is empty after trimming
    #[error("Placeholder key cannot be empty")]
    EmptyPlaceholderKey,

    /// Custom placeholder key was already declared for this deed type
    #[error("Placeholder key already exists: {0}")]
    DuplicatePlaceholder(String),

    /// Custom placeholder key shadows one of the standard narrative placeholders
    #[error("Placeholder key is reserved: {0}")]
    ReservedPlaceholder(String),

    /// Custom placeholder key contains a brace and could never be matched
    #[error("Placeholder key contains braces: {0}")]
    InvalidPlaceholderKey(String),

    /// Narrative template lookup against the backing store failed
    #[error("Template lookup failed: {0}")]
    Lookup(String),
}

/// Result type for domain operations
pub type Result<T> = std::result::Result<T, CoreError>;
