// Rust guideline compliant 2026-02-06

//! Error types for the credstate core library.
//!
//! Only genuinely exceptional conditions are errors. Queries over absent data
//! (empty undo history, empty queue, unknown graph node) return `None`,
//! `false`, or an empty collection instead.

use thiserror::Error;

/// Result type alias for credstate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for credstate operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A mutating call received an absent or otherwise unusable argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration file or environment override is invalid.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// The persistence collaborator failed to load or save credentials.
    #[error("Persistence error: {0}")]
    Persistence(String),
}
