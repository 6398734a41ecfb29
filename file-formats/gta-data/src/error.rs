//! Error types for the shared helpers

use std::io;
use thiserror::Error;

/// Errors raised by the shared binary helpers
#[derive(Error, Debug)]
pub enum DataError {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A name does not fit into its fixed-width field
    #[error("Name '{name}' is {length} bytes, field capacity is {capacity}")]
    NameTooLong {
        /// The offending name
        name: String,
        /// Encoded length in bytes
        length: usize,
        /// Capacity of the field in bytes
        capacity: usize,
    },

    /// A name contains characters outside the ASCII range
    #[error("Name '{0}' is not plain ASCII")]
    NonAsciiName(String),
}

/// Result type alias for shared helper operations
pub type Result<T> = std::result::Result<T, DataError>;
