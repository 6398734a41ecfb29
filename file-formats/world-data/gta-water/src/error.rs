//! Error handling for water.dat files

use std::io;
use thiserror::Error;

/// Errors that can occur when working with water.dat files
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A flag value outside 0..=3
    #[error("Invalid water flag: {0}")]
    InvalidFlag(i64),
}

/// Type alias for Results from water.dat operations
pub type Result<T> = std::result::Result<T, Error>;
