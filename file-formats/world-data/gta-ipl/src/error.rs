//! Error handling for IPL and IDE files

use std::io;
use thiserror::Error;

/// Errors that can occur when working with IPL and IDE files
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The export was written, but several records shared an id.
    ///
    /// Every record with a unique id is already in the output; the records
    /// reusing an id were left out. The output must be treated as suspect.
    #[error("Duplicate ids in export: {}", format_ids(.0))]
    DuplicateIds(Vec<i32>),

    /// Consecutive ids starting at `start` do not fit in an `i32`
    #[error("Cannot number {count} records from {start}: id range overflows")]
    IdOverflow {
        /// First id requested
        start: i32,
        /// Number of records to number
        count: usize,
    },
}

fn format_ids(ids: &[i32]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Type alias for Results from IPL and IDE operations
pub type Result<T> = std::result::Result<T, Error>;
