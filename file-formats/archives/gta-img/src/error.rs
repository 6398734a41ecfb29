//! Error types for the IMG archive library

use std::io;
use thiserror::Error;

/// Result type alias for IMG operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for IMG operations
///
/// Only conditions that make the whole stream unusable end up here. An
/// unrecognised archive header is reported as a diagnostic instead, see
/// [`crate::ArchiveIndex::read_embedded`].
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The split index stream is not a whole number of records
    #[error("Directory stream is {length} bytes, not a multiple of the {record_size}-byte entry size")]
    TruncatedDirectory {
        /// Total length of the directory stream
        length: u64,
        /// Size of one directory record
        record_size: usize,
    },

    /// The embedded index ended before `count` records were read
    #[error("Embedded index declares {declared} entries but the stream ended after {read}")]
    TruncatedIndex {
        /// Entry count from the header
        declared: u32,
        /// Entries that could be read
        read: u32,
    },

    /// The payload of a resource is shorter than its index entry claims
    #[error("Short read for '{name}': expected {expected} bytes at offset {offset}")]
    ShortRead {
        /// Resource name
        name: String,
        /// Byte offset of the resource
        offset: u64,
        /// Byte length from the index entry
        expected: u64,
    },

    /// A name could not be written into its fixed-width field
    #[error("Invalid entry name: {0}")]
    InvalidName(#[from] gta_data::DataError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = Error::TruncatedDirectory {
            length: 70,
            record_size: 32,
        };
        assert_eq!(
            format!("{error}"),
            "Directory stream is 70 bytes, not a multiple of the 32-byte entry size"
        );

        let error = Error::ShortRead {
            name: "barrel.dff".to_string(),
            offset: 4096,
            expected: 2048,
        };
        assert_eq!(
            format!("{error}"),
            "Short read for 'barrel.dff': expected 2048 bytes at offset 4096"
        );
    }
}
