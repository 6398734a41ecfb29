//! Error handling for model loading

use std::io;
use thiserror::Error;

/// Errors that can occur while loading models
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Extracting a payload from an IMG archive failed
    #[error("Archive error: {0}")]
    Archive(#[from] gta_img::Error),

    /// An external model or texture decoder rejected its input
    #[error("Failed to decode {resource}: {message}")]
    Decode {
        /// Name of the resource being decoded
        resource: String,
        /// Decoder supplied reason
        message: String,
    },
}

impl Error {
    /// Create a decode error for `resource`
    pub fn decode(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            resource: resource.into(),
            message: message.into(),
        }
    }
}

/// Type alias for Results from model loading
pub type Result<T> = std::result::Result<T, Error>;
