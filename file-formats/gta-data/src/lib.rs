//! Shared building blocks for the GTA map-asset format crates.
//!
//! Every codec in this workspace reports per-record problems as structured
//! [`Diagnostic`] values instead of failing the whole file. A parse step
//! returns a [`Parsed`] value that carries the decoded data together with the
//! [`DiagnosticReport`] collected while producing it.
//!
//! The [`io_ext`] module holds the fixed-width name field helpers used by the
//! binary archive format, and [`text`] reads lines of the hand-edited text
//! formats without failing on stray non-UTF-8 bytes.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod diagnostic;
pub mod error;
pub mod io_ext;
pub mod text;

pub use diagnostic::{Diagnostic, DiagnosticCode, DiagnosticReport, Parsed, Severity};
pub use error::{DataError, Result};
pub use text::{LossyLines, LossyLinesExt};
