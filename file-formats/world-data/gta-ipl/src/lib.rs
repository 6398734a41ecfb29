//! # gta_ipl - Item placement and object definition files
//!
//! IPL files place model instances in the world, IDE files define the models
//! themselves. Both are comma-separated text wrapped in named sections:
//!
//! ```text
//! inst
//! 18000, barrel, 0, 10.000000, 20.000000, 5.000000, 0.000000, 0.000000, 0.000000, 1.000000, -1
//! end
//! ```
//!
//! The rotation columns are stored scalar-last on disk and scalar-first in
//! [`Quaternion`]. Readers return their records wrapped in
//! [`Parsed`](gta_data::Parsed) so that bad lines can be reported without
//! losing the rest of the file.
//!
//! ## Examples
//!
//! ```
//! use gta_ipl::{IplWriteOptions, parse_ipl, write_ipl};
//! use std::io::Cursor;
//!
//! # fn main() -> Result<(), gta_ipl::Error> {
//! let text = "inst\n1, barrel, 0, 1, 2, 3, 0, 0, 0, 1\nend\n";
//! let parsed = parse_ipl(Cursor::new(text))?;
//! assert_eq!(parsed.value[0].rotation.w, 1.0);
//!
//! let mut out = Vec::new();
//! write_ipl(&mut out, &parsed.value, &IplWriteOptions::default())?;
//! assert!(String::from_utf8_lossy(&out).starts_with("inst\n1, barrel, 0, 1.000000"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod error;
mod export;
pub mod ide;
pub mod ipl;
mod section;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use export::IplWriteOptions;
pub use ide::{parse_ide, write_ide};
pub use ipl::{parse_ipl, write_ipl};
pub use types::{
    BatchValues, DEFAULT_DRAW_DISTANCE, IdeRecord, InstanceRecord, LOD_PREFIX, NO_LOD, Quaternion,
    assign_definition_ids, assign_ids, strip_lod_prefix,
};
pub use validation::{MAX_NAME_LENGTH, validate_names, validate_records};
