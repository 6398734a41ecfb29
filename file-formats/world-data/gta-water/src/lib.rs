//! # gta_water - water.dat surface definitions
//!
//! San Andreas describes its water as a flat list of triangles and quads in
//! `data/water.dat`. Each line is one surface: seven numbers per corner
//! followed by a flag saying whether the water is shallow and whether it is
//! drawn.
//!
//! ## Examples
//!
//! ```
//! use gta_water::{WaterFlag, parse_water, write_water};
//! use std::io::Cursor;
//!
//! # fn main() -> Result<(), gta_water::Error> {
//! let line = "0 0 0 0 0 0 0  10 0 0 0 0 0 0  0 10 0 0 0 0 0  1";
//! let parsed = parse_water(Cursor::new(line))?;
//! assert_eq!(parsed.value[0].flag, WaterFlag::DefaultVisible);
//!
//! let mut out = Vec::new();
//! write_water(&mut out, &parsed.value)?;
//! assert!(out.starts_with(b"processed\n"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod error;
pub mod parser;
pub mod types;
pub mod writer;

pub use error::{Error, Result};
pub use parser::{
    PROCESSED_MARKER, QUAD_FIELDS, TRIANGLE_FIELDS, count_valid_surfaces, parse_water,
};
pub use types::{SurfaceVertices, WaterFlag, WaterSurface, WaterVertex};
pub use writer::{format_surface, write_water};
