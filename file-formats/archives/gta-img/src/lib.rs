//! # gta_img - IMG sector archive reader
//!
//! IMG archives pack the game's models (`.dff`) and texture dictionaries
//! (`.txd`) into 2048-byte sectors. Two layouts exist:
//!
//! - **Variant 1**: the index lives in a separate `.dir` file made of
//!   32-byte records, the `.img` file holds only payloads.
//! - **Variant 2**: the `.img` file starts with `"VER2"`, an entry count and
//!   the same 32-byte records.
//!
//! ## Examples
//!
//! ```no_run
//! use gta_img::{ImgArchive, ResourceKind};
//!
//! # fn main() -> Result<(), gta_img::Error> {
//! let mut archive = ImgArchive::open("models/gta3.img")?;
//!
//! for entry in archive.index().entries() {
//!     println!("{} ({} bytes)", entry.name, entry.byte_length());
//! }
//!
//! if let Some(model) = archive.read_file("barrel", ResourceKind::Model)? {
//!     println!("barrel.dff is {} bytes", model.len());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod archive;
pub mod error;
pub mod extract;
pub mod index;

pub use archive::ImgArchive;
pub use error::{Error, Result};
pub use extract::extract;
pub use index::{
    ArchiveIndex, ENTRY_SIZE, ImgVersion, IndexEntry, NAME_LENGTH, ResourceKind, SECTOR_SIZE,
    VER2_MAGIC,
};
