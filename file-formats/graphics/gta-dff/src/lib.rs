//! # gta_dff - Render meshes from decoded RenderWare models
//!
//! This crate does not parse `.dff` or `.txd` binaries itself. A
//! [`ModelDecoder`] turns the bytes into [`DecodedGeometry`], and
//! [`normalize`] converts that into a [`RenderMesh`] following the game's
//! conventions for winding, texture coordinates and materials.
//! [`ModelLoader`] ties both to an IMG archive.
//!
//! ## Examples
//!
//! ```
//! use gta_dff::{DecodedGeometry, Material, NormalizeOptions, Triangle, normalize};
//!
//! let geometry = DecodedGeometry {
//!     vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
//!     triangles: vec![Triangle::new(0, 1, 2, 0)],
//!     materials: vec![Material::textured("barrel")],
//!     ..Default::default()
//! };
//!
//! let parsed = normalize(&geometry, &NormalizeOptions::default());
//! let mesh = parsed.value.expect("geometry has vertices");
//! assert_eq!(mesh.indices(), vec![1, 0, 2]);
//! assert_eq!(mesh.materials[0].texture_file.as_deref(), Some("barrel.png"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod decoder;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod normalize;

pub use decoder::{ModelDecoder, RasterImage, ResourceSource, TextureDecoder};
pub use error::{Error, Result};
pub use geometry::{DecodedGeometry, MAT_SPLIT, Material, Triangle};
pub use loader::{LoadOptions, LoadedModel, ModelLoader};
pub use normalize::{
    Face, NormalizeOptions, POSITION_EPSILON, RenderMaterial, RenderMesh, RenderSubmesh,
    TriangleSource, normalize, texture_file_name,
};
