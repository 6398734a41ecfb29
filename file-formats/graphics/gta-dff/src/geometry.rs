//! Decoded geometry handed over by an external model decoder

use std::collections::HashMap;

/// Name of the material-partitioned triangle list extension
pub const MAT_SPLIT: &str = "mat_split";

/// A triangle as stored by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle {
    /// First vertex index
    pub a: u32,
    /// Second vertex index
    pub b: u32,
    /// Third vertex index
    pub c: u32,
    /// Material index
    pub material: u32,
}

impl Triangle {
    /// Create a triangle
    pub fn new(a: u32, b: u32, c: u32, material: u32) -> Self {
        Self { a, b, c, material }
    }
}

/// A material as stored by the decoder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    /// 8-bit RGBA colour
    pub color: Option<[u8; 4]>,
    /// Texture names in declaration order
    pub textures: Vec<String>,
}

impl Material {
    /// A material using a single texture
    pub fn textured(name: impl Into<String>) -> Self {
        Self {
            color: None,
            textures: vec![name.into()],
        }
    }

    /// A flat coloured material
    pub fn colored(rgba: [u8; 4]) -> Self {
        Self {
            color: Some(rgba),
            textures: Vec::new(),
        }
    }

    /// Whether the material has neither texture nor colour
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.textures.is_empty()
    }
}

/// One geometry as produced by a model decoder
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedGeometry {
    /// Vertex positions
    pub vertices: Vec<[f32; 3]>,
    /// Raw triangle list
    pub triangles: Vec<Triangle>,
    /// Materials referenced by the triangles
    pub materials: Vec<Material>,
    /// Per-vertex texture coordinates, one list per layer
    pub uv_layers: Vec<Vec<[f32; 2]>>,
    /// Alternate triangle lists keyed by extension name
    pub extensions: HashMap<String, Vec<Triangle>>,
}

impl DecodedGeometry {
    /// The `mat_split` triangle list, if the decoder produced one
    pub fn material_split(&self) -> Option<&[Triangle]> {
        self.extensions.get(MAT_SPLIT).map(Vec::as_slice)
    }
}
