//! Conversion of decoded geometry into render-ready meshes
//!
//! The normalizer applies the game's conventions on top of whatever the
//! decoder produced:
//!
//! - the `mat_split` triangle list wins over the raw list when present
//! - triangles with out-of-range indices or coincident corners are dropped
//! - every face is emitted as `(b, a, c)`
//! - unknown material references fall back to material 0
//! - texture V coordinates are flipped (`v' = 1 - v`) unless disabled
//! - colours are scaled from 0..=255 to 0.0..=1.0

use gta_data::{Diagnostic, DiagnosticCode, DiagnosticReport, Parsed};

use crate::geometry::{DecodedGeometry, Material, Triangle};

/// Largest per-axis distance at which two positions count as the same point
pub const POSITION_EPSILON: f32 = 1e-6;

/// Which triangle list to build faces from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriangleSource {
    /// Use `mat_split` when the decoder produced it, the raw list otherwise
    #[default]
    PreferMaterialSplit,
    /// Always use the raw triangle list
    Raw,
}

/// Options for [`normalize`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizeOptions {
    /// Triangle list preference
    pub triangle_source: TriangleSource,
    /// Flip texture V coordinates
    pub flip_v: bool,
    /// Extension appended to texture names, without the dot
    pub texture_extension: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            triangle_source: TriangleSource::PreferMaterialSplit,
            flip_v: true,
            texture_extension: "png".to_string(),
        }
    }
}

/// A face of the output mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Face {
    /// Vertex indices in emitted winding order
    pub indices: [u32; 3],
    /// Index into the source geometry's materials
    pub material: usize,
}

/// A material that survived normalization
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderMaterial {
    /// Index of the material in the source geometry
    pub source_index: usize,
    /// Texture file name built from the first texture
    pub texture_file: Option<String>,
    /// Colour in unit range
    pub color: Option<[f32; 4]>,
}

/// A run of consecutive faces sharing a material
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderSubmesh {
    /// Source material index
    pub material_index: usize,
    /// First face of the run
    pub start_face: usize,
    /// Number of faces in the run
    pub face_count: usize,
    /// Texture file of the material, if it has one
    pub texture_filename: Option<String>,
}

/// Render-ready mesh data
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderMesh {
    /// Vertex positions, unchanged from the source
    pub positions: Vec<[f32; 3]>,
    /// Faces in source order
    pub faces: Vec<Face>,
    /// Per face-corner texture coordinates, one list per layer
    pub uv_layers: Vec<Vec<[f32; 2]>>,
    /// Materials with a texture or a colour
    pub materials: Vec<RenderMaterial>,
    /// Faces grouped by material
    pub submeshes: Vec<RenderSubmesh>,
}

impl RenderMesh {
    /// Number of faces
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Flat index buffer
    pub fn indices(&self) -> Vec<u32> {
        self.faces.iter().flat_map(|f| f.indices).collect()
    }

    /// Look up a surviving material by its source index
    pub fn material(&self, source_index: usize) -> Option<&RenderMaterial> {
        self.materials.iter().find(|m| m.source_index == source_index)
    }
}

/// Build a render mesh from a decoded geometry.
///
/// Returns `None` with a [`DiagnosticCode::NoGeometry`] diagnostic when the
/// geometry has no vertices. Every other problem is reported and the mesh is
/// built from the data that remains.
pub fn normalize(geometry: &DecodedGeometry, options: &NormalizeOptions) -> Parsed<Option<RenderMesh>> {
    let mut report = DiagnosticReport::new();

    if geometry.vertices.is_empty() {
        report.add_error(DiagnosticCode::NoGeometry, "geometry has no vertices");
        return Parsed::new(None, report);
    }

    let triangles = select_triangles(geometry, options.triangle_source);
    let faces = build_faces(geometry, triangles, &mut report);
    let uv_layers = build_uv_layers(geometry, &faces, options.flip_v, &mut report);
    let materials = build_materials(&geometry.materials, &options.texture_extension, &mut report);

    let mut mesh = RenderMesh {
        positions: geometry.vertices.clone(),
        faces,
        uv_layers,
        materials,
        submeshes: Vec::new(),
    };
    mesh.submeshes = build_submeshes(&mesh);

    log::debug!(
        "Normalized {} of {} triangles into {} submeshes",
        mesh.faces.len(),
        triangles.len(),
        mesh.submeshes.len()
    );

    Parsed::new(Some(mesh), report)
}

fn select_triangles(geometry: &DecodedGeometry, source: TriangleSource) -> &[Triangle] {
    match (source, geometry.material_split()) {
        (TriangleSource::PreferMaterialSplit, Some(split)) => {
            log::trace!("Using mat_split triangle list");
            split
        }
        _ => &geometry.triangles,
    }
}

fn build_faces(
    geometry: &DecodedGeometry,
    triangles: &[Triangle],
    report: &mut DiagnosticReport,
) -> Vec<Face> {
    let vertex_count = geometry.vertices.len();
    let mut faces = Vec::with_capacity(triangles.len());

    for (i, triangle) in triangles.iter().enumerate() {
        let corners = [triangle.a, triangle.b, triangle.c];

        if let Some(bad) = corners.iter().find(|&&v| v as usize >= vertex_count) {
            report.push(Diagnostic::warning(
                DiagnosticCode::IndexOutOfBounds,
                format!(
                    "triangle {} references vertex {} of {}",
                    i, bad, vertex_count
                ),
            ));
            continue;
        }

        let [pa, pb, pc] = corners.map(|v| geometry.vertices[v as usize]);
        if same_point(pa, pb) || same_point(pb, pc) || same_point(pa, pc) {
            report.push(Diagnostic::warning(
                DiagnosticCode::DegenerateTriangle,
                format!("triangle {} has coincident corners", i),
            ));
            continue;
        }

        let mut material = triangle.material as usize;
        if material >= geometry.materials.len() {
            report.push(Diagnostic::warning(
                DiagnosticCode::MissingMaterial,
                format!(
                    "triangle {} references material {} of {}, using material 0",
                    i,
                    material,
                    geometry.materials.len()
                ),
            ));
            material = 0;
        }

        faces.push(Face {
            indices: [triangle.b, triangle.a, triangle.c],
            material,
        });
    }

    faces
}

fn same_point(a: [f32; 3], b: [f32; 3]) -> bool {
    a.iter()
        .zip(&b)
        .all(|(x, y)| (x - y).abs() <= POSITION_EPSILON)
}

fn build_uv_layers(
    geometry: &DecodedGeometry,
    faces: &[Face],
    flip_v: bool,
    report: &mut DiagnosticReport,
) -> Vec<Vec<[f32; 2]>> {
    let mut layers = Vec::with_capacity(geometry.uv_layers.len());

    for (index, layer) in geometry.uv_layers.iter().enumerate() {
        if layer.len() != geometry.vertices.len() {
            report.add_warning(
                DiagnosticCode::UvLayerMismatch,
                format!(
                    "UV layer {} has {} coordinates for {} vertices, skipped",
                    index,
                    layer.len(),
                    geometry.vertices.len()
                ),
            );
            continue;
        }

        let loops = faces
            .iter()
            .flat_map(|face| face.indices)
            .map(|vertex| {
                let [u, v] = layer[vertex as usize];
                if flip_v { [u, 1.0 - v] } else { [u, v] }
            })
            .collect();
        layers.push(loops);
    }

    layers
}

fn build_materials(
    materials: &[Material],
    extension: &str,
    report: &mut DiagnosticReport,
) -> Vec<RenderMaterial> {
    let mut output = Vec::with_capacity(materials.len());

    for (index, material) in materials.iter().enumerate() {
        if material.is_empty() {
            report.add_warning(
                DiagnosticCode::EmptyMaterial,
                format!("material {} has neither texture nor colour, dropped", index),
            );
            continue;
        }

        output.push(RenderMaterial {
            source_index: index,
            texture_file: material
                .textures
                .first()
                .map(|name| texture_file_name(name, extension)),
            color: material.color.map(|rgba| rgba.map(|c| f32::from(c) / 255.0)),
        });
    }

    output
}

/// File name for a texture, `name.extension` or just `name`
pub fn texture_file_name(name: &str, extension: &str) -> String {
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", name, extension)
    }
}

fn build_submeshes(mesh: &RenderMesh) -> Vec<RenderSubmesh> {
    let mut submeshes: Vec<RenderSubmesh> = Vec::new();

    for (i, face) in mesh.faces.iter().enumerate() {
        match submeshes.last_mut() {
            Some(current) if current.material_index == face.material => current.face_count += 1,
            _ => submeshes.push(RenderSubmesh {
                material_index: face.material,
                start_face: i,
                face_count: 1,
                texture_filename: mesh
                    .material(face.material)
                    .and_then(|m| m.texture_file.clone()),
            }),
        }
    }

    submeshes
}
