//! water.dat writer

use std::io::Write;

use crate::error::Result;
use crate::parser::PROCESSED_MARKER;
use crate::types::{WaterSurface, WaterVertex};

/// Write `surfaces` as a water.dat file and return how many were written.
///
/// Corners are emitted in the order the game's renderer expects rather than
/// storage order: `[0, 1, 3, 2]` for quads and `[0, 2, 1]` for triangles.
pub fn write_water<W: Write>(writer: &mut W, surfaces: &[WaterSurface]) -> Result<usize> {
    writeln!(writer, "{}", PROCESSED_MARKER)?;

    for surface in surfaces {
        writeln!(writer, "{}", format_surface(surface))?;
    }

    writer.flush()?;
    log::debug!("Wrote {} water surfaces", surfaces.len());
    Ok(surfaces.len())
}

/// Render one surface as a record line, without the line break
pub fn format_surface(surface: &WaterSurface) -> String {
    let corners = surface.vertices.as_slice();
    let mut parts: Vec<String> = surface
        .vertices
        .write_order()
        .iter()
        .map(|&i| format_vertex(&corners[i]))
        .collect();
    parts.push(surface.flag.value().to_string());
    parts.join(" ")
}

fn format_vertex(vertex: &WaterVertex) -> String {
    let [x, y, z] = vertex.position;
    let [u, v] = vertex.flow_direction;
    format!(
        "{:.4} {:.4} {:.4} {:.5} {:.5} {:.5} {:.5}",
        x, y, z, u, v, vertex.unknown_height, vertex.wave_height
    )
}
