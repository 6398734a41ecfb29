//! water.dat reader
//!
//! Each surface is one whitespace-separated line:
//!
//! | Fields  | Content                                                   |
//! |---------|-----------------------------------------------------------|
//! | 7 x N   | Per corner: X, Y, Z, flow U, flow V, unknown, wave height |
//! | 1       | Flag (0-3)                                                |
//!
//! N is 3 (22 fields) or 4 (29 fields). Blank lines, `#` comments and the
//! `processed` marker are ignored.

use gta_data::{Diagnostic, DiagnosticCode, DiagnosticReport, LossyLinesExt, Parsed};
use std::io::BufRead;

use crate::error::Result;
use crate::types::{WaterFlag, WaterSurface, WaterVertex};

/// Marker line the game writes at the top of processed files
pub const PROCESSED_MARKER: &str = "processed";

/// Field count of a three-corner record
pub const TRIANGLE_FIELDS: usize = 3 * WaterVertex::FIELDS + 1;

/// Field count of a four-corner record
pub const QUAD_FIELDS: usize = 4 * WaterVertex::FIELDS + 1;

/// Parse every surface in a water.dat file.
///
/// Malformed lines are skipped and reported; the rest of the file is still
/// read.
pub fn parse_water<R: BufRead>(reader: R) -> Result<Parsed<Vec<WaterSurface>>> {
    let mut report = DiagnosticReport::new();
    let mut surfaces = Vec::new();

    for (index, line) in reader.lossy_lines().enumerate() {
        let line = line?;
        let Some(fields) = record_fields(&line) else {
            continue;
        };

        match decode_surface(&fields) {
            Ok(surface) => surfaces.push(surface),
            Err(diagnostic) => report.push(diagnostic.at_line(index + 1)),
        }
    }

    log::debug!("Parsed {} water surfaces", surfaces.len());
    Ok(Parsed::new(surfaces, report))
}

/// Count the lines that would parse into a surface
pub fn count_valid_surfaces<R: BufRead>(reader: R) -> Result<usize> {
    let mut count = 0;
    for line in reader.lossy_lines() {
        let line = line?;
        if let Some(fields) = record_fields(&line)
            && decode_surface(&fields).is_ok()
        {
            count += 1;
        }
    }
    Ok(count)
}

/// Split a line into fields, or `None` for lines that carry no record
fn record_fields(line: &str) -> Option<Vec<&str>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line == PROCESSED_MARKER {
        return None;
    }
    Some(line.split_whitespace().collect())
}

fn decode_surface(fields: &[&str]) -> std::result::Result<WaterSurface, Diagnostic> {
    match fields.len() {
        n if n < TRIANGLE_FIELDS => {
            return Err(Diagnostic::error(
                DiagnosticCode::InsufficientFields,
                format!("expected {} or {} fields, found {}", TRIANGLE_FIELDS, QUAD_FIELDS, n),
            ));
        }
        TRIANGLE_FIELDS | QUAD_FIELDS => {}
        n => {
            return Err(Diagnostic::error(
                DiagnosticCode::UnexpectedFieldCount,
                format!("expected {} or {} fields, found {}", TRIANGLE_FIELDS, QUAD_FIELDS, n),
            ));
        }
    }

    let (flag_text, vertex_fields) = fields.split_last().ok_or_else(|| {
        Diagnostic::error(DiagnosticCode::InsufficientFields, "empty record")
    })?;

    let mut vertices = Vec::with_capacity(vertex_fields.len() / WaterVertex::FIELDS);
    for chunk in vertex_fields.chunks_exact(WaterVertex::FIELDS) {
        let mut values = [0f64; WaterVertex::FIELDS];
        for (slot, text) in values.iter_mut().zip(chunk) {
            *slot = text.parse().map_err(|_| {
                Diagnostic::error(
                    DiagnosticCode::InvalidNumber,
                    format!("'{}' is not a valid number", text),
                )
            })?;
        }
        vertices.push(WaterVertex::from_fields(values));
    }

    let flag_value: i64 = flag_text.parse().map_err(|_| {
        Diagnostic::error(
            DiagnosticCode::InvalidNumber,
            format!("flag '{}' is not an integer", flag_text),
        )
    })?;
    let flag = WaterFlag::try_from(flag_value)
        .map_err(|e| Diagnostic::error(DiagnosticCode::InvalidFlag, e.to_string()))?;

    let surface = match vertices.as_slice() {
        [a, b, c] => WaterSurface::triangle([*a, *b, *c], flag),
        [a, b, c, d] => WaterSurface::quad([*a, *b, *c, *d], flag),
        _ => {
            return Err(Diagnostic::error(
                DiagnosticCode::UnexpectedFieldCount,
                format!("{} corners do not form a surface", vertices.len()),
            ));
        }
    };

    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SurfaceVertices;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn record(corners: usize, flag: &str) -> String {
        let mut fields: Vec<String> = (0..corners * WaterVertex::FIELDS)
            .map(|i| format!("{}.5", i))
            .collect();
        fields.push(flag.to_string());
        fields.join(" ")
    }

    #[test]
    fn test_parse_triangle_fields() {
        let parsed = parse_water(Cursor::new(record(3, "2"))).unwrap();
        let surface = parsed.value[0];

        assert_eq!(surface.flag, WaterFlag::ShallowInvisible);
        let SurfaceVertices::Triangle(vertices) = surface.vertices else {
            panic!("expected a triangle");
        };
        assert_eq!(vertices[1].position, [7.5, 8.5, 9.5]);
        assert_eq!(vertices[1].flow_direction, [10.5, 11.5]);
        assert_eq!(vertices[1].unknown_height, 12.5);
        assert_eq!(vertices[1].wave_height, 13.5);
    }

    #[test]
    fn test_skipped_lines_are_silent() {
        let text = format!("processed\n\n# comment\n{}\n", record(4, "1"));
        let parsed = parse_water(Cursor::new(text)).unwrap();
        assert_eq!(parsed.value.len(), 1);
        assert!(parsed.report.is_clean());
    }

    #[test]
    fn test_bad_flag_and_number() {
        let bad_number = record(3, "1").replacen("0.5", "zero", 1);
        let text = format!("{}\n{}\n{}\n", record(3, "7"), bad_number, record(3, "x"));
        let parsed = parse_water(Cursor::new(text)).unwrap();

        assert!(parsed.value.is_empty());
        let codes: Vec<_> = parsed.report.diagnostics().iter().map(|d| (d.code, d.line)).collect();
        assert_eq!(
            codes,
            vec![
                (DiagnosticCode::InvalidFlag, Some(1)),
                (DiagnosticCode::InvalidNumber, Some(2)),
                (DiagnosticCode::InvalidNumber, Some(3)),
            ]
        );
    }

    #[test]
    fn test_non_utf8_lines_do_not_abort() {
        let mut raw = record(3, "1").into_bytes();
        raw.extend_from_slice(b"\n# \xcf\xf0\xee\xf2\xee\n\xe9 1 2\n");
        raw.extend_from_slice(record(4, "0").as_bytes());

        let parsed = parse_water(Cursor::new(raw.clone())).unwrap();
        assert_eq!(parsed.value.len(), 2);
        assert_eq!(parsed.report.len(), 1);
        assert_eq!(parsed.report.diagnostics()[0].line, Some(3));

        assert_eq!(count_valid_surfaces(Cursor::new(raw)).unwrap(), 2);
    }

    #[test]
    fn test_count_valid_surfaces() {
        let text = format!(
            "processed\n{}\n{}\n{}\n1 2 3\n",
            record(3, "0"),
            record(4, "3"),
            record(4, "9")
        );
        assert_eq!(count_valid_surfaces(Cursor::new(text)).unwrap(), 2);
    }
}
