//! Reader and writer for `objs` sections of IDE files

use gta_data::{Diagnostic, DiagnosticCode, DiagnosticReport, Parsed};
use std::collections::HashSet;
use std::io::{BufRead, Write};

use crate::error::Result;
use crate::export::IdGuard;
use crate::section::{SectionLine, read_section};
use crate::types::IdeRecord;

/// Number of columns in an object definition line
pub const IDE_FIELDS: usize = 5;

/// Parse every `objs` section of an IDE file.
///
/// Only the five-column layout `id, model, txd, distance, flags` is
/// understood; other layouts are skipped with a diagnostic.
pub fn parse_ide<R: BufRead>(reader: R) -> Result<Parsed<Vec<IdeRecord>>> {
    let mut report = DiagnosticReport::new();
    let mut records = Vec::new();
    let mut ids = HashSet::new();

    for line in read_section(reader, "objs")? {
        let Some(record) = parse_definition(&line, &mut report) else {
            continue;
        };

        if let Some(id) = record.id
            && !ids.insert(id)
        {
            report.push(
                Diagnostic::warning(
                    DiagnosticCode::DuplicateId,
                    format!("id {} is defined more than once", id),
                )
                .at_line(line.number),
            );
        }

        records.push(record);
    }

    log::debug!("Parsed {} object definitions", records.len());
    Ok(Parsed::new(records, report))
}

fn parse_definition(line: &SectionLine, report: &mut DiagnosticReport) -> Option<IdeRecord> {
    let fields = line.fields();
    if fields.len() != IDE_FIELDS {
        let code = if fields.len() < IDE_FIELDS {
            DiagnosticCode::InsufficientFields
        } else {
            DiagnosticCode::UnexpectedFieldCount
        };
        report.push(
            Diagnostic::error(
                code,
                format!("expected {} fields, found {}", IDE_FIELDS, fields.len()),
            )
            .at_line(line.number),
        );
        return None;
    }

    let id = fields[0].parse::<i32>();
    let draw_distance = fields[3].parse::<f64>();
    let flags = fields[4].parse::<u32>();

    match (id, draw_distance, flags) {
        (Ok(id), Ok(draw_distance), Ok(flags)) => Some(IdeRecord {
            id: Some(id),
            model_name: fields[1].to_string(),
            texture_set: Some(fields[2].to_string()),
            draw_distance,
            flags,
        }),
        _ => {
            report.push(
                Diagnostic::error(
                    DiagnosticCode::InvalidNumber,
                    format!("'{}' has a non-numeric id, distance or flags column", line.text),
                )
                .at_line(line.number),
            );
            None
        }
    }
}

/// Write `records` as a single `objs` section.
///
/// Follows the same id rules as [`write_ipl`](crate::write_ipl): records
/// without an id are skipped and repeated ids fail the call after the
/// section has been written.
pub fn write_ide<W: Write>(writer: &mut W, records: &[IdeRecord]) -> Result<usize> {
    let mut guard = IdGuard::default();
    writeln!(writer, "objs")?;

    for record in records {
        let Some(id) = record.id else {
            log::debug!("Skipping definition '{}' without id", record.model_name);
            continue;
        };
        if !guard.admit(id) {
            continue;
        }

        writeln!(
            writer,
            "{}, {}, {}, {:.1}, {}",
            id,
            record.model_name,
            record.texture_set_name(),
            record.draw_distance,
            record.flags
        )?;
    }

    writeln!(writer, "end")?;
    writer.flush()?;

    guard.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_write_defaults() {
        let mut out = Vec::new();
        let written = write_ide(&mut out, &[IdeRecord::new(18000, "barrel")]).unwrap();

        assert_eq!(written, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "objs\n18000, barrel, barrel_tex, 300.0, 0\nend\n"
        );
    }

    #[test]
    fn test_write_duplicate_ids() {
        let records = vec![
            IdeRecord::new(1, "a"),
            IdeRecord::new(1, "b"),
            IdeRecord::new(2, "c"),
        ];
        let mut out = Vec::new();
        let err = write_ide(&mut out, &records).unwrap_err();

        assert!(matches!(err, Error::DuplicateIds(ids) if ids == vec![1]));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("2, c, c_tex"));
        assert!(!text.contains("1, b"));
    }

    #[test]
    fn test_parse_definitions() {
        let text = "objs\n100, barrel, props, 150.0, 4\n101, cone, props\n102, lamp, props, far, 0\nend\n";
        let parsed = parse_ide(Cursor::new(text)).unwrap();

        assert_eq!(parsed.value.len(), 1);
        assert_eq!(parsed.value[0].texture_set_name(), "props");
        assert_eq!(parsed.value[0].draw_distance, 150.0);
        assert_eq!(parsed.value[0].flags, 4);
        assert!(parsed.report.contains(DiagnosticCode::InsufficientFields));
        assert!(parsed.report.contains(DiagnosticCode::InvalidNumber));
    }
}
