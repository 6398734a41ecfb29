//! Reader and writer for `inst` sections of IPL files
//!
//! | Column | Field      | Notes                              |
//! |--------|------------|------------------------------------|
//! | 0      | id         | Model id                           |
//! | 1      | model name |                                    |
//! | 2      | interior   | 0 for the outside world            |
//! | 3-5    | position   | X, Y, Z                            |
//! | 6-9    | rotation   | qX, qY, qZ, qW (scalar last)       |
//! | 10     | lod        | Optional, -1 when absent or empty  |

use gta_data::{Diagnostic, DiagnosticCode, DiagnosticReport, Parsed};
use std::collections::{HashMap, HashSet};
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::Result;
use crate::export::{IdGuard, IplWriteOptions};
use crate::section::{SectionLine, read_section};
use crate::types::{InstanceRecord, NO_LOD, Quaternion, strip_lod_prefix};

/// Minimum number of columns in an instance line
pub const MIN_INSTANCE_FIELDS: usize = 10;

/// Parse every `inst` section of an IPL file.
///
/// Lines with too few columns or unparsable numbers are skipped and reported.
/// Repeated ids are reported as warnings but the records are kept.
pub fn parse_ipl<R: BufRead>(reader: R) -> Result<Parsed<Vec<InstanceRecord>>> {
    let mut report = DiagnosticReport::new();
    let mut records = Vec::new();
    let mut ids = HashSet::new();

    for line in read_section(reader, "inst")? {
        let Some(record) = parse_instance(&line, &mut report) else {
            continue;
        };

        if let Some(id) = record.id
            && !ids.insert(id)
        {
            report.push(
                Diagnostic::warning(
                    DiagnosticCode::DuplicateId,
                    format!("id {} is used by more than one instance", id),
                )
                .at_line(line.number),
            );
        }

        records.push(record);
    }

    log::debug!("Parsed {} instance records", records.len());
    Ok(Parsed::new(records, report))
}

fn parse_instance(line: &SectionLine, report: &mut DiagnosticReport) -> Option<InstanceRecord> {
    let fields = line.fields();
    if fields.len() < MIN_INSTANCE_FIELDS {
        report.push(
            Diagnostic::error(
                DiagnosticCode::InsufficientFields,
                format!(
                    "expected at least {} fields, found {}",
                    MIN_INSTANCE_FIELDS,
                    fields.len()
                ),
            )
            .at_line(line.number),
        );
        return None;
    }

    let result = (|| -> std::result::Result<InstanceRecord, String> {
        let mut numbers = [0f64; 7];
        for (slot, text) in numbers.iter_mut().zip(&fields[3..10]) {
            *slot = number(text)?;
        }
        let [px, py, pz, qx, qy, qz, qw] = numbers;

        let lod_index = match fields.get(10) {
            Some(text) if !text.is_empty() => number(text)?,
            _ => NO_LOD,
        };

        Ok(InstanceRecord {
            id: Some(number(fields[0])?),
            model_name: fields[1].to_string(),
            interior: number(fields[2])?,
            position: [px, py, pz],
            rotation: Quaternion::from_file_order([qx, qy, qz, qw]),
            lod_index,
        })
    })();

    match result {
        Ok(record) => Some(record),
        Err(message) => {
            report.push(
                Diagnostic::error(DiagnosticCode::InvalidNumber, message)
                    .at_line(line.number),
            );
            None
        }
    }
}

fn number<T: FromStr>(text: &str) -> std::result::Result<T, String> {
    text.parse()
        .map_err(|_| format!("'{}' is not a valid number", text))
}

/// Write `records` as a single `inst` section.
///
/// Records without an id are skipped. When several records share an id the
/// first one is written, the others are skipped, and once the section is
/// complete and flushed [`Error::DuplicateIds`](crate::Error::DuplicateIds)
/// lists every repeated id. On success the number of written records is
/// returned.
pub fn write_ipl<W: Write>(
    writer: &mut W,
    records: &[InstanceRecord],
    options: &IplWriteOptions,
) -> Result<usize> {
    let lod_ids = if options.lod_autosearch {
        lod_lookup(records)
    } else {
        HashMap::new()
    };

    let mut guard = IdGuard::default();
    writeln!(writer, "inst")?;

    for record in records {
        let Some(id) = record.id else {
            log::debug!("Skipping '{}' without id", record.model_name);
            continue;
        };
        if !guard.admit(id) {
            continue;
        }

        let lod_index = lod_ids
            .get(&record.model_name.to_ascii_lowercase())
            .copied()
            .unwrap_or(record.lod_index);

        let [px, py, pz] = record.position;
        let [qx, qy, qz, qw] = record.rotation.to_file_order();
        writeln!(
            writer,
            "{}, {}, {}, {:.6}, {:.6}, {:.6}, {:.6}, {:.6}, {:.6}, {:.6}, {}",
            id, record.model_name, record.interior, px, py, pz, qx, qy, qz, qw, lod_index
        )?;
    }

    writeln!(writer, "end")?;
    writer.flush()?;

    guard.finish()
}

/// Map each LOD's lower-cased base name to the LOD's id (or -1 without one)
fn lod_lookup(records: &[InstanceRecord]) -> HashMap<String, i32> {
    records
        .iter()
        .filter_map(|record| {
            let base = strip_lod_prefix(&record.model_name)?;
            Some((base.to_ascii_lowercase(), record.id.unwrap_or(NO_LOD)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn write_to_string(records: &[InstanceRecord], options: &IplWriteOptions) -> (String, Result<usize>) {
        let mut out = Vec::new();
        let result = write_ipl(&mut out, records, options);
        (String::from_utf8(out).unwrap(), result)
    }

    #[test]
    fn test_parse_basic_line() {
        let text = "inst\n1337, barrel, 0, 1.5, -2.0, 3.25, 0, 0, 0.7071, 0.7071, 12\nend\n";
        let parsed = parse_ipl(Cursor::new(text)).unwrap();

        assert!(parsed.report.is_clean());
        let record = &parsed.value[0];
        assert_eq!(record.id, Some(1337));
        assert_eq!(record.model_name, "barrel");
        assert_eq!(record.position, [1.5, -2.0, 3.25]);
        assert_eq!(record.rotation, Quaternion::new(0.7071, 0.0, 0.0, 0.7071));
        assert_eq!(record.lod_index, 12);
    }

    #[test]
    fn test_parse_missing_and_empty_lod() {
        let text = "inst\n1, a, 0, 0, 0, 0, 0, 0, 0, 1\n2, b, 0, 0, 0, 0, 0, 0, 0, 1,\nend\n";
        let parsed = parse_ipl(Cursor::new(text)).unwrap();

        let lods: Vec<_> = parsed.value.iter().map(|r| r.lod_index).collect();
        assert_eq!(lods, vec![NO_LOD, NO_LOD]);
    }

    #[test]
    fn test_parse_skips_bad_lines() {
        let text = "inst\n1, a, 0, 0, 0\n2, b, 0, x, 0, 0, 0, 0, 0, 1\n3, c, 0, 0, 0, 0, 0, 0, 0, 1\nend\n";
        let parsed = parse_ipl(Cursor::new(text)).unwrap();

        assert_eq!(parsed.value.len(), 1);
        assert_eq!(parsed.value[0].id, Some(3));
        let codes: Vec<_> = parsed.report.diagnostics().iter().map(|d| (d.code, d.line)).collect();
        assert_eq!(
            codes,
            vec![
                (DiagnosticCode::InsufficientFields, Some(2)),
                (DiagnosticCode::InvalidNumber, Some(3)),
            ]
        );
    }

    #[test]
    fn test_parse_survives_non_utf8_bytes() {
        let raw = b"inst\n1, barrel, 0, 0, 0, 0, 0, 0, 0, 1\n# \xcf\xf0\xee\xef\n2, caf\xe9, 0, 0, 0, 0, 0, 0, 0, 1\nend\n";
        let parsed = parse_ipl(Cursor::new(raw.to_vec())).unwrap();

        assert!(parsed.report.is_empty());
        assert_eq!(parsed.value.len(), 2);
        assert_eq!(parsed.value[1].id, Some(2));
        assert_eq!(parsed.value[1].model_name, "caf\u{FFFD}");
    }

    #[test]
    fn test_parse_reports_duplicate_ids() {
        let text = "inst\n5, a, 0, 0, 0, 0, 0, 0, 0, 1\n5, b, 0, 0, 0, 0, 0, 0, 0, 1\nend\n";
        let parsed = parse_ipl(Cursor::new(text)).unwrap();

        assert_eq!(parsed.value.len(), 2);
        assert!(parsed.report.is_valid());
        assert!(parsed.report.contains(DiagnosticCode::DuplicateId));
    }

    #[test]
    fn test_write_line_format() {
        let mut record = InstanceRecord::new(7, "barrel");
        record.position = [1.0, 2.5, -3.0];
        record.rotation = Quaternion::new(0.5, 0.1, 0.2, 0.3);

        let (text, result) = write_to_string(&[record], &IplWriteOptions::default());
        assert_eq!(result.unwrap(), 1);
        assert_eq!(
            text,
            "inst\n7, barrel, 0, 1.000000, 2.500000, -3.000000, 0.100000, 0.200000, 0.300000, 0.500000, -1\nend\n"
        );
    }

    #[test]
    fn test_write_skips_records_without_id() {
        let mut anonymous = InstanceRecord::new(0, "ghost");
        anonymous.id = None;

        let (text, result) =
            write_to_string(&[anonymous, InstanceRecord::new(1, "real")], &IplWriteOptions::default());
        assert_eq!(result.unwrap(), 1);
        assert!(!text.contains("ghost"));
    }

    #[test]
    fn test_write_then_fail_on_duplicates() {
        let records = vec![
            InstanceRecord::new(5, "first"),
            InstanceRecord::new(6, "other"),
            InstanceRecord::new(5, "second"),
        ];
        let (text, result) = write_to_string(&records, &IplWriteOptions::default());

        assert!(matches!(result, Err(Error::DuplicateIds(ref ids)) if ids == &vec![5]));
        assert!(text.contains("5, first"));
        assert!(text.contains("6, other"));
        assert!(!text.contains("second"));
        assert!(text.ends_with("end\n"));
    }

    #[test]
    fn test_lod_autosearch() {
        let mut base = InstanceRecord::new(10, "Barrel");
        base.lod_index = 99;
        let lod = InstanceRecord::new(11, "LODbarrel");
        let unrelated = InstanceRecord::new(12, "crate");

        let records = vec![base, lod, unrelated];
        let options = IplWriteOptions { lod_autosearch: true };
        let (text, _) = write_to_string(&records, &options);
        let lines: Vec<_> = text.lines().collect();

        assert!(lines[1].ends_with(", 11"));
        assert!(lines[3].ends_with(", -1"));

        let (text, _) = write_to_string(&records, &IplWriteOptions::default());
        assert!(text.lines().nth(1).unwrap().ends_with(", 99"));
    }
}
