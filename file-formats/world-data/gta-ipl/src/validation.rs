//! Naming and LOD pairing checks
//!
//! A model whose name starts with `lod` (any case) is taken to be the
//! level-of-detail proxy of the model named by the rest of the string.
//!
//! | Rule | Severity | Condition                                           |
//! |------|----------|-----------------------------------------------------|
//! | #1   | Error    | Name is longer than 24 characters                   |
//! | #2   | Error    | LOD name whose base name is not in the set          |
//! | #3   | Warning  | Base name with no LOD pointing at it                |
//! | #4   | Warning  | LOD name whose base name is not a non-LOD model     |
//!
//! Rule #2 looks at every name including other LODs, rule #4 only at non-LOD
//! names, so `lodlodtree` next to `lodtree` trips #4 but not #2.

use gta_data::{DiagnosticCode, DiagnosticReport};
use std::collections::HashSet;

use crate::types::{InstanceRecord, strip_lod_prefix};

/// Longest model name that fits the archive name field
pub const MAX_NAME_LENGTH: usize = 24;

/// Check a set of model names against the naming and LOD rules.
///
/// Names are compared case-insensitively and each distinct name is reported
/// at most once per rule, in first-seen order.
pub fn validate_names<I, S>(names: I) -> DiagnosticReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let names: Vec<String> = names
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .filter(|name| seen.insert(name.to_ascii_lowercase()))
        .collect();

    let lowered: Vec<String> = names.iter().map(|n| n.to_ascii_lowercase()).collect();
    let all: HashSet<&str> = lowered.iter().map(String::as_str).collect();
    let bases: HashSet<&str> = lowered
        .iter()
        .filter(|n| strip_lod_prefix(n).is_none())
        .map(String::as_str)
        .collect();
    let lod_targets: HashSet<&str> = lowered.iter().filter_map(|n| strip_lod_prefix(n)).collect();

    let mut report = DiagnosticReport::new();

    for (name, lower) in names.iter().zip(&lowered) {
        if name.chars().count() > MAX_NAME_LENGTH {
            report.add_error(
                DiagnosticCode::NameTooLong,
                format!("model name {} is longer than {} characters", name, MAX_NAME_LENGTH),
            );
        }

        match strip_lod_prefix(lower) {
            Some(base) => {
                if !all.contains(base) {
                    report.add_error(
                        DiagnosticCode::OrphanLod,
                        format!("LOD {} has no matching model", name),
                    );
                }
                if !bases.contains(base) {
                    report.add_warning(
                        DiagnosticCode::MalformedLodName,
                        format!("LOD {} has a malformed name", name),
                    );
                }
            }
            None => {
                if !lod_targets.contains(lower.as_str()) {
                    report.add_warning(
                        DiagnosticCode::MissingLod,
                        format!("model {} has no LOD", name),
                    );
                }
            }
        }
    }

    report
}

/// Run [`validate_names`] over the model names of `records`
pub fn validate_records(records: &[InstanceRecord]) -> DiagnosticReport {
    validate_names(records.iter().map(|r| r.model_name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn codes(report: &DiagnosticReport) -> Vec<DiagnosticCode> {
        report.diagnostics().iter().map(|d| d.code).collect()
    }

    #[test]
    fn test_paired_names_are_clean() {
        let report = validate_names(["barrel", "LODbarrel"]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_long_name() {
        let report = validate_names(["verylongmodelnamewithmorethan24chars", "lodverylongmodelnamewithmorethan24chars"]);
        assert_eq!(
            codes(&report),
            vec![DiagnosticCode::NameTooLong, DiagnosticCode::NameTooLong]
        );
        assert_eq!(report.errors().count(), 2);
    }

    #[test]
    fn test_exactly_24_characters_is_allowed() {
        let name = "a".repeat(24);
        let report = validate_names([name.clone(), format!("lod{name}")]);
        // The LOD name itself is 27 characters long
        assert_eq!(codes(&report), vec![DiagnosticCode::NameTooLong]);
        assert!(report.diagnostics()[0].message.contains("loda"));
    }

    #[test]
    fn test_orphan_lod() {
        let report = validate_names(["lodbarrel"]);
        assert_eq!(
            codes(&report),
            vec![DiagnosticCode::OrphanLod, DiagnosticCode::MalformedLodName]
        );
    }

    #[test]
    fn test_lod_of_lod_is_malformed_only() {
        let report = validate_names(["tree", "lodtree", "lodlodtree"]);
        assert_eq!(codes(&report), vec![DiagnosticCode::MalformedLodName]);
    }

    #[test]
    fn test_duplicate_names_reported_once() {
        let report = validate_names(["crate", "CRATE", "crate"]);
        assert_eq!(codes(&report), vec![DiagnosticCode::MissingLod]);
        assert_eq!(report.diagnostics()[0].to_string(), "[WARNING #3] model crate has no LOD");
    }
}
