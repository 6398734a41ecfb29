//! Structured diagnostics shared by every codec.
//!
//! A diagnostic is produced once and never mutated afterwards. Codecs push
//! them into a [`DiagnosticReport`] while they keep processing the remaining
//! records, so a host can decide whether to log, display or block on them.

use std::fmt;

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Suspicious but usable data
    Warning,
    /// Data that was rejected or cannot be used as-is
    Error,
}

impl Severity {
    /// Upper-case label used in rendered diagnostics
    pub fn label(self) -> &'static str {
        match self {
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Machine-readable diagnostic kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticCode {
    /// Model name longer than the 24-byte archive name field
    NameTooLong,
    /// `lod`-prefixed name without its base model
    OrphanLod,
    /// Base model without a `lod`-prefixed counterpart
    MissingLod,
    /// `lod`-prefixed name whose stripped form matches no base model
    MalformedLodName,

    /// Archive header magic is not recognised
    UnsupportedArchive,
    /// Two archive index entries share a name
    DuplicateEntryName,

    /// A text record has fewer fields than required
    InsufficientFields,
    /// A text record has a field count that matches no known layout
    UnexpectedFieldCount,
    /// A field could not be converted to a number
    InvalidNumber,
    /// An enumerated flag is outside its allowed range
    InvalidFlag,
    /// Two records share the same id
    DuplicateId,

    /// No usable geometry was decoded
    NoGeometry,
    /// A triangle references a vertex that does not exist
    IndexOutOfBounds,
    /// A triangle has coincident corners
    DegenerateTriangle,
    /// A triangle references a material that does not exist
    MissingMaterial,
    /// A material has neither texture nor colour
    EmptyMaterial,
    /// A UV layer does not cover every vertex
    UvLayerMismatch,
    /// A texture dictionary could not be found or decoded
    MissingTexture,
}

impl DiagnosticCode {
    /// The numbered identifier used by the naming rules, if any
    pub fn number(self) -> Option<u8> {
        match self {
            Self::NameTooLong => Some(1),
            Self::OrphanLod => Some(2),
            Self::MissingLod => Some(3),
            Self::MalformedLodName => Some(4),
            _ => None,
        }
    }

    /// Stable kebab-case identifier
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NameTooLong => "name-too-long",
            Self::OrphanLod => "orphan-lod",
            Self::MissingLod => "missing-lod",
            Self::MalformedLodName => "malformed-lod-name",
            Self::UnsupportedArchive => "unsupported-archive",
            Self::DuplicateEntryName => "duplicate-entry-name",
            Self::InsufficientFields => "insufficient-fields",
            Self::UnexpectedFieldCount => "unexpected-field-count",
            Self::InvalidNumber => "invalid-number",
            Self::InvalidFlag => "invalid-flag",
            Self::DuplicateId => "duplicate-id",
            Self::NoGeometry => "no-geometry",
            Self::IndexOutOfBounds => "index-out-of-bounds",
            Self::DegenerateTriangle => "degenerate-triangle",
            Self::MissingMaterial => "missing-material",
            Self::EmptyMaterial => "empty-material",
            Self::UvLayerMismatch => "uv-layer-mismatch",
            Self::MissingTexture => "missing-texture",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number() {
            Some(n) => write!(f, "#{n}"),
            None => f.write_str(self.as_str()),
        }
    }
}

/// A single reported problem
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// Severity of the problem
    pub severity: Severity,
    /// Kind of the problem
    pub code: DiagnosticCode,
    /// Human readable description
    pub message: String,
    /// 1-based source line, for text formats
    pub line: Option<usize>,
}

impl Diagnostic {
    /// Create an error-level diagnostic
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            line: None,
        }
    }

    /// Create a warning-level diagnostic
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            line: None,
        }
    }

    /// Attach a 1-based source line
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Whether this is an error-level diagnostic
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}] ", self.severity, self.code)?;
        if let Some(line) = self.line {
            write!(f, "line {line}: ")?;
        }
        f.write_str(&self.message)
    }
}

/// Ordered collection of diagnostics produced by one operation
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagnosticReport {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic, logging it as a warning
    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// Record an error-level diagnostic
    pub fn add_error(&mut self, code: DiagnosticCode, message: impl Into<String>) {
        self.push(Diagnostic::error(code, message));
    }

    /// Record a warning-level diagnostic
    pub fn add_warning(&mut self, code: DiagnosticCode, message: impl Into<String>) {
        self.push(Diagnostic::warning(code, message));
    }

    /// Move every diagnostic of `other` into this report
    pub fn extend(&mut self, other: DiagnosticReport) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// All diagnostics in the order they were recorded
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Iterate over error-level diagnostics
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error)
    }

    /// Iterate over warning-level diagnostics
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning)
    }

    /// Whether any diagnostic with `code` was recorded
    pub fn contains(&self, code: DiagnosticCode) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    /// Number of recorded diagnostics
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// No error-level diagnostics were recorded
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Neither errors nor warnings were recorded
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Consume the report and return the diagnostics
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Format the report as a multi-line summary
    pub fn format(&self) -> String {
        let error_count = self.errors().count();
        let warning_count = self.warnings().count();

        let mut result = if error_count == 0 {
            let mut header = String::from("Validation passed");
            if warning_count > 0 {
                header.push_str(" with warnings");
            }
            header.push_str(".\n");
            header
        } else {
            format!("Validation failed with {error_count} errors.\n")
        };

        for (i, diagnostic) in self.diagnostics.iter().enumerate() {
            result.push_str(&format!("  {}. {}\n", i + 1, diagnostic));
        }

        result
    }
}

impl From<Vec<Diagnostic>> for DiagnosticReport {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

impl IntoIterator for DiagnosticReport {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

/// A decoded value together with the diagnostics collected while decoding it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parsed<T> {
    /// The successfully decoded data
    pub value: T,
    /// Problems found along the way
    pub report: DiagnosticReport,
}

impl<T> Parsed<T> {
    /// Wrap a value with an existing report
    pub fn new(value: T, report: DiagnosticReport) -> Self {
        Self { value, report }
    }

    /// Wrap a value without diagnostics
    pub fn clean(value: T) -> Self {
        Self {
            value,
            report: DiagnosticReport::new(),
        }
    }

    /// Transform the value, keeping the diagnostics
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            report: self.report,
        }
    }

    /// Split into value and report
    pub fn into_parts(self) -> (T, DiagnosticReport) {
        (self.value, self.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_numbered_display() {
        let diagnostic = Diagnostic::error(DiagnosticCode::NameTooLong, "name is too long");
        assert_eq!(diagnostic.to_string(), "[ERROR #1] name is too long");
    }

    #[test]
    fn test_line_display() {
        let diagnostic =
            Diagnostic::warning(DiagnosticCode::InvalidNumber, "bad float 'x'").at_line(12);
        assert_eq!(
            diagnostic.to_string(),
            "[WARNING invalid-number] line 12: bad float 'x'"
        );
    }

    #[test]
    fn test_report_counts() {
        let mut report = DiagnosticReport::new();
        assert!(report.is_clean());

        report.add_warning(DiagnosticCode::MissingLod, "no lod");
        assert!(report.is_valid());
        assert!(!report.is_clean());

        report.add_error(DiagnosticCode::OrphanLod, "orphan");
        assert!(!report.is_valid());
        assert_eq!(report.errors().count(), 1);
        assert_eq!(report.warnings().count(), 1);
        assert!(report.contains(DiagnosticCode::OrphanLod));
        assert!(!report.contains(DiagnosticCode::NameTooLong));
    }

    #[test]
    fn test_report_format() {
        let mut report = DiagnosticReport::new();
        report.add_warning(DiagnosticCode::MissingLod, "Model barrel has no LOD");
        let text = report.format();
        assert!(text.starts_with("Validation passed with warnings."));
        assert!(text.contains("1. [WARNING #3] Model barrel has no LOD"));
    }

    #[test]
    fn test_parsed_map() {
        let mut report = DiagnosticReport::new();
        report.add_warning(DiagnosticCode::DuplicateId, "dup");
        let parsed = Parsed::new(vec![1, 2, 3], report).map(|v| v.len());
        assert_eq!(parsed.value, 3);
        assert_eq!(parsed.report.len(), 1);
    }
}
