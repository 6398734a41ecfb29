//! Formatting utilities

use console::style;
use gta_data::{DiagnosticReport, Severity};
use humansize::{DECIMAL, format_size};

/// Format file size in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Format a world position with two decimals
pub fn format_position(position: [f64; 3]) -> String {
    format!("{:.2}, {:.2}, {:.2}", position[0], position[1], position[2])
}

/// Print every diagnostic of a report, errors in red and warnings in yellow
pub fn print_report(report: &DiagnosticReport) {
    for diagnostic in report.diagnostics() {
        let line = diagnostic.to_string();
        match diagnostic.severity {
            Severity::Error => println!("{}", style(line).red()),
            Severity::Warning => println!("{}", style(line).yellow()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(2048), "2.05 kB");
        assert_eq!(format_bytes(1048576), "1.05 MB");
    }

    #[test]
    fn test_format_position() {
        assert_eq!(format_position([1.0, -2.556, 300.0]), "1.00, -2.56, 300.00");
    }
}
