//! Section scanning shared by the IPL and IDE readers
//!
//! Both formats wrap their records in a keyword line (`inst`, `objs`, ...)
//! and a closing `end` line. Keywords are matched case-insensitively.

use gta_data::LossyLinesExt;
use std::io::BufRead;

use crate::error::Result;

/// A record line inside a section
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SectionLine {
    /// 1-based line number in the source
    pub number: usize,
    /// Trimmed line text
    pub text: String,
}

impl SectionLine {
    /// Comma-split fields with surrounding whitespace removed
    pub fn fields(&self) -> Vec<&str> {
        self.text.split(',').map(str::trim).collect()
    }
}

/// Collect the record lines of every `keyword` section in `reader`.
///
/// Blank lines and lines containing `#` are skipped. Lines outside a matching
/// section are ignored, as are other sections.
pub(crate) fn read_section<R: BufRead>(reader: R, keyword: &str) -> Result<Vec<SectionLine>> {
    let mut lines = Vec::new();
    let mut inside = false;
    let mut sections = 0usize;

    for (index, line) in reader.lossy_lines().enumerate() {
        let line = line?;
        let text = line.trim();

        if text.is_empty() || text.contains('#') {
            continue;
        }

        if !inside {
            if text.eq_ignore_ascii_case(keyword) {
                inside = true;
                sections += 1;
            }
            continue;
        }

        if text.eq_ignore_ascii_case("end") {
            inside = false;
            continue;
        }

        lines.push(SectionLine {
            number: index + 1,
            text: text.to_string(),
        });
    }

    log::debug!(
        "Found {} '{}' section(s) with {} record line(s)",
        sections,
        keyword,
        lines.len()
    );

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_reads_only_matching_section() {
        let text = "cars\n1, a\nend\nINST\n\n# note\n2, b # trailing\n3 , c\nEnd\n4, d\n";
        let lines = read_section(Cursor::new(text), "inst").unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].number, 8);
        assert_eq!(lines[0].fields(), vec!["3", "c"]);
    }

    #[test]
    fn test_non_utf8_comment_is_skipped() {
        let raw = b"inst\n1, a\n# \xcf\xf0\xee\xef\n2, b\nend\n".to_vec();
        let lines = read_section(Cursor::new(raw), "inst").unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].number, 4);
        assert_eq!(lines[1].fields(), vec!["2", "b"]);
    }

    #[test]
    fn test_unterminated_section_keeps_lines() {
        let lines = read_section(Cursor::new("objs\n1, a\n"), "objs").unwrap();
        assert_eq!(lines.len(), 1);
    }
}
