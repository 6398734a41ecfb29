//! I/O and path utilities

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Component, Path, PathBuf};

/// Open a file for buffered reading, with the path in the error
pub fn open_reader(path: &Path) -> Result<BufReader<File>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Create a file for buffered writing, with the path in the error
pub fn create_writer(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Case-insensitive wildcard match over entry names.
///
/// `*` matches any run of characters and `?` exactly one. A pattern without
/// wildcards matches anywhere in the name.
pub fn matches_pattern(text: &str, pattern: &str) -> bool {
    let text = text.to_lowercase();
    let pattern = pattern.to_lowercase();

    if !pattern.contains(['*', '?']) {
        return text.contains(&pattern);
    }

    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    wildcard_match(&text, &pattern)
}

fn wildcard_match(text: &[char], pattern: &[char]) -> bool {
    let (mut t, mut p) = (0, 0);
    // Last `*` seen and the text position it is currently absorbing up to
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                t += 1;
                p += 1;
            }
            _ => match backtrack {
                Some((star, absorbed)) => {
                    p = star + 1;
                    t = absorbed + 1;
                    backtrack = Some((star, t));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// Path for an archive entry written under `output`.
///
/// Entry names come from the archive bytes. Anything other than a single
/// plain file name (separators, `.`, `..`, drive prefixes) yields `None`.
pub fn entry_output_path(output: &Path, name: &str) -> Option<PathBuf> {
    if name.contains(['/', '\\']) {
        return None;
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(file_name)), None) => Some(output.join(file_name)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_pattern() {
        assert!(matches_pattern("barrel.dff", "*"));
        assert!(matches_pattern("barrel.dff", "*.dff"));
        assert!(matches_pattern("Barrel.DFF", "bar*.dff"));
        assert!(!matches_pattern("barrel.txd", "*.dff"));
        assert!(matches_pattern("lodbarrel.dff", "barrel"));
        assert!(!matches_pattern("cone.dff", "lod*"));
        assert!(matches_pattern("cone1.dff", "cone?.dff"));
        assert!(!matches_pattern("cone.dff", "cone?.dff"));
        assert!(matches_pattern("lodcone_a.txd", "lod*_*.txd"));
    }

    #[test]
    fn test_entry_output_path() {
        let out = Path::new("out");
        assert_eq!(
            entry_output_path(out, "barrel.dff"),
            Some(PathBuf::from("out/barrel.dff"))
        );
        assert_eq!(entry_output_path(out, "../escaped.dff"), None);
        assert_eq!(entry_output_path(out, "..\\escaped.dff"), None);
        assert_eq!(entry_output_path(out, "/etc/passwd"), None);
        assert_eq!(entry_output_path(out, ".."), None);
        assert_eq!(entry_output_path(out, ""), None);
    }
}
