//! Line reading for the text formats
//!
//! Map files are edited by hand with whatever code page the author's editor
//! used, so a comment or model name may hold bytes that are not UTF-8. Lines
//! are decoded lossily one at a time; only real I/O failures are errors.

use std::io::{self, BufRead};

/// Iterator over the lines of a reader, decoded with
/// [`String::from_utf8_lossy`]. Trailing `\n` and `\r\n` are removed.
#[derive(Debug)]
pub struct LossyLines<R> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                if self.buffer.last() == Some(&b'\n') {
                    self.buffer.pop();
                    if self.buffer.last() == Some(&b'\r') {
                        self.buffer.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buffer).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Extension trait adding [`lossy_lines`](Self::lossy_lines) to buffered readers
pub trait LossyLinesExt: BufRead + Sized {
    /// Iterate over lines, replacing invalid UTF-8 instead of failing
    fn lossy_lines(self) -> LossyLines<Self> {
        LossyLines {
            reader: self,
            buffer: Vec::new(),
        }
    }
}

impl<R: BufRead> LossyLinesExt for R {}
