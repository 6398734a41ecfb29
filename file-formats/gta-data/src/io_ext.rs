//! Fixed-width name field helpers

use std::io::{Read, Write};

use crate::error::{DataError, Result};

/// Decode a NUL-padded ASCII name field.
///
/// Decoding stops at the first NUL byte; anything after it is padding or
/// leftover garbage from the tool that wrote the field. The result is
/// lower-cased so lookups can be case-insensitive.
///
/// # Examples
///
/// ```
/// use gta_data::io_ext::decode_fixed_name;
///
/// let mut field = [0u8; 24];
/// field[..10].copy_from_slice(b"Barrel.DFF");
/// assert_eq!(decode_fixed_name(&field), "barrel.dff");
/// ```
pub fn decode_fixed_name(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).to_ascii_lowercase()
}

/// Encode `name` into a NUL-padded field of exactly `capacity` bytes
pub fn encode_fixed_name(name: &str, capacity: usize) -> Result<Vec<u8>> {
    if !name.is_ascii() {
        return Err(DataError::NonAsciiName(name.to_string()));
    }

    let bytes = name.as_bytes();
    if bytes.len() > capacity {
        return Err(DataError::NameTooLong {
            name: name.to_string(),
            length: bytes.len(),
            capacity,
        });
    }

    let mut field = vec![0u8; capacity];
    field[..bytes.len()].copy_from_slice(bytes);
    Ok(field)
}

/// Extension trait for reading fixed-width name fields
pub trait ReadNameExt: Read {
    /// Read a fixed-width name field of `capacity` bytes
    fn read_fixed_name(&mut self, capacity: usize) -> std::io::Result<String> {
        let mut field = vec![0u8; capacity];
        self.read_exact(&mut field)?;
        Ok(decode_fixed_name(&field))
    }
}

/// Extension trait for writing fixed-width name fields
pub trait WriteNameExt: Write {
    /// Write `name` as a fixed-width NUL-padded field
    fn write_fixed_name(&mut self, name: &str, capacity: usize) -> Result<()> {
        let field = encode_fixed_name(name, capacity)?;
        self.write_all(&field)?;
        Ok(())
    }
}

impl<R: Read + ?Sized> ReadNameExt for R {}
impl<W: Write + ?Sized> WriteNameExt for W {}
