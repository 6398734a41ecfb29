//! Payload extraction by resource name

use std::io::{Read, Seek, SeekFrom};

use crate::error::{Error, Result};
use crate::index::{ArchiveIndex, IndexEntry, ResourceKind};

/// Read the payload of `name` from `reader`.
///
/// The lookup tries the bare lower-case name first, then the name with the
/// extension of `kind` appended. `Ok(None)` means no such entry exists. A
/// payload that ends early is reported as [`Error::ShortRead`]; nothing is
/// ever truncated silently.
///
/// Every call seeks before reading, so concurrent callers sharing one
/// handle need external synchronisation.
pub fn extract<R: Read + Seek>(
    index: &ArchiveIndex,
    reader: &mut R,
    name: &str,
    kind: ResourceKind,
) -> Result<Option<Vec<u8>>> {
    let Some(entry) = index.resolve(name, kind) else {
        log::debug!("'{name}' not found in archive index");
        return Ok(None);
    };

    read_entry(reader, entry).map(Some)
}

/// Read exactly the sector range covered by `entry`
pub fn read_entry<R: Read + Seek>(reader: &mut R, entry: &IndexEntry) -> Result<Vec<u8>> {
    let offset = entry.byte_offset();
    let length = entry.byte_length();
    log::debug!(
        "Extracting '{}' ({} bytes at offset {})",
        entry.name,
        length,
        offset
    );

    reader.seek(SeekFrom::Start(offset))?;

    // Sized by the bytes present, not by the entry's claimed length
    let mut buffer = Vec::new();
    reader.by_ref().take(length).read_to_end(&mut buffer)?;

    if buffer.len() as u64 != length {
        return Err(Error::ShortRead {
            name: entry.name.clone(),
            offset,
            expected: length,
        });
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{IndexEntry, SECTOR_SIZE};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn archive() -> (ArchiveIndex, Cursor<Vec<u8>>) {
        let index = ArchiveIndex::from_entries([
            IndexEntry::new("barrel.dff", 0, 1),
            IndexEntry::new("barrel.txd", 1, 2),
        ])
        .value;

        let mut payload = vec![0xAAu8; SECTOR_SIZE as usize];
        payload.extend(vec![0xBBu8; 2 * SECTOR_SIZE as usize]);
        (index, Cursor::new(payload))
    }

    #[test]
    fn test_extract_by_kind() {
        let (index, mut reader) = archive();

        let model = extract(&index, &mut reader, "barrel", ResourceKind::Model)
            .unwrap()
            .unwrap();
        assert_eq!(model.len(), 2048);
        assert!(model.iter().all(|&b| b == 0xAA));

        let texture = extract(&index, &mut reader, "BARREL", ResourceKind::Texture)
            .unwrap()
            .unwrap();
        assert_eq!(texture.len(), 4096);
        assert!(texture.iter().all(|&b| b == 0xBB));
    }

    #[test]
    fn test_missing_name_is_none() {
        let (index, mut reader) = archive();
        let result = extract(&index, &mut reader, "crate", ResourceKind::Model).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_short_read_is_an_error() {
        let index = ArchiveIndex::from_entries([IndexEntry::new("big.dff", 0, 4)]).value;
        let mut reader = Cursor::new(vec![0u8; 3000]);

        let err = extract(&index, &mut reader, "big", ResourceKind::Model).unwrap_err();
        assert!(matches!(
            err,
            Error::ShortRead {
                offset: 0,
                expected: 8192,
                ..
            }
        ));
    }

    #[test]
    fn test_oversized_entry_is_short_read() {
        let index = ArchiveIndex::from_entries([IndexEntry::new("big.dff", 1, u32::MAX)]).value;
        let mut reader = Cursor::new(vec![0u8; 3 * SECTOR_SIZE as usize]);

        let err = extract(&index, &mut reader, "big", ResourceKind::Model).unwrap_err();
        assert!(matches!(
            err,
            Error::ShortRead { offset: 2048, expected, .. } if expected == u64::from(u32::MAX) * 2048
        ));
    }

    #[test]
    fn test_repeated_extraction_rereads() {
        let (index, mut reader) = archive();
        let first = extract(&index, &mut reader, "barrel", ResourceKind::Model).unwrap();
        let second = extract(&index, &mut reader, "barrel", ResourceKind::Model).unwrap();
        assert_eq!(first, second);
    }
}
