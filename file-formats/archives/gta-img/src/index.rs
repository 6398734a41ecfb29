//! Archive index: the name to sector-range table of an IMG archive.
//!
//! Both archive variants share the same 32-byte entry layout:
//!
//! ```text
//! Offset | Size | Field  | Description
//! -------|------|--------|------------------------------------------
//! 0x00   |  4   | offset | Start of the payload, in 2048-byte sectors
//! 0x04   |  4   | size   | Payload length, in 2048-byte sectors
//! 0x08   | 24   | name   | ASCII name, NUL padded
//! ```
//!
//! Variant 1 keeps these records in a separate `.dir` stream. Variant 2
//! prefixes the archive itself with `"VER2"` and a `u32` entry count,
//! followed directly by the records.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use gta_data::io_ext::{ReadNameExt, WriteNameExt};
use gta_data::{DiagnosticCode, DiagnosticReport, Parsed};
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Read, Write};

use crate::error::{Error, Result};

/// Size of one addressing unit in bytes
pub const SECTOR_SIZE: u64 = 2048;

/// Size of one index record in bytes
pub const ENTRY_SIZE: usize = 32;

/// Capacity of the name field in bytes
pub const NAME_LENGTH: usize = 24;

/// Magic that opens a variant 2 archive
pub const VER2_MAGIC: [u8; 4] = *b"VER2";

/// On-disk archive layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImgVersion {
    /// Separate `.dir` index stream next to the payload stream
    V1,
    /// Index embedded at the start of the archive after a `VER2` header
    V2,
}

impl fmt::Display for ImgVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => write!(f, "v1 (split .dir index)"),
            Self::V2 => write!(f, "v2 (embedded VER2 index)"),
        }
    }
}

/// Which kind of payload a lookup is after
///
/// One archive may hold both a model and a texture dictionary under the same
/// base name, so the caller decides which suffix to try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A `.dff` model
    Model,
    /// A `.txd` texture dictionary
    Texture,
}

impl ResourceKind {
    /// File extension including the dot
    pub fn extension(self) -> &'static str {
        match self {
            Self::Model => ".dff",
            Self::Texture => ".txd",
        }
    }
}

/// A single archive index record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Lower-case name as stored in the archive
    pub name: String,
    /// Start of the payload in sectors
    pub offset_sectors: u32,
    /// Length of the payload in sectors
    pub size_sectors: u32,
}

impl IndexEntry {
    /// Create an entry from sector-addressed values
    pub fn new(name: impl Into<String>, offset_sectors: u32, size_sectors: u32) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            offset_sectors,
            size_sectors,
        }
    }

    /// Byte offset of the payload
    pub fn byte_offset(&self) -> u64 {
        u64::from(self.offset_sectors) * SECTOR_SIZE
    }

    /// Byte length of the payload
    pub fn byte_length(&self) -> u64 {
        u64::from(self.size_sectors) * SECTOR_SIZE
    }

    fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        let offset_sectors = reader.read_u32::<LittleEndian>()?;
        let size_sectors = reader.read_u32::<LittleEndian>()?;
        let name = reader.read_fixed_name(NAME_LENGTH)?;
        Ok(Self {
            name,
            offset_sectors,
            size_sectors,
        })
    }

    fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(self.offset_sectors)?;
        writer.write_u32::<LittleEndian>(self.size_sectors)?;
        writer.write_fixed_name(&self.name, NAME_LENGTH)?;
        Ok(())
    }
}

/// In-memory name to sector-range table
#[derive(Debug, Clone, Default)]
pub struct ArchiveIndex {
    entries: Vec<IndexEntry>,
    lookup: HashMap<String, usize>,
}

impl ArchiveIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from entries, keeping the first entry of any repeated name
    pub fn from_entries(entries: impl IntoIterator<Item = IndexEntry>) -> Parsed<Self> {
        let mut index = Self::new();
        let mut report = DiagnosticReport::new();
        for entry in entries {
            index.insert(entry, &mut report);
        }
        Parsed::new(index, report)
    }

    /// Read a variant 1 directory stream until it is exhausted
    pub fn read_directory<R: Read>(reader: &mut R) -> Result<Parsed<Self>> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;

        if raw.len() % ENTRY_SIZE != 0 {
            return Err(Error::TruncatedDirectory {
                length: raw.len() as u64,
                record_size: ENTRY_SIZE,
            });
        }

        let count = raw.len() / ENTRY_SIZE;
        log::debug!("Reading {count} directory entries");

        let mut cursor = io::Cursor::new(raw);
        let mut index = Self::new();
        let mut report = DiagnosticReport::new();
        for _ in 0..count {
            let entry = IndexEntry::read(&mut cursor)?;
            log::trace!(
                "entry '{}' at sector {} ({} sectors)",
                entry.name,
                entry.offset_sectors,
                entry.size_sectors
            );
            index.insert(entry, &mut report);
        }

        Ok(Parsed::new(index, report))
    }

    /// Read the `VER2` header and embedded records from the start of an archive.
    ///
    /// A missing or different magic does not fail the call: the result is an
    /// empty index with a single [`DiagnosticCode::UnsupportedArchive`]
    /// diagnostic.
    pub fn read_embedded<R: Read>(reader: &mut R) -> Result<Parsed<Self>> {
        let mut report = DiagnosticReport::new();

        let mut magic = [0u8; 4];
        match reader.read_exact(&mut magic) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                report.add_error(
                    DiagnosticCode::UnsupportedArchive,
                    "Archive is too short to hold a VER2 header",
                );
                return Ok(Parsed::new(Self::new(), report));
            }
            Err(e) => return Err(Error::Io(e)),
        }

        if magic != VER2_MAGIC {
            report.add_error(
                DiagnosticCode::UnsupportedArchive,
                format!(
                    "Unsupported or corrupt archive: expected magic 'VER2', found '{}'",
                    String::from_utf8_lossy(&magic)
                ),
            );
            return Ok(Parsed::new(Self::new(), report));
        }

        let declared = reader.read_u32::<LittleEndian>()?;
        log::debug!("VER2 archive declares {declared} entries");

        let mut index = Self::new();
        for read in 0..declared {
            let entry = match IndexEntry::read(reader) {
                Ok(entry) => entry,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(Error::TruncatedIndex { declared, read });
                }
                Err(e) => return Err(Error::Io(e)),
            };
            log::trace!(
                "entry '{}' at sector {} ({} sectors)",
                entry.name,
                entry.offset_sectors,
                entry.size_sectors
            );
            index.insert(entry, &mut report);
        }

        Ok(Parsed::new(index, report))
    }

    /// Write the index as a variant 1 directory stream
    pub fn write_directory<W: Write>(&self, writer: &mut W) -> Result<()> {
        for entry in &self.entries {
            entry.write(writer)?;
        }
        Ok(())
    }

    /// Write the `VER2` header followed by the embedded records
    pub fn write_embedded<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&VER2_MAGIC)?;
        writer.write_u32::<LittleEndian>(self.entries.len() as u32)?;
        self.write_directory(writer)
    }

    fn insert(&mut self, entry: IndexEntry, report: &mut DiagnosticReport) {
        if self.lookup.contains_key(&entry.name) {
            report.add_warning(
                DiagnosticCode::DuplicateEntryName,
                format!(
                    "Duplicate archive entry '{}' at sector {}, keeping the first one",
                    entry.name, entry.offset_sectors
                ),
            );
            return;
        }
        self.lookup.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
    }

    /// Look up an entry by its exact name, ignoring case
    pub fn get(&self, name: &str) -> Option<&IndexEntry> {
        self.lookup
            .get(&name.to_ascii_lowercase())
            .map(|&i| &self.entries[i])
    }

    /// Look up a resource by bare name, then by name plus the kind's extension
    pub fn resolve(&self, name: &str, kind: ResourceKind) -> Option<&IndexEntry> {
        self.get(name)
            .or_else(|| self.get(&format!("{name}{}", kind.extension())))
    }

    /// Entries in archive order
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn record(offset: u32, size: u32, name: &str) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(ENTRY_SIZE);
        bytes.extend_from_slice(&offset.to_le_bytes());
        bytes.extend_from_slice(&size.to_le_bytes());
        let mut field = [0u8; NAME_LENGTH];
        field[..name.len()].copy_from_slice(name.as_bytes());
        bytes.extend_from_slice(&field);
        bytes
    }

    #[test]
    fn test_entry_byte_range() {
        let entry = IndexEntry::new("Barrel.DFF", 3, 2);
        assert_eq!(entry.name, "barrel.dff");
        assert_eq!(entry.byte_offset(), 6144);
        assert_eq!(entry.byte_length(), 4096);
    }

    #[test]
    fn test_read_directory() {
        let mut raw = record(1, 2, "Barrel.dff");
        raw.extend(record(3, 1, "barrel.txd"));

        let parsed = ArchiveIndex::read_directory(&mut Cursor::new(raw)).unwrap();
        assert!(parsed.report.is_clean());

        let index = parsed.value;
        assert_eq!(index.len(), 2);
        let model = index.get("BARREL.DFF").unwrap();
        assert_eq!(model.byte_offset(), 2048);
        assert_eq!(model.byte_length(), 4096);
    }

    #[test]
    fn test_directory_remainder_is_fatal() {
        let mut raw = record(1, 2, "barrel.dff");
        raw.extend_from_slice(&[0u8; 5]);

        let err = ArchiveIndex::read_directory(&mut Cursor::new(raw)).unwrap_err();
        assert!(matches!(err, Error::TruncatedDirectory { length: 37, .. }));
    }

    #[test]
    fn test_read_embedded() {
        let mut raw = b"VER2".to_vec();
        raw.extend_from_slice(&1u32.to_le_bytes());
        raw.extend(record(1, 1, "tree.dff"));

        let parsed = ArchiveIndex::read_embedded(&mut Cursor::new(raw)).unwrap();
        assert!(parsed.report.is_clean());
        assert_eq!(parsed.value.entries()[0], IndexEntry::new("tree.dff", 1, 1));
    }

    #[test]
    fn test_wrong_magic_yields_empty_index() {
        let mut raw = b"VER1".to_vec();
        raw.extend_from_slice(&1u32.to_le_bytes());
        raw.extend(record(1, 1, "tree.dff"));

        let parsed = ArchiveIndex::read_embedded(&mut Cursor::new(raw)).unwrap();
        assert!(parsed.value.is_empty());
        assert_eq!(parsed.report.len(), 1);
        assert!(parsed.report.contains(DiagnosticCode::UnsupportedArchive));
    }

    #[test]
    fn test_embedded_count_past_end() {
        let mut raw = b"VER2".to_vec();
        raw.extend_from_slice(&3u32.to_le_bytes());
        raw.extend(record(1, 1, "tree.dff"));

        let err = ArchiveIndex::read_embedded(&mut Cursor::new(raw)).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedIndex {
                declared: 3,
                read: 1
            }
        ));
    }

    #[test]
    fn test_resolve_tries_extension() {
        let parsed = ArchiveIndex::from_entries([
            IndexEntry::new("barrel.dff", 1, 1),
            IndexEntry::new("barrel.txd", 2, 1),
        ]);
        let index = parsed.value;

        assert_eq!(
            index.resolve("Barrel", ResourceKind::Model).unwrap().name,
            "barrel.dff"
        );
        assert_eq!(
            index.resolve("barrel", ResourceKind::Texture).unwrap().name,
            "barrel.txd"
        );
        assert!(index.resolve("crate", ResourceKind::Model).is_none());
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let parsed = ArchiveIndex::from_entries([
            IndexEntry::new("barrel.dff", 1, 1),
            IndexEntry::new("BARREL.DFF", 9, 9),
        ]);
        assert_eq!(parsed.value.len(), 1);
        assert_eq!(parsed.value.get("barrel.dff").unwrap().offset_sectors, 1);
        assert!(parsed.report.contains(DiagnosticCode::DuplicateEntryName));
        assert!(parsed.report.is_valid());
    }

    #[test]
    fn test_write_embedded_round_trip() {
        let index = ArchiveIndex::from_entries([
            IndexEntry::new("barrel.dff", 1, 2),
            IndexEntry::new("barrel.txd", 3, 1),
        ])
        .value;

        let mut raw = Vec::new();
        index.write_embedded(&mut raw).unwrap();
        assert_eq!(raw.len(), 8 + 2 * ENTRY_SIZE);
        assert_eq!(&raw[..4], b"VER2");

        let reread = ArchiveIndex::read_embedded(&mut Cursor::new(raw)).unwrap().value;
        assert_eq!(reread.entries(), index.entries());
    }
}
