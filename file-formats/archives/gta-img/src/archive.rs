//! Open archive handle combining an index with its payload stream

use gta_data::DiagnosticReport;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::extract;
use crate::index::{ArchiveIndex, ImgVersion, IndexEntry, ResourceKind, VER2_MAGIC};

/// An IMG archive ready for extraction.
///
/// Holds the decoded index and the payload stream. Nothing is cached:
/// every read goes back to the stream.
#[derive(Debug)]
pub struct ImgArchive<R = BufReader<File>> {
    reader: R,
    index: ArchiveIndex,
    version: ImgVersion,
    report: DiagnosticReport,
}

impl ImgArchive<BufReader<File>> {
    /// Open an archive from disk, detecting its variant.
    ///
    /// A file starting with `VER2` is read as variant 2. Otherwise, if a
    /// `.dir` file sits next to it (or `path` itself is the `.dir`), the pair
    /// is read as variant 1. Anything else is handed to the variant 2 reader,
    /// which reports it as unsupported.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if has_extension(path, "dir") {
            return Self::open_split(path, path.with_extension("img"));
        }

        let mut reader = BufReader::new(File::open(path)?);
        let mut magic = [0u8; 4];
        let is_ver2 = reader.read_exact(&mut magic).is_ok() && magic == VER2_MAGIC;
        reader.seek(SeekFrom::Start(0))?;

        let directory = directory_path_for(path);
        if !is_ver2 && directory.is_file() {
            log::debug!("Using split index {}", directory.display());
            return Self::open_split(directory, path);
        }

        Self::from_embedded(reader)
    }

    /// Open a variant 1 pair of directory and payload files
    pub fn open_split<D: AsRef<Path>, P: AsRef<Path>>(directory: D, payload: P) -> Result<Self> {
        let mut directory = BufReader::new(File::open(directory)?);
        let reader = BufReader::new(File::open(payload)?);
        Self::from_split(&mut directory, reader)
    }
}

impl<R: Read + Seek> ImgArchive<R> {
    /// Read a variant 2 archive whose index is embedded in `reader`
    pub fn from_embedded(mut reader: R) -> Result<Self> {
        reader.seek(SeekFrom::Start(0))?;
        let (index, report) = ArchiveIndex::read_embedded(&mut reader)?.into_parts();
        log::debug!("Loaded VER2 archive with {} entries", index.len());
        Ok(Self {
            reader,
            index,
            version: ImgVersion::V2,
            report,
        })
    }

    /// Read a variant 1 archive from its directory stream and payload stream
    pub fn from_split<D: Read>(directory: &mut D, reader: R) -> Result<Self> {
        let (index, report) = ArchiveIndex::read_directory(directory)?.into_parts();
        log::debug!("Loaded split archive with {} entries", index.len());
        Ok(Self {
            reader,
            index,
            version: ImgVersion::V1,
            report,
        })
    }

    /// The decoded index
    pub fn index(&self) -> &ArchiveIndex {
        &self.index
    }

    /// Detected archive variant
    pub fn version(&self) -> ImgVersion {
        self.version
    }

    /// Diagnostics collected while reading the index
    pub fn report(&self) -> &DiagnosticReport {
        &self.report
    }

    /// Extract a resource by name, see [`extract::extract`]
    pub fn read_file(&mut self, name: &str, kind: ResourceKind) -> Result<Option<Vec<u8>>> {
        extract::extract(&self.index, &mut self.reader, name, kind)
    }

    /// Read the payload of a specific entry
    pub fn read_entry(&mut self, entry: &IndexEntry) -> Result<Vec<u8>> {
        extract::read_entry(&mut self.reader, entry)
    }

    /// Give back the payload stream
    pub fn into_inner(self) -> R {
        self.reader
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

/// Path of the directory stream belonging to a variant 1 payload
pub fn directory_path_for(payload: &Path) -> PathBuf {
    payload.with_extension("dir")
}
