//! Seams for the external RenderWare model and texture decoders

use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::geometry::DecodedGeometry;

/// Where a model payload comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSource {
    /// A file on disk
    FilePath(PathBuf),
    /// Bytes already in memory, usually extracted from an IMG archive
    InMemory(Vec<u8>),
}

impl ResourceSource {
    /// The payload bytes, reading the file if needed
    pub fn bytes(&self) -> Result<Cow<'_, [u8]>> {
        match self {
            Self::FilePath(path) => Ok(Cow::Owned(fs::read(path)?)),
            Self::InMemory(data) => Ok(Cow::Borrowed(data)),
        }
    }

    /// Short label for logs and diagnostics
    pub fn describe(&self) -> String {
        match self {
            Self::FilePath(path) => path.display().to_string(),
            Self::InMemory(data) => format!("<{} bytes in memory>", data.len()),
        }
    }
}

/// Turns a model payload into geometries.
///
/// Returning an empty list is a normal outcome for models without geometry.
pub trait ModelDecoder {
    /// Decode every geometry in `source`
    fn decode_model(&self, source: &ResourceSource) -> Result<Vec<DecodedGeometry>>;
}

/// A decoded texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Texture name inside its dictionary
    pub name: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel data, 4 bytes per pixel
    pub rgba: Vec<u8>,
}

impl RasterImage {
    /// Whether the pixel buffer matches the dimensions
    pub fn is_consistent(&self) -> bool {
        self.rgba.len() as u64 == u64::from(self.width) * u64::from(self.height) * 4
    }
}

/// Turns a texture dictionary payload into images
pub trait TextureDecoder {
    /// Decode every texture in `data`
    fn decode_textures(&self, data: &[u8]) -> Result<Vec<RasterImage>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_source_bytes() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), b"clump").unwrap();

        let from_disk = ResourceSource::FilePath(file.path().to_path_buf());
        let in_memory = ResourceSource::InMemory(b"clump".to_vec());

        assert_eq!(from_disk.bytes().unwrap().as_ref(), b"clump");
        assert_eq!(in_memory.bytes().unwrap().as_ref(), b"clump");
        assert_eq!(in_memory.describe(), "<5 bytes in memory>");
    }

    #[test]
    fn test_raster_consistency() {
        let image = RasterImage {
            name: "wood".to_string(),
            width: 2,
            height: 2,
            rgba: vec![0; 16],
        };
        assert!(image.is_consistent());
    }
}
