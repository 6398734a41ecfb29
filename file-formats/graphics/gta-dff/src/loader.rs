//! Model loading pipeline: archive extraction, decoding and normalization

use gta_data::{DiagnosticCode, DiagnosticReport, Parsed};
use gta_img::{ImgArchive, ResourceKind};
use std::io::{Read, Seek};

use crate::decoder::{ModelDecoder, RasterImage, ResourceSource, TextureDecoder};
use crate::error::{Error, Result};
use crate::normalize::{NormalizeOptions, RenderMesh, normalize};

/// Options for [`ModelLoader`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadOptions {
    /// Extract and decode the model's texture dictionary as well
    pub extract_textures: bool,
    /// Options for mesh normalization
    pub normalize: NormalizeOptions,
}

/// A model ready for rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedModel {
    /// Model name as requested
    pub name: String,
    /// One mesh per decoded geometry that had vertices
    pub meshes: Vec<RenderMesh>,
    /// Decoded textures, empty unless texture extraction was requested
    pub textures: Vec<RasterImage>,
}

/// Drives the external decoders and the normalizer
#[derive(Debug)]
pub struct ModelLoader<M, T> {
    models: M,
    textures: T,
    options: LoadOptions,
}

impl<M: ModelDecoder, T: TextureDecoder> ModelLoader<M, T> {
    /// Create a loader around a pair of decoders
    pub fn new(models: M, textures: T, options: LoadOptions) -> Self {
        Self {
            models,
            textures,
            options,
        }
    }

    /// Active options
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Decode and normalize a model payload.
    ///
    /// A decoder failure or a model without geometry yields `None` plus a
    /// [`DiagnosticCode::NoGeometry`] diagnostic. I/O failures while reading
    /// a [`ResourceSource::FilePath`] are returned as errors.
    pub fn load_source(
        &self,
        name: &str,
        source: &ResourceSource,
    ) -> Result<Parsed<Option<LoadedModel>>> {
        let mut report = DiagnosticReport::new();

        let geometries = match self.models.decode_model(source) {
            Ok(geometries) => geometries,
            Err(Error::Decode { message, .. }) => {
                report.add_error(
                    DiagnosticCode::NoGeometry,
                    format!("failed to decode {} ({}): {}", name, source.describe(), message),
                );
                return Ok(Parsed::new(None, report));
            }
            Err(e) => return Err(e),
        };

        let mut meshes = Vec::with_capacity(geometries.len());
        for geometry in &geometries {
            let (mesh, mesh_report) = normalize(geometry, &self.options.normalize).into_parts();
            report.extend(mesh_report);
            meshes.extend(mesh);
        }

        if meshes.is_empty() {
            report.add_error(
                DiagnosticCode::NoGeometry,
                format!("model {} has no usable geometry", name),
            );
            return Ok(Parsed::new(None, report));
        }

        log::debug!("Loaded {} with {} mesh(es)", name, meshes.len());
        Ok(Parsed::new(
            Some(LoadedModel {
                name: name.to_string(),
                meshes,
                textures: Vec::new(),
            }),
            report,
        ))
    }

    /// Load `name` from an IMG archive.
    ///
    /// The model is looked up as `name.dff`. With
    /// [`LoadOptions::extract_textures`] the dictionary `texture_set` (the
    /// model name when `None`) is extracted as a `.txd` and decoded; a missing
    /// or undecodable dictionary is reported, not fatal.
    pub fn load_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ImgArchive<R>,
        name: &str,
        texture_set: Option<&str>,
    ) -> Result<Parsed<Option<LoadedModel>>> {
        let Some(payload) = archive.read_file(name, ResourceKind::Model)? else {
            let mut report = DiagnosticReport::new();
            report.add_error(
                DiagnosticCode::NoGeometry,
                format!("model {} not found in archive", name),
            );
            return Ok(Parsed::new(None, report));
        };

        let (model, mut report) = self
            .load_source(name, &ResourceSource::InMemory(payload))?
            .into_parts();

        let Some(mut model) = model else {
            return Ok(Parsed::new(None, report));
        };

        if self.options.extract_textures {
            let dictionary = texture_set.unwrap_or(name);
            model.textures = self.load_textures(archive, dictionary, &mut report)?;
        }

        Ok(Parsed::new(Some(model), report))
    }

    fn load_textures<R: Read + Seek>(
        &self,
        archive: &mut ImgArchive<R>,
        dictionary: &str,
        report: &mut DiagnosticReport,
    ) -> Result<Vec<RasterImage>> {
        let Some(payload) = archive.read_file(dictionary, ResourceKind::Texture)? else {
            report.add_warning(
                DiagnosticCode::MissingTexture,
                format!("texture dictionary {} not found in archive", dictionary),
            );
            return Ok(Vec::new());
        };

        match self.textures.decode_textures(&payload) {
            Ok(images) => {
                log::debug!("Decoded {} texture(s) from {}", images.len(), dictionary);
                Ok(images)
            }
            Err(Error::Decode { message, .. }) => {
                report.add_warning(
                    DiagnosticCode::MissingTexture,
                    format!("failed to decode texture dictionary {}: {}", dictionary, message),
                );
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}
