//! Document conversion pipeline
//!
//! [`HwpxConverter`] ties the pieces together: it reads the three parts
//! it rewrites from the skeleton, builds the new section, patches the
//! header and manifest, and assembles the output package.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use panhwpx_ast::PandocDocument;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::archive::assemble_package;
use crate::config::StyleConfig;
use crate::error::{HwpxError, Result};
use crate::header::patch_header_xml;
use crate::manifest::{patch_content_hpf, MANIFEST_PATH};
use crate::styles::StyleMap;
use crate::template::{Skeleton, HEADER_PATH, SECTION_PATH};
use crate::text::document_meta;
use crate::writer::HwpxWriter;

/// Converts Pandoc documents into HWPX packages
#[derive(Debug, Clone, Default)]
pub struct HwpxConverter {
    config: StyleConfig,
    style_map: StyleMap,
}

impl HwpxConverter {
    /// Create a converter with the given configuration
    pub fn new(config: StyleConfig) -> Self {
        Self {
            config,
            style_map: StyleMap::default(),
        }
    }

    /// Replace the element to style mapping
    pub fn with_style_map(mut self, style_map: StyleMap) -> Self {
        self.style_map = style_map;
        self
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    /// Convert a document into HWPX package bytes
    pub fn convert(&self, doc: &PandocDocument, skeleton: &Skeleton) -> Result<Vec<u8>> {
        self.convert_at(doc, skeleton, Utc::now())
    }

    /// Convert with an explicit modification time
    pub fn convert_at(
        &self,
        doc: &PandocDocument,
        skeleton: &Skeleton,
        now: DateTime<Utc>,
    ) -> Result<Vec<u8>> {
        let meta = document_meta(doc);
        debug!(
            blocks = doc.blocks.len(),
            title = %meta.title,
            "converting document"
        );

        let mut writer = HwpxWriter::with_style_map(&self.config, self.style_map.clone());
        let section = writer.build_section_xml(&skeleton.section_xml()?, &doc.blocks, &meta)?;
        let header = patch_header_xml(&skeleton.header_xml()?, &self.config)?;
        let manifest = patch_content_hpf(&skeleton.content_hpf()?, &meta, now)?;

        assemble_package(
            skeleton.bytes(),
            &[
                (SECTION_PATH, section.as_bytes()),
                (HEADER_PATH, header.as_bytes()),
                (MANIFEST_PATH, manifest.as_bytes()),
            ],
        )
    }

    /// Convert a document and write the package to `output_path`
    ///
    /// The package is written to a temporary file next to the destination
    /// and renamed into place, so a failed conversion leaves any existing
    /// file untouched.
    pub fn convert_file<S: AsRef<Path>, O: AsRef<Path>>(
        &self,
        doc: &PandocDocument,
        skeleton_path: S,
        output_path: O,
    ) -> Result<()> {
        let skeleton = Skeleton::load(skeleton_path)?;
        let bytes = self.convert(doc, &skeleton)?;
        write_atomically(output_path.as_ref(), &bytes)?;
        info!(
            output = %output_path.as_ref().display(),
            size = bytes.len(),
            "wrote package"
        );
        Ok(())
    }
}

/// Write bytes to a temporary file in the destination directory, then
/// rename it over the destination
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_error = |source: std::io::Error| HwpxError::ArchiveWrite {
        path: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
    temp.write_all(bytes).map_err(write_error)?;
    temp.as_file().sync_all().map_err(write_error)?;
    temp.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}
