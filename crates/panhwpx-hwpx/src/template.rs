//! Skeleton package loader
//!
//! Every generated document starts from a skeleton `.hwpx` produced by
//! Hangul itself. It supplies the page setup, the style catalogs and all
//! auxiliary parts; conversion only rewrites three of them.
//!
//! # Example
//!
//! ```ignore
//! use panhwpx_hwpx::Skeleton;
//!
//! let skeleton = Skeleton::load("Skeleton.hwpx")?;
//! let header = skeleton.header_xml()?;
//! ```

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;

use crate::error::{HwpxError, Result};
use crate::manifest::MANIFEST_PATH;

/// The section part that receives converted content
pub const SECTION_PATH: &str = "Contents/section0.xml";
/// The header part holding the style catalogs
pub const HEADER_PATH: &str = "Contents/header.xml";
/// File name looked up when no skeleton path is given
pub const DEFAULT_SKELETON_NAME: &str = "Skeleton.hwpx";

/// A skeleton HWPX package, kept as the original archive bytes
#[derive(Debug, Clone)]
pub struct Skeleton {
    bytes: Vec<u8>,
}

impl Skeleton {
    /// Load a skeleton from a file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            HwpxError::MissingSkeleton(format!("{}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), size = bytes.len(), "loaded skeleton");
        Self::from_bytes(bytes)
    }

    /// Load a skeleton from archive bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        ZipArchive::new(Cursor::new(bytes.as_slice())).map_err(|e| {
            HwpxError::MissingSkeleton(format!("not a readable archive: {}", e))
        })?;
        Ok(Self { bytes })
    }

    /// The untouched archive bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Read a part by name
    pub fn part(&self, name: &str) -> Result<Vec<u8>> {
        let mut archive = ZipArchive::new(Cursor::new(self.bytes.as_slice()))?;
        let mut file = archive
            .by_name(name)
            .map_err(|_| HwpxError::MissingPart(name.to_string()))?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }

    /// Read a part by name as UTF-8 text
    pub fn part_string(&self, name: &str) -> Result<String> {
        String::from_utf8(self.part(name)?)
            .map_err(|_| HwpxError::InvalidStructure(format!("{} is not valid UTF-8", name)))
    }

    /// Get the section part (Contents/section0.xml)
    pub fn section_xml(&self) -> Result<String> {
        self.part_string(SECTION_PATH)
    }

    /// Get the header part (Contents/header.xml)
    pub fn header_xml(&self) -> Result<String> {
        self.part_string(HEADER_PATH)
    }

    /// Get the package manifest (Contents/content.hpf)
    pub fn content_hpf(&self) -> Result<String> {
        self.part_string(MANIFEST_PATH)
    }
}

/// Decide which skeleton file to use
///
/// An explicit path is used as given. Otherwise [`DEFAULT_SKELETON_NAME`]
/// is looked up next to the executable, then in the working directory.
pub fn resolve_skeleton_path(
    explicit: Option<&Path>,
    exe_dir: Option<&Path>,
    working_dir: &Path,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(HwpxError::MissingSkeleton(path.display().to_string()))
        };
    }

    let candidates: Vec<PathBuf> = exe_dir
        .into_iter()
        .chain(std::iter::once(working_dir))
        .map(|dir| dir.join(DEFAULT_SKELETON_NAME))
        .collect();

    candidates
        .iter()
        .find(|candidate| candidate.is_file())
        .cloned()
        .ok_or_else(|| {
            let searched: Vec<String> = candidates
                .iter()
                .map(|candidate| candidate.display().to_string())
                .collect();
            HwpxError::MissingSkeleton(format!("searched {}", searched.join(", ")))
        })
}
