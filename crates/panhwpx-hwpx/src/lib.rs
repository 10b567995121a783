//! # panhwpx-hwpx
//!
//! Pandoc AST to HWPX (Hangul word processor) conversion.
//!
//! This crate provides functionality to:
//! - Flatten inline trees to display text and LaTeX math to HWP equation script
//! - Compute line segment geometry so Hangul can lay out paragraphs as-is
//! - Convert blocks into section paragraphs, tables and equations
//! - Patch the style catalogs and metadata of a skeleton package
//! - Assemble the output package, copying untouched parts byte-for-byte
//!
//! ## Example: Converting a Document
//!
//! ```no_run
//! use panhwpx_ast::PandocDocument;
//! use panhwpx_hwpx::{HwpxConverter, StyleConfig};
//!
//! let json = std::fs::read_to_string("document.json")?;
//! let doc = PandocDocument::from_json_str(&json)?;
//! HwpxConverter::new(StyleConfig::default())
//!     .convert_file(&doc, "Skeleton.hwpx", "document.hwpx")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod archive;
pub mod config;
pub mod converter;
pub mod error;
pub mod header;
pub mod lineseg;
pub mod manifest;
pub mod math;
pub mod section;
pub mod styles;
pub mod table;
pub mod template;
pub mod text;
pub mod writer;
pub mod xml_span;

#[doc(hidden)]
pub mod test_utils;

pub use archive::assemble_package;
pub use config::{FontSettings, HeadingSpacing, LayoutSettings, StyleConfig};
pub use converter::{write_atomically, HwpxConverter};
pub use error::{HwpxError, Result};
pub use header::patch_header_xml;
pub use lineseg::{compute_line_segments, line_segments_xml, LineSegment};
pub use manifest::patch_content_hpf;
pub use math::latex_to_hwp_script;
pub use section::SectionEnvelope;
pub use styles::{ElementType, StyleMap, StyleRef};
pub use table::{normalize_grid, TableGrid};
pub use template::{resolve_skeleton_path, Skeleton};
pub use text::{document_meta, extract_text};
pub use writer::{HwpxWriter, ParaIdCounter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
