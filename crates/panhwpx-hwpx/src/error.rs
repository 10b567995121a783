//! Error types for HWPX operations

use thiserror::Error;

/// Errors that can occur while building an HWPX package
#[derive(Error, Debug)]
pub enum HwpxError {
    /// The skeleton package cannot be located or opened
    #[error("Skeleton package not found or unreadable: {0}")]
    MissingSkeleton(String),

    /// The input document does not have the expected shape
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] panhwpx_ast::AstError),

    /// The output package could not be written or moved into place
    #[error("Failed to write package to {path}: {source}")]
    ArchiveWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A style catalog in the header part violates its invariants
    #[error("Style catalog invariant violated: {0}")]
    StyleCatalog(String),

    /// Required part not found in the skeleton
    #[error("Required part not found: {0}")]
    MissingPart(String),

    /// A part does not have the structure the pipeline relies on
    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),

    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Error parsing the TOML configuration
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for HWPX operations
pub type Result<T> = std::result::Result<T, HwpxError>;
