//! panhwpx CLI - Command-line interface library
//!
//! Reads a Pandoc JSON document, renders it into a copy of a skeleton
//! HWPX package and writes the result.
//!
//! # Library Usage
//!
//! ```ignore
//! use panhwpx_cli::{convert_command, ConvertOptions};
//!
//! convert_command(&ConvertOptions {
//!     input: Some("document.json".into()),
//!     output: "document.hwpx".into(),
//!     skeleton: None,
//!     config: None,
//! })?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Convert from stdin
//! pandoc -t json report.md | panhwpx --output report.hwpx
//!
//! # Explicit input, skeleton and style configuration
//! panhwpx --input report.json --skeleton Skeleton.hwpx --config panhwpx.toml -o report.hwpx
//! ```

pub mod app;

pub use app::{convert_command, init_logging, run_cli, ConvertOptions};
