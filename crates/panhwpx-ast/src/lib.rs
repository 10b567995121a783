//! panhwpx-ast - Pandoc document tree definitions
//!
//! This crate provides the AST types used by panhwpx for representing
//! documents produced by `pandoc -t json`. Decoding is tolerant of node
//! kinds it does not know: they surface as `Unknown(tag)` variants and the
//! consumer decides whether to skip them.

pub mod block;
pub mod document;
pub mod error;
pub mod inline;
mod node;

pub use block::{Block, DefinitionItem, Heading, OrderedList, Table, TableBody, TableRow};
pub use document::{DocumentMeta, MetaValue, PandocDocument};
pub use error::AstError;
pub use inline::{Inline, MathKind, QuoteKind, StyleKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
