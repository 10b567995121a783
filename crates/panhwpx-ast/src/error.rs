//! Error types for AST decoding

use thiserror::Error;

/// Errors raised while decoding a Pandoc JSON document
#[derive(Error, Debug)]
pub enum AstError {
    /// The payload is not valid JSON or not a Pandoc document
    #[error("Malformed document: {0}")]
    Json(#[from] serde_json::Error),

    /// A node's content does not have the shape its tag requires
    #[error("Malformed `{tag}` node: {source}")]
    Shape {
        tag: String,
        #[source]
        source: serde_json::Error,
    },
}
