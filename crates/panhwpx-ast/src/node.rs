//! Pandoc's tagged node encoding
//!
//! Every Pandoc node is serialized as `{"t": <tag>, "c": <content>}` where
//! the shape of `c` depends on the tag. Nodes are first read into
//! [`RawNode`] and then converted with `TryFrom` so that unknown tags can be
//! preserved instead of failing the whole decode.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AstError;

/// A node whose content has not been interpreted yet
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    /// Node tag (`Str`, `Para`, ...)
    pub t: String,
    /// Tag-specific content; absent for nullary nodes such as `Space`
    #[serde(default)]
    pub c: Value,
}

/// Interpret the content of a node with the given tag
pub(crate) fn content<T: DeserializeOwned>(tag: &str, c: Value) -> Result<T, AstError> {
    serde_json::from_value(c).map_err(|source| AstError::Shape {
        tag: tag.to_string(),
        source,
    })
}
