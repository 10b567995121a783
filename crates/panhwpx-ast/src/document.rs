//! Document root and metadata definitions
//!
//! This module defines the top-level Pandoc document and its metadata
//! values.

use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;

use crate::block::Block;
use crate::error::AstError;
use crate::inline::Inline;
use crate::node::{content, RawNode};

/// A complete Pandoc document
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PandocDocument {
    /// Pandoc API version the producer used
    #[serde(rename = "pandoc-api-version", default)]
    pub api_version: Vec<u32>,
    /// Document metadata values, keyed by field name
    #[serde(default)]
    pub meta: BTreeMap<String, MetaValue>,
    /// Document content blocks
    pub blocks: Vec<Block>,
}

/// A metadata value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawNode")]
pub enum MetaValue {
    String(String),
    Inlines(Vec<Inline>),
    Blocks(Vec<Block>),
    List(Vec<MetaValue>),
    Map(BTreeMap<String, MetaValue>),
    Bool(bool),
    Unknown(String),
}

/// Plain-text document metadata used for the title block and the package
/// manifest
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentMeta {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub date: String,
}

impl TryFrom<RawNode> for MetaValue {
    type Error = AstError;

    fn try_from(node: RawNode) -> Result<Self, Self::Error> {
        let RawNode { t, c } = node;
        let value = match t.as_str() {
            "MetaString" => MetaValue::String(content(&t, c)?),
            "MetaInlines" => MetaValue::Inlines(content(&t, c)?),
            "MetaBlocks" => MetaValue::Blocks(content(&t, c)?),
            "MetaList" => MetaValue::List(content(&t, c)?),
            "MetaMap" => MetaValue::Map(content(&t, c)?),
            "MetaBool" => MetaValue::Bool(content(&t, c)?),
            _ => MetaValue::Unknown(t),
        };
        Ok(value)
    }
}

impl PandocDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a document from Pandoc JSON text
    pub fn from_json_str(json: &str) -> Result<Self, AstError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a document from a reader yielding Pandoc JSON
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AstError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Create a document with the given blocks and no metadata
    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            ..Self::default()
        }
    }

    /// Look up a metadata value
    pub fn meta_value(&self, key: &str) -> Option<&MetaValue> {
        self.meta.get(key)
    }

    /// Check if the document is empty (no blocks)
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_document() {
        let json = r#"{
            "pandoc-api-version": [1, 23, 1],
            "meta": {
                "title": {"t": "MetaInlines", "c": [{"t": "Str", "c": "Report"}]},
                "draft": {"t": "MetaBool", "c": true}
            },
            "blocks": [{"t": "Para", "c": [{"t": "Str", "c": "Body"}]}]
        }"#;
        let doc = PandocDocument::from_json_str(json).unwrap();
        assert_eq!(doc.api_version, vec![1, 23, 1]);
        assert_eq!(
            doc.meta_value("title"),
            Some(&MetaValue::Inlines(vec![Inline::text("Report")]))
        );
        assert_eq!(doc.meta_value("draft"), Some(&MetaValue::Bool(true)));
        assert_eq!(doc.blocks.len(), 1);
    }

    #[test]
    fn test_missing_blocks_is_malformed() {
        let result = PandocDocument::from_json_str(r#"{"meta": {}}"#);
        assert!(matches!(result, Err(AstError::Json(_))));
    }

    #[test]
    fn test_not_json_is_malformed() {
        assert!(PandocDocument::from_json_str("not json").is_err());
    }

    #[test]
    fn test_empty_document() {
        let doc = PandocDocument::from_json_str(r#"{"blocks": []}"#).unwrap();
        assert!(doc.is_empty());
        assert!(doc.meta.is_empty());
    }
}
