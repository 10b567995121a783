//! Inline elements for document content
//!
//! This module defines inline-level elements that appear within blocks,
//! such as text, emphasis wrappers, links, quotes and math.
//!
//! Inlines are decoded from Pandoc's `{"t": ..., "c": ...}` encoding. Tags
//! that are not part of the supported set decode to [`Inline::Unknown`] so
//! that a newer Pandoc does not make the whole document unreadable.

use serde::de::IgnoredAny;
use serde::Deserialize;

use crate::block::Block;
use crate::error::AstError;
use crate::node::{content, RawNode};

/// Inline-level content element
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawNode")]
pub enum Inline {
    /// Plain text content (`Str`)
    Text(String),
    /// Inter-word space
    Space,
    /// Soft line break in the source
    SoftBreak,
    /// Hard line break (`LineBreak`)
    HardBreak,
    /// Emphasis-family wrapper (bold, italic, ...)
    Styled(StyleKind, Vec<Inline>),
    /// Inline code
    Code(String),
    /// A hyperlink; the target is not kept
    Link(Vec<Inline>),
    /// An inline image; only the alternative text is kept
    Image(Vec<Inline>),
    /// Quoted text
    Quoted(QuoteKind, Vec<Inline>),
    /// A citation; only the rendered text is kept
    Cite(Vec<Inline>),
    /// TeX math
    Math(MathKind, String),
    /// Raw content for another output format
    Raw(String, String),
    /// Footnote
    Note(Vec<Block>),
    /// Generic inline container
    Span(Vec<Inline>),
    /// A node kind this crate does not know about
    Unknown(String),
}

/// Emphasis-family wrappers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Emph,
    Strong,
    Strikeout,
    Superscript,
    Subscript,
    SmallCaps,
    Underline,
}

/// Quote kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "t")]
pub enum QuoteKind {
    SingleQuote,
    DoubleQuote,
}

/// Math kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "t")]
pub enum MathKind {
    InlineMath,
    DisplayMath,
}

impl Inline {
    /// Convenience constructor for a text node
    pub fn text(s: impl Into<String>) -> Self {
        Inline::Text(s.into())
    }
}

impl TryFrom<RawNode> for Inline {
    type Error = AstError;

    fn try_from(node: RawNode) -> Result<Self, Self::Error> {
        let RawNode { t, c } = node;
        let styled = |kind: StyleKind, c| -> Result<Inline, AstError> {
            Ok(Inline::Styled(kind, content(&t, c)?))
        };

        let inline = match t.as_str() {
            "Str" => Inline::Text(content(&t, c)?),
            "Space" => Inline::Space,
            "SoftBreak" => Inline::SoftBreak,
            "LineBreak" => Inline::HardBreak,
            "Emph" => styled(StyleKind::Emph, c)?,
            "Strong" => styled(StyleKind::Strong, c)?,
            "Strikeout" => styled(StyleKind::Strikeout, c)?,
            "Superscript" => styled(StyleKind::Superscript, c)?,
            "Subscript" => styled(StyleKind::Subscript, c)?,
            "SmallCaps" => styled(StyleKind::SmallCaps, c)?,
            "Underline" => styled(StyleKind::Underline, c)?,
            "Code" => {
                let (_, code): (IgnoredAny, String) = content(&t, c)?;
                Inline::Code(code)
            }
            "Link" | "Image" => {
                let (_, children, _): (IgnoredAny, Vec<Inline>, IgnoredAny) = content(&t, c)?;
                if t == "Link" {
                    Inline::Link(children)
                } else {
                    Inline::Image(children)
                }
            }
            "Quoted" => {
                let (kind, children): (QuoteKind, Vec<Inline>) = content(&t, c)?;
                Inline::Quoted(kind, children)
            }
            "Cite" => {
                let (_, children): (IgnoredAny, Vec<Inline>) = content(&t, c)?;
                Inline::Cite(children)
            }
            "Math" => {
                let (kind, tex): (MathKind, String) = content(&t, c)?;
                Inline::Math(kind, tex)
            }
            "RawInline" => {
                let (format, text): (String, String) = content(&t, c)?;
                Inline::Raw(format, text)
            }
            "Note" => Inline::Note(content(&t, c)?),
            "Span" => {
                let (_, children): (IgnoredAny, Vec<Inline>) = content(&t, c)?;
                Inline::Span(children)
            }
            _ => Inline::Unknown(t),
        };
        Ok(inline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> Inline {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_text_inline() {
        assert_eq!(decode(json!({"t": "Str", "c": "Hello"})), Inline::text("Hello"));
        assert_eq!(decode(json!({"t": "Space"})), Inline::Space);
        assert_eq!(decode(json!({"t": "LineBreak"})), Inline::HardBreak);
    }

    #[test]
    fn test_emphasis_family() {
        let strong = decode(json!({"t": "Strong", "c": [{"t": "Str", "c": "bold"}]}));
        assert_eq!(
            strong,
            Inline::Styled(StyleKind::Strong, vec![Inline::text("bold")])
        );
    }

    #[test]
    fn test_link_drops_target() {
        let link = decode(json!({
            "t": "Link",
            "c": [["", [], []], [{"t": "Str", "c": "Example"}], ["https://example.com", ""]]
        }));
        assert_eq!(link, Inline::Link(vec![Inline::text("Example")]));
    }

    #[test]
    fn test_quoted_and_math() {
        let quoted = decode(json!({
            "t": "Quoted",
            "c": [{"t": "DoubleQuote"}, [{"t": "Str", "c": "hi"}]]
        }));
        assert_eq!(
            quoted,
            Inline::Quoted(QuoteKind::DoubleQuote, vec![Inline::text("hi")])
        );

        let math = decode(json!({"t": "Math", "c": [{"t": "DisplayMath"}, "x^2"]}));
        assert_eq!(math, Inline::Math(MathKind::DisplayMath, "x^2".to_string()));
    }

    #[test]
    fn test_unknown_tag_is_kept() {
        let unknown = decode(json!({"t": "Hologram", "c": 42}));
        assert_eq!(unknown, Inline::Unknown("Hologram".to_string()));
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let result: Result<Inline, _> = serde_json::from_value(json!({"t": "Str", "c": 7}));
        assert!(result.is_err());
    }
}
