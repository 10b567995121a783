//! Block-level elements for document structure
//!
//! This module defines block-level elements that form the document structure,
//! such as paragraphs, headings, lists, tables and quotes.

use serde::de::IgnoredAny;
use serde::Deserialize;

use crate::error::AstError;
use crate::inline::Inline;
use crate::node::{content, RawNode};

/// Block-level content element
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawNode")]
pub enum Block {
    /// A paragraph of text (`Para`)
    Paragraph(Vec<Inline>),
    /// Text not wrapped in a paragraph, e.g. in tight lists (`Plain`)
    Plain(Vec<Inline>),
    /// A section heading
    Heading(Heading),
    /// A literal code block
    CodeBlock(String),
    /// An unordered list; each item is a sequence of blocks
    BulletList(Vec<Vec<Block>>),
    /// A numbered list
    OrderedList(OrderedList),
    /// A block quote
    BlockQuote(Vec<Block>),
    /// A table
    Table(Table),
    /// A horizontal rule
    HorizontalRule,
    /// A generic container (`Div`)
    Div(Vec<Block>),
    /// A definition list
    DefinitionList(Vec<DefinitionItem>),
    /// A line block; each line is a sequence of inlines
    LineBlock(Vec<Vec<Inline>>),
    /// Raw content for another output format
    Raw(String, String),
    /// A figure; not rendered
    Figure(Vec<Block>),
    /// Nothing
    Null,
    /// A node kind this crate does not know about
    Unknown(String),
}

/// A section heading
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    /// Heading level (1-6, where 1 is the highest)
    pub level: u8,
    /// Heading text content
    pub text: Vec<Inline>,
}

/// A numbered list
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedList {
    /// Number of the first item
    pub start: i64,
    /// List items
    pub items: Vec<Vec<Block>>,
}

/// A definition list entry
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionItem {
    /// The term being defined
    pub term: Vec<Inline>,
    /// One or more definitions, each a sequence of blocks
    pub definitions: Vec<Vec<Block>>,
}

/// A table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Caption blocks (may be empty)
    pub caption: Vec<Block>,
    /// Header rows
    pub head: Vec<TableRow>,
    /// Body groups
    pub bodies: Vec<TableBody>,
}

/// A group of body rows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableBody {
    /// Intermediate header rows of this body
    pub head: Vec<TableRow>,
    /// Body rows
    pub rows: Vec<TableRow>,
}

/// A table row
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    /// Cells in this row, each a sequence of blocks
    pub cells: Vec<Vec<Block>>,
}

// Pandoc's positional table encoding. Attributes, alignments, spans and
// column specs are not used by the converter.

#[derive(Deserialize)]
struct RawCaption(IgnoredAny, Vec<Block>);

#[derive(Deserialize)]
struct RawTableHead(IgnoredAny, Vec<RawRow>);

#[derive(Deserialize)]
struct RawTableBody(IgnoredAny, IgnoredAny, Vec<RawRow>, Vec<RawRow>);

#[derive(Deserialize)]
struct RawRow(IgnoredAny, Vec<RawCell>);

#[derive(Deserialize)]
struct RawCell(IgnoredAny, IgnoredAny, IgnoredAny, IgnoredAny, Vec<Block>);

impl From<RawRow> for TableRow {
    fn from(row: RawRow) -> Self {
        TableRow {
            cells: row.1.into_iter().map(|cell| cell.4).collect(),
        }
    }
}

fn rows(raw: Vec<RawRow>) -> Vec<TableRow> {
    raw.into_iter().map(TableRow::from).collect()
}

impl TryFrom<RawNode> for Block {
    type Error = AstError;

    fn try_from(node: RawNode) -> Result<Self, Self::Error> {
        let RawNode { t, c } = node;

        let block = match t.as_str() {
            "Para" => Block::Paragraph(content(&t, c)?),
            "Plain" => Block::Plain(content(&t, c)?),
            "Header" => {
                let (level, _, text): (u8, IgnoredAny, Vec<Inline>) = content(&t, c)?;
                Block::Heading(Heading { level, text })
            }
            "CodeBlock" => {
                let (_, code): (IgnoredAny, String) = content(&t, c)?;
                Block::CodeBlock(code)
            }
            "BulletList" => Block::BulletList(content(&t, c)?),
            "OrderedList" => {
                let ((start, _, _), items): ((i64, IgnoredAny, IgnoredAny), Vec<Vec<Block>>) =
                    content(&t, c)?;
                Block::OrderedList(OrderedList { start, items })
            }
            "BlockQuote" => Block::BlockQuote(content(&t, c)?),
            "Table" => {
                let (_, caption, _, head, bodies, _): (
                    IgnoredAny,
                    RawCaption,
                    IgnoredAny,
                    RawTableHead,
                    Vec<RawTableBody>,
                    IgnoredAny,
                ) = content(&t, c)?;
                Block::Table(Table {
                    caption: caption.1,
                    head: rows(head.1),
                    bodies: bodies
                        .into_iter()
                        .map(|body| TableBody {
                            head: rows(body.2),
                            rows: rows(body.3),
                        })
                        .collect(),
                })
            }
            "HorizontalRule" => Block::HorizontalRule,
            "Div" => {
                let (_, blocks): (IgnoredAny, Vec<Block>) = content(&t, c)?;
                Block::Div(blocks)
            }
            "DefinitionList" => {
                let items: Vec<(Vec<Inline>, Vec<Vec<Block>>)> = content(&t, c)?;
                Block::DefinitionList(
                    items
                        .into_iter()
                        .map(|(term, definitions)| DefinitionItem { term, definitions })
                        .collect(),
                )
            }
            "LineBlock" => Block::LineBlock(content(&t, c)?),
            "RawBlock" => {
                let (format, text): (String, String) = content(&t, c)?;
                Block::Raw(format, text)
            }
            "Figure" => {
                let (_, _, blocks): (IgnoredAny, IgnoredAny, Vec<Block>) = content(&t, c)?;
                Block::Figure(blocks)
            }
            "Null" => Block::Null,
            _ => Block::Unknown(t),
        };
        Ok(block)
    }
}
