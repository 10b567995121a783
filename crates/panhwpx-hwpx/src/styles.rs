//! Style references into the skeleton's header part
//!
//! HWPX paragraphs point at three numbered resources in
//! `Contents/header.xml`: a style (`styleIDRef`), a paragraph shape
//! (`paraPrIDRef`) and a character shape (`charPrIDRef`). The skeleton
//! defines the outline styles; the character shapes used by headings and
//! code blocks are appended by the header patcher.
//!
//! # Style Mapping
//!
//! [`StyleMap`] maps semantic document elements to a [`StyleRef`].
//!
//! ```
//! use panhwpx_hwpx::styles::{ElementType, StyleMap};
//!
//! let map = StyleMap::default();
//! assert_eq!(map.get(ElementType::Heading(1)).char_pr_id, 7);
//! assert_eq!(map.get(ElementType::Paragraph).char_pr_id, 0);
//! ```

use std::collections::HashMap;

/// The resource triple a paragraph refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StyleRef {
    pub style_id: u32,
    pub para_pr_id: u32,
    pub char_pr_id: u32,
}

impl StyleRef {
    pub const fn new(style_id: u32, para_pr_id: u32, char_pr_id: u32) -> Self {
        Self {
            style_id,
            para_pr_id,
            char_pr_id,
        }
    }
}

/// Body text ("바탕글")
pub const NORMAL_STYLE: StyleRef = StyleRef::new(0, 0, 0);
/// Table caption ("캡션")
pub const CAPTION_STYLE: StyleRef = StyleRef::new(22, 19, 0);

/// A character shape appended to `hh:charProperties`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharShape {
    pub id: u32,
    /// Character height in HWPUNIT (1/100 pt)
    pub height: u32,
    pub bold: bool,
    /// Index into each script's font face list
    pub font_ref: u32,
}

/// Heading character shapes: 22pt bold, 16pt bold, 13pt
pub const HEADING_CHAR_SHAPES: [CharShape; 3] = [
    CharShape {
        id: 7,
        height: 2200,
        bold: true,
        font_ref: 0,
    },
    CharShape {
        id: 8,
        height: 1600,
        bold: true,
        font_ref: 0,
    },
    CharShape {
        id: 9,
        height: 1300,
        bold: false,
        font_ref: 0,
    },
];

/// Code block character shape: 10pt in the monospace face (font index 2)
pub const CODE_CHAR_SHAPE: CharShape = CharShape {
    id: 10,
    height: 1000,
    bold: false,
    font_ref: 2,
};

/// Border/fill used by table cells: solid lines on every edge
pub const TABLE_BORDER_FILL_ID: u32 = 3;

/// Character shapes appended by the header patcher, in insertion order
pub fn added_char_shapes() -> impl Iterator<Item = CharShape> {
    HEADING_CHAR_SHAPES
        .into_iter()
        .chain(std::iter::once(CODE_CHAR_SHAPE))
}

/// Character height used for line segments of a run with this shape
///
/// Shapes from the skeleton are assumed to be body text size.
pub fn char_height(char_pr_id: u32, normal_height: u32) -> u32 {
    added_char_shapes()
        .find(|shape| shape.id == char_pr_id)
        .map(|shape| shape.height)
        .unwrap_or(normal_height)
}

/// Semantic element types that map to a style triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Heading level 1-6
    Heading(u8),
    /// Normal paragraph
    Paragraph,
    /// Code block line
    CodeBlock,
    /// Table caption
    Caption,
    /// Document title in the title block
    Title,
    /// Document subtitle in the title block
    Subtitle,
}

/// Maps semantic document elements to style triples
#[derive(Debug, Clone)]
pub struct StyleMap {
    mappings: HashMap<ElementType, StyleRef>,
}

impl Default for StyleMap {
    /// Mapping for the bundled skeleton's outline styles ("개요 1".."개요 6")
    fn default() -> Self {
        let mut mappings = HashMap::new();

        mappings.insert(ElementType::Heading(1), StyleRef::new(2, 2, 7));
        mappings.insert(ElementType::Heading(2), StyleRef::new(3, 3, 8));
        mappings.insert(ElementType::Heading(3), StyleRef::new(4, 4, 9));
        mappings.insert(ElementType::Heading(4), StyleRef::new(5, 5, 0));
        mappings.insert(ElementType::Heading(5), StyleRef::new(6, 6, 0));
        mappings.insert(ElementType::Heading(6), StyleRef::new(7, 7, 0));

        mappings.insert(ElementType::Paragraph, NORMAL_STYLE);
        mappings.insert(
            ElementType::CodeBlock,
            StyleRef::new(0, 0, CODE_CHAR_SHAPE.id),
        );
        mappings.insert(ElementType::Caption, CAPTION_STYLE);

        // Title lines keep body paragraph shapes so they are not numbered
        mappings.insert(
            ElementType::Title,
            StyleRef::new(0, 0, HEADING_CHAR_SHAPES[0].id),
        );
        mappings.insert(
            ElementType::Subtitle,
            StyleRef::new(0, 0, HEADING_CHAR_SHAPES[1].id),
        );

        Self { mappings }
    }
}

impl StyleMap {
    /// Set a mapping from element type to style triple
    pub fn set(&mut self, element: ElementType, style: StyleRef) {
        self.mappings.insert(element, style);
    }

    /// Get the style triple for an element type, body text if unmapped
    pub fn get(&self, element: ElementType) -> StyleRef {
        self.mappings
            .get(&element)
            .copied()
            .unwrap_or(NORMAL_STYLE)
    }

    /// Style triple for a heading level
    pub fn heading(&self, level: u8) -> StyleRef {
        self.get(ElementType::Heading(level))
    }
}
