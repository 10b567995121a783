//! HWPX Writer
//!
//! This module turns Pandoc blocks into `<hp:p>` fragments of an HWPX
//! section part. Every fragment is self-contained: it carries its own
//! paragraph id, style references and line segment geometry.
//!
//! # Example
//!
//! ```
//! use panhwpx_ast::{Block, Heading, Inline};
//! use panhwpx_hwpx::{HwpxWriter, StyleConfig};
//!
//! let mut writer = HwpxWriter::new(&StyleConfig::default());
//! let fragments = writer.convert_blocks(
//!     &[Block::Heading(Heading { level: 1, text: vec![Inline::text("Title")] })],
//!     0,
//! );
//! assert!(fragments[0].contains("charPrIDRef=\"7\""));
//! ```

use std::fmt::Write as _;

use panhwpx_ast::{Block, DocumentMeta, Inline, Table};
use tracing::{debug, warn};

use crate::config::{LayoutSettings, StyleConfig};
use crate::error::Result;
use crate::lineseg::{compute_line_segments, line_segments_xml, LineSegment, FLAG_SINGLE};
use crate::math::latex_to_hwp_script;
use crate::section::SectionEnvelope;
use crate::styles::{char_height, ElementType, StyleMap, StyleRef, TABLE_BORDER_FILL_ID};
use crate::table::{normalize_grid, TableGrid};
use crate::text::{escape_xml, extract_plain_blocks, extract_text};

/// Indentation unit: one ideographic space per nesting level
const INDENT: &str = "\u{3000}";
/// Text of a horizontal rule paragraph
const RULE_CHAR: &str = "━";
const RULE_LEN: usize = 30;
/// Marker prepended to bullet list items
const BULLET: &str = "• ";

/// Table geometry in HWPUNIT
const ROW_HEIGHT: u32 = 1800;
const CELL_MARGIN: u32 = 141;

/// Fixed geometry of an equation line
const EQUATION_HEIGHT: u32 = 1600;
const EQUATION_BASELINE: u32 = 1360;
const EQUATION_SPACING: i64 = 400;

const TEXT_OPEN: &str = "<hp:t>";

/// Allocates paragraph and object ids
///
/// Ids are handed out in increasing order starting right after the seed
/// and are never reused within a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParaIdCounter {
    last: u64,
}

impl ParaIdCounter {
    /// Create a counter whose first id is `seed + 1`
    pub fn new(seed: u64) -> Self {
        Self { last: seed }
    }

    /// Next unused id
    pub fn next_id(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    /// The most recently allocated id (the seed if none yet)
    pub fn last(&self) -> u64 {
        self.last
    }
}

/// HWPX Writer for generating section paragraphs from blocks
#[derive(Debug, Clone)]
pub struct HwpxWriter {
    /// Paragraph id allocator
    ids: ParaIdCounter,
    /// Style mapping for element types
    style_map: StyleMap,
    /// Page geometry for line segments and tables
    layout: LayoutSettings,
}

impl HwpxWriter {
    /// Create a new writer with the default style mapping
    pub fn new(config: &StyleConfig) -> Self {
        Self::with_style_map(config, StyleMap::default())
    }

    /// Create a new writer with a custom style map
    pub fn with_style_map(config: &StyleConfig, style_map: StyleMap) -> Self {
        Self {
            ids: ParaIdCounter::new(config.layout.paragraph_id_seed),
            style_map,
            layout: config.layout.clone(),
        }
    }

    /// The id allocator, e.g. to inspect the last id used
    pub fn ids(&self) -> &ParaIdCounter {
        &self.ids
    }

    /// Build a complete section part from a skeleton section
    ///
    /// The result holds the skeleton's envelope, a title block built from
    /// `meta`, and the converted blocks.
    pub fn build_section_xml(
        &mut self,
        skeleton_section: &str,
        blocks: &[Block],
        meta: &DocumentMeta,
    ) -> Result<String> {
        let envelope = SectionEnvelope::parse(skeleton_section)?;

        let mut paragraphs = self.title_block(meta);
        let content = self.convert_blocks(blocks, 0);
        if paragraphs.is_empty() && content.is_empty() {
            paragraphs.push(self.paragraph_xml("", self.style(ElementType::Paragraph)));
        }
        paragraphs.extend(content);

        debug!(
            paragraphs = paragraphs.len(),
            last_id = self.ids.last(),
            "built section"
        );
        Ok(envelope.wrap(paragraphs.as_slice()))
    }

    /// Paragraphs for title, subtitle and an "author | date" line
    ///
    /// An empty separator paragraph follows when any of them is present.
    pub fn title_block(&mut self, meta: &DocumentMeta) -> Vec<String> {
        let mut out = Vec::new();

        if !meta.title.is_empty() {
            out.push(self.paragraph_xml(&meta.title, self.style(ElementType::Title)));
        }
        if !meta.subtitle.is_empty() {
            out.push(self.paragraph_xml(&meta.subtitle, self.style(ElementType::Subtitle)));
        }

        let byline: Vec<&str> = [meta.author.as_str(), meta.date.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();
        if !byline.is_empty() {
            out.push(self.paragraph_xml(&byline.join(" | "), self.style(ElementType::Paragraph)));
        }

        if !out.is_empty() {
            out.push(self.paragraph_xml("", self.style(ElementType::Paragraph)));
        }
        out
    }

    /// Convert blocks to paragraph fragments at an indentation level
    pub fn convert_blocks(&mut self, blocks: &[Block], indent_level: usize) -> Vec<String> {
        let mut out = Vec::new();
        for block in blocks {
            self.convert_block(block, indent_level, &mut out);
        }
        out
    }

    /// Generate fragments for a single block
    fn convert_block(&mut self, block: &Block, indent_level: usize, out: &mut Vec<String>) {
        let indent = INDENT.repeat(indent_level);
        let normal = self.style(ElementType::Paragraph);

        match block {
            Block::Paragraph(inlines) | Block::Plain(inlines) => {
                if let [Inline::Math(_, source)] = inlines.as_slice() {
                    out.push(self.equation_xml(source));
                } else {
                    let text = format!("{}{}", indent, extract_text(inlines));
                    out.push(self.paragraph_xml(&text, normal));
                }
            }
            Block::Heading(heading) => {
                let style = self.style_map.heading(heading.level);
                out.push(self.paragraph_xml(&extract_text(&heading.text), style));
            }
            Block::CodeBlock(code) => {
                let style = self.style(ElementType::CodeBlock);
                for line in code.split('\n') {
                    out.push(self.paragraph_xml(&format!("{}{}", indent, line), style));
                }
            }
            Block::BulletList(items) => {
                for item in items {
                    let mut fragments = self.convert_blocks(item, indent_level);
                    prefix_first_text(&mut fragments, BULLET);
                    out.extend(fragments);
                }
            }
            Block::OrderedList(list) => {
                for (index, item) in list.items.iter().enumerate() {
                    let mut fragments = self.convert_blocks(item, indent_level);
                    let number = list.start.saturating_add(index as i64);
                    prefix_first_text(&mut fragments, &format!("{}. ", number));
                    out.extend(fragments);
                }
            }
            Block::BlockQuote(children) => {
                out.extend(self.convert_blocks(children, indent_level + 1));
            }
            Block::Table(table) => self.convert_table(table, out),
            Block::HorizontalRule => {
                out.push(self.paragraph_xml(&RULE_CHAR.repeat(RULE_LEN), normal));
            }
            Block::Div(children) => {
                out.extend(self.convert_blocks(children, indent_level));
            }
            Block::DefinitionList(items) => {
                for item in items {
                    let term = format!("{}{}", indent, extract_text(&item.term));
                    out.push(self.paragraph_xml(&term, normal));
                    for definition in &item.definitions {
                        out.extend(self.convert_blocks(definition, indent_level + 1));
                    }
                }
            }
            Block::LineBlock(lines) => {
                for line in lines {
                    let text = format!("{}{}", indent, extract_text(line));
                    out.push(self.paragraph_xml(&text, normal));
                }
            }
            Block::Raw(..) | Block::Figure(_) | Block::Null => {}
            Block::Unknown(tag) => {
                warn!(tag = %tag, "skipping unsupported block");
            }
        }
    }

    fn convert_table(&mut self, table: &Table, out: &mut Vec<String>) {
        let grid = normalize_grid(&table.head, &table.bodies);
        if grid.is_empty() {
            debug!("skipping table without cells");
            return;
        }

        let caption = extract_plain_blocks(&table.caption);
        if !caption.is_empty() {
            out.push(self.paragraph_xml(&caption, self.style(ElementType::Caption)));
        }
        out.push(self.table_xml(&grid));
    }

    fn style(&self, element: ElementType) -> StyleRef {
        self.style_map.get(element)
    }

    /// Build a text paragraph with computed line segments
    pub fn paragraph_xml(&mut self, text: &str, style: StyleRef) -> String {
        let width = self.layout.page_text_width;
        self.paragraph_with_width(text, style, width)
    }

    fn paragraph_with_width(&mut self, text: &str, style: StyleRef, width: u32) -> String {
        let id = self.ids.next_id();
        let height = char_height(style.char_pr_id, self.layout.normal_char_height);
        let segments =
            compute_line_segments(text, height, self.layout.line_spacing_percent, width);

        let mut xml = paragraph_open(id, style);
        let _ = write!(
            xml,
            "<hp:run charPrIDRef=\"{}\"><hp:t>{}</hp:t></hp:run>",
            style.char_pr_id,
            escape_xml(text)
        );
        xml.push_str(&line_segments_xml(&segments));
        xml.push_str("</hp:p>");
        xml
    }

    /// Build a paragraph holding an equation object
    pub fn equation_xml(&mut self, latex: &str) -> String {
        let id = self.ids.next_id();
        let script = latex_to_hwp_script(latex);
        let segment = LineSegment {
            text_pos: 0,
            vert_pos: 0,
            vert_size: EQUATION_HEIGHT,
            text_height: EQUATION_HEIGHT,
            baseline: EQUATION_BASELINE,
            spacing: EQUATION_SPACING,
            horz_pos: 0,
            horz_size: self.layout.page_text_width,
            flags: FLAG_SINGLE,
        };

        let mut xml = paragraph_open(id, self.style(ElementType::Paragraph));
        let _ = write!(
            xml,
            "<hp:run charPrIDRef=\"0\">\
             <hp:equation version=\"eqEdit\" baseLine=\"0\" textColor=\"#000000\" \
             baseUnit=\"1000\" lineMode=\"0\" font=\"\">\
             <hp:script>{}</hp:script></hp:equation></hp:run>",
            escape_xml(&script)
        );
        xml.push_str(&line_segments_xml(&[segment]));
        xml.push_str("</hp:p>");
        xml
    }

    /// Build a paragraph holding a table object
    ///
    /// The table spans the text width with equal columns; the first row is
    /// marked as header.
    pub fn table_xml(&mut self, grid: &TableGrid) -> String {
        let para_id = self.ids.next_id();
        let table_id = self.ids.next_id();
        let page_width = self.layout.page_text_width;
        let col_width = grid.column_width(page_width);
        let row_count = grid.row_count();
        let total_height = ROW_HEIGHT as usize * row_count;
        let normal = self.style(ElementType::Paragraph);

        let mut xml = paragraph_open(para_id, normal);
        let _ = write!(
            xml,
            "<hp:run charPrIDRef=\"0\">\
             <hp:tbl id=\"{table_id}\" zOrder=\"0\" numberingType=\"TABLE\" \
             textWrap=\"TOP_AND_BOTTOM\" textFlow=\"BOTH_SIDES\" lock=\"0\" \
             dropcapstyle=\"None\" pageBreak=\"CELL\" repeatHeader=\"0\" \
             rowCnt=\"{row_count}\" colCnt=\"{cols}\" cellSpacing=\"0\" \
             borderFillIDRef=\"{bf}\" noAdjust=\"0\">\
             <hp:sz width=\"{page_width}\" widthRelTo=\"ABSOLUTE\" height=\"{total_height}\" \
             heightRelTo=\"ABSOLUTE\" protect=\"0\"/>\
             <hp:pos treatAsChar=\"1\" affectLSpacing=\"0\" flowWithText=\"1\" allowOverlap=\"0\" \
             holdAnchorAndSO=\"0\" vertRelTo=\"PARA\" horzRelTo=\"COLUMN\" vertAlign=\"TOP\" \
             horzAlign=\"CENTER\" vertOffset=\"0\" horzOffset=\"0\"/>\
             <hp:outMargin left=\"0\" right=\"0\" top=\"{m}\" bottom=\"{m}\"/>\
             <hp:inMargin left=\"0\" right=\"0\" top=\"0\" bottom=\"0\"/>",
            cols = grid.col_count,
            bf = TABLE_BORDER_FILL_ID,
            m = CELL_MARGIN,
        );

        for (row_index, row) in grid.rows.iter().enumerate() {
            xml.push_str("<hp:tr>");
            for (col_index, cell) in row.iter().enumerate() {
                let header = if row_index == 0 { "1" } else { "0" };
                let cell_paragraph = self.paragraph_with_width(cell, normal, col_width);
                let _ = write!(
                    xml,
                    "<hp:tc name=\"\" header=\"{header}\" hasMargin=\"0\" protect=\"0\" \
                     editable=\"0\" dirty=\"0\" borderFillIDRef=\"{bf}\">\
                     <hp:subList id=\"\" textDirection=\"HORIZONTAL\" lineWrap=\"BREAK\" \
                     vertAlign=\"CENTER\" linkListIDRef=\"0\" linkListNextIDRef=\"0\" \
                     textWidth=\"0\" textHeight=\"0\" hasTextRef=\"0\" hasNumRef=\"0\">\
                     {cell_paragraph}</hp:subList>\
                     <hp:cellAddr colAddr=\"{col_index}\" rowAddr=\"{row_index}\"/>\
                     <hp:cellSpan colSpan=\"1\" rowSpan=\"1\"/>\
                     <hp:cellSz width=\"{col_width}\" height=\"{ROW_HEIGHT}\"/>\
                     <hp:cellMargin left=\"{m}\" right=\"{m}\" top=\"{m}\" bottom=\"{m}\"/>\
                     </hp:tc>",
                    bf = TABLE_BORDER_FILL_ID,
                    m = CELL_MARGIN,
                );
            }
            xml.push_str("</hp:tr>");
        }

        xml.push_str("</hp:tbl><hp:t></hp:t></hp:run></hp:p>");
        xml
    }
}

fn paragraph_open(id: u64, style: StyleRef) -> String {
    format!(
        "<hp:p id=\"{}\" paraPrIDRef=\"{}\" styleIDRef=\"{}\" pageBreak=\"0\" \
         columnBreak=\"0\" merged=\"0\">",
        id, style.para_pr_id, style.style_id
    )
}

/// Insert a list marker at the start of the first text run of an item
///
/// Line segments were computed without the marker.
fn prefix_first_text(fragments: &mut [String], marker: &str) {
    if let Some(first) = fragments.first_mut() {
        if let Some(pos) = first.find(TEXT_OPEN) {
            first.insert_str(pos + TEXT_OPEN.len(), marker);
        }
    }
}
