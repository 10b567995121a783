//! Byte spans of XML elements
//!
//! The template patcher edits parts that must otherwise stay byte-for-byte
//! identical, so it cannot round-trip them through a DOM. Instead a
//! pull-parse records where each element of interest starts and ends, and
//! edits are spliced into the original text at those offsets.

use std::ops::Range;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::Result;

/// Location of one element in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpan {
    /// Offset of the `<` of the start tag
    pub start: usize,
    /// Offset just past the `>` of the start tag
    pub start_tag_end: usize,
    /// Offset of the `<` of the end tag; equals `end` for empty elements
    pub end_tag_start: usize,
    /// Offset just past the element
    pub end: usize,
    /// Attributes of the start tag in document order, raw values
    pub attributes: Vec<(String, String)>,
}

impl ElementSpan {
    /// Whether the element was written as `<name .../>`
    pub fn is_empty_element(&self) -> bool {
        self.start_tag_end == self.end
    }

    /// Value of an attribute by qualified name
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The start tag text, e.g. `<hh:charProperties itemCnt="7">`
    pub fn start_tag<'a>(&self, xml: &'a str) -> &'a str {
        &xml[self.start..self.start_tag_end]
    }

    /// Byte range of the whole element
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether `other` lies entirely inside this element's content
    pub fn contains(&self, other: &ElementSpan) -> bool {
        other.start >= self.start_tag_end && other.end <= self.end_tag_start
    }
}

/// Find every element with the given qualified name (e.g. `hh:charPr`)
///
/// Spans are returned in document order of their start tags. Nested
/// elements of the same name are reported individually.
pub fn find_elements(xml: &str, qname: &str) -> Result<Vec<ElementSpan>> {
    let name = qname.as_bytes();
    let mut reader = Reader::from_str(xml);
    let mut open: Vec<(usize, usize, Vec<(String, String)>)> = Vec::new();
    let mut spans = Vec::new();

    loop {
        let before = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(ref e) if e.name().as_ref() == name => {
                let after = reader.buffer_position() as usize;
                open.push((before, after, attributes(e)));
            }
            Event::Empty(ref e) if e.name().as_ref() == name => {
                let after = reader.buffer_position() as usize;
                spans.push(ElementSpan {
                    start: before,
                    start_tag_end: after,
                    end_tag_start: after,
                    end: after,
                    attributes: attributes(e),
                });
            }
            Event::End(ref e) if e.name().as_ref() == name => {
                if let Some((start, start_tag_end, attributes)) = open.pop() {
                    spans.push(ElementSpan {
                        start,
                        start_tag_end,
                        end_tag_start: before,
                        end: reader.buffer_position() as usize,
                        attributes,
                    });
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    spans.sort_by_key(|span| span.start);
    Ok(spans)
}

fn attributes(e: &BytesStart) -> Vec<(String, String)> {
    e.attributes()
        .filter_map(|a| a.ok())
        .map(|a| {
            let key = String::from_utf8_lossy(a.key.as_ref()).into_owned();
            let value = String::from_utf8_lossy(&a.value).into_owned();
            (key, value)
        })
        .collect()
}

/// Rewrite one attribute value inside a start tag, keeping all other text
///
/// Returns `None` if the tag has no such attribute.
pub fn replace_attribute(start_tag: &str, key: &str, value: &str) -> Option<String> {
    let needle = format!("{}=", key);
    let mut search_from = 0;

    while let Some(found) = start_tag[search_from..].find(&needle) {
        let key_pos = search_from + found;
        let preceded_by_space = start_tag[..key_pos]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace);
        let value_start = key_pos + needle.len();
        let quote = start_tag[value_start..].chars().next();

        if let (true, Some(q @ ('"' | '\''))) = (preceded_by_space, quote) {
            let open = value_start + 1;
            let close = open + start_tag[open..].find(q)?;
            return Some(format!(
                "{}{}{}",
                &start_tag[..open],
                value,
                &start_tag[close..]
            ));
        }
        search_from = value_start;
    }

    None
}

/// Apply non-overlapping replacements to a string
///
/// Ranges may be given in any order; text outside them is copied unchanged.
pub fn splice(xml: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    edits.sort_by_key(|(range, _)| range.start);
    let mut out = String::with_capacity(xml.len());
    let mut cursor = 0;
    for (range, replacement) in edits {
        out.push_str(&xml[cursor..range.start]);
        out.push_str(&replacement);
        cursor = range.end;
    }
    out.push_str(&xml[cursor..]);
    out
}
