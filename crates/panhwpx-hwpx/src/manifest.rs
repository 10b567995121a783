//! Metadata patching of the package manifest (`Contents/content.hpf`)
//!
//! The manifest is an OPF package document. Its `opf:metadata` block holds
//! the title and a list of `<opf:meta name="..." content="text">` fields
//! that Hangul shows in the document properties dialog.

use std::ops::Range;

use chrono::{DateTime, Utc};
use panhwpx_ast::DocumentMeta;
use tracing::debug;

use crate::error::Result;
use crate::text::escape_xml;
use crate::xml_span::{find_elements, splice, ElementSpan};

/// The manifest part path within the HWPX archive
pub const MANIFEST_PATH: &str = "Contents/content.hpf";

/// Timestamp format of the `ModifiedDate` field
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Write document metadata into a manifest
///
/// Fields with an empty value keep whatever the skeleton has, except
/// `ModifiedDate`, which is always set to `now`.
pub fn patch_content_hpf(
    hpf_xml: &str,
    meta: &DocumentMeta,
    now: DateTime<Utc>,
) -> Result<String> {
    let modified = now.format(TIMESTAMP_FORMAT).to_string();
    let mut edits = Vec::new();

    if !meta.title.is_empty() {
        for span in find_elements(hpf_xml, "opf:title")? {
            edits.push(set_text(hpf_xml, &span, "opf:title", &meta.title));
        }
    }

    let fields: [(&str, &str); 4] = [
        ("creator", meta.author.as_str()),
        ("lastsaveby", meta.author.as_str()),
        ("ModifiedDate", modified.as_str()),
        ("date", meta.date.as_str()),
    ];

    let metas = find_elements(hpf_xml, "opf:meta")?;
    for (name, value) in fields {
        if value.is_empty() {
            continue;
        }
        for span in metas.iter().filter(|span| span.attr("name") == Some(name)) {
            edits.push(set_text(hpf_xml, span, "opf:meta", value));
        }
    }

    debug!(fields = edits.len(), "patching manifest metadata");
    Ok(splice(hpf_xml, edits))
}

/// Replace an element's text content, expanding `<x .../>` to `<x ...>v</x>`
fn set_text(xml: &str, span: &ElementSpan, qname: &str, value: &str) -> (Range<usize>, String) {
    let value = escape_xml(value);
    if span.is_empty_element() {
        let open = span.start_tag(xml).trim_end_matches("/>").trim_end();
        (span.range(), format!("{}>{}</{}>", open, value, qname))
    } else {
        (span.start_tag_end..span.end_tag_start, value)
    }
}
