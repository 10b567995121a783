//! Plain-text extraction from inline trees
//!
//! HWPX runs carry plain text only, so every inline wrapper is flattened
//! and its markup dropped.

use panhwpx_ast::{Block, DocumentMeta, Inline, MetaValue, PandocDocument, QuoteKind};

/// Flatten a sequence of inlines to plain text
pub fn extract_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    push_text(&mut out, inlines);
    out
}

fn push_text(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::Math(_, tex) => out.push_str(tex),
            Inline::Space | Inline::SoftBreak => out.push(' '),
            Inline::HardBreak => out.push('\n'),
            Inline::Styled(_, children)
            | Inline::Link(children)
            | Inline::Image(children)
            | Inline::Cite(children)
            | Inline::Span(children) => push_text(out, children),
            Inline::Quoted(kind, children) => {
                let (open, close) = match kind {
                    QuoteKind::DoubleQuote => ('\u{201c}', '\u{201d}'),
                    QuoteKind::SingleQuote => ('\u{2018}', '\u{2019}'),
                };
                out.push(open);
                push_text(out, children);
                out.push(close);
            }
            Inline::Raw(..) | Inline::Note(_) | Inline::Unknown(_) => {}
        }
    }
}

/// Concatenated text of the `Para`/`Plain` blocks in a sequence
///
/// Used for table cells and captions; other block kinds are ignored.
pub fn extract_plain_blocks(blocks: &[Block]) -> String {
    blocks
        .iter()
        .filter_map(|block| match block {
            Block::Paragraph(inlines) | Block::Plain(inlines) => Some(extract_text(inlines)),
            _ => None,
        })
        .collect()
}

/// Plain text of a metadata value
pub fn extract_meta_text(value: &MetaValue) -> String {
    match value {
        MetaValue::String(s) => s.clone(),
        MetaValue::Inlines(inlines) => extract_text(inlines),
        MetaValue::List(items) => items
            .iter()
            .map(extract_meta_text)
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}

/// Title, subtitle, author and date of a document as plain text
pub fn document_meta(doc: &PandocDocument) -> DocumentMeta {
    let field = |key: &str| {
        doc.meta_value(key)
            .map(extract_meta_text)
            .unwrap_or_default()
    };
    DocumentMeta {
        title: field("title"),
        subtitle: field("subtitle"),
        author: field("author"),
        date: field("date"),
    }
}

/// Escape special XML characters
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
