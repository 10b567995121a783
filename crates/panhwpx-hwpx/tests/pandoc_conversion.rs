//! End-to-end conversion tests
//!
//! Each test decodes a Pandoc JSON document, converts it against the
//! in-memory skeleton package and inspects the generated section.

use chrono::{TimeZone, Utc};
use panhwpx_ast::PandocDocument;
use panhwpx_hwpx::test_utils::{create_skeleton, read_part};
use panhwpx_hwpx::{HwpxConverter, Skeleton, StyleConfig};
use serde_json::{json, Value};

// ============================================================================
// Helpers
// ============================================================================

fn document(blocks: Value) -> PandocDocument {
    document_with_meta(json!({}), blocks)
}

fn document_with_meta(meta: Value, blocks: Value) -> PandocDocument {
    let json = json!({
        "pandoc-api-version": [1, 23, 1],
        "meta": meta,
        "blocks": blocks
    });
    PandocDocument::from_json_str(&json.to_string()).unwrap()
}

fn convert(doc: &PandocDocument) -> Vec<u8> {
    let skeleton = Skeleton::from_bytes(create_skeleton()).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
    HwpxConverter::new(StyleConfig::default())
        .convert_at(doc, &skeleton, now)
        .unwrap()
}

fn section(doc: &PandocDocument) -> String {
    read_part(&convert(doc), "Contents/section0.xml").unwrap()
}

/// Generated paragraphs as (charPrIDRef, text) pairs, skipping the
/// skeleton's leading paragraph
fn runs(section: &str) -> Vec<(String, String)> {
    let body = section.split("</hp:secPr>").nth(1).unwrap_or(section);
    body.split("<hp:run charPrIDRef=\"")
        .skip(1)
        .map(|chunk| {
            let char_pr = chunk[..chunk.find('"').unwrap()].to_string();
            let text = chunk
                .split("<hp:t>")
                .nth(1)
                .map(|t| t[..t.find("</hp:t>").unwrap()].to_string())
                .unwrap_or_default();
            (char_pr, text)
        })
        .collect()
}

/// Text of each table cell in document order
fn cell_texts(section: &str) -> Vec<String> {
    section
        .split("<hp:subList ")
        .skip(1)
        .map(|chunk| {
            let sub_list = &chunk[..chunk.find("</hp:subList>").unwrap()];
            runs(&format!("</hp:secPr>{sub_list}"))
                .into_iter()
                .map(|(_, text)| text)
                .collect::<String>()
        })
        .collect()
}

fn str_inline(s: &str) -> Value {
    json!({"t": "Str", "c": s})
}

fn para(s: &str) -> Value {
    json!({"t": "Para", "c": [str_inline(s)]})
}

fn plain_cell(s: &str) -> Value {
    json!([["", [], []], {"t": "AlignDefault"}, 1, 1, [{"t": "Plain", "c": [str_inline(s)]}]])
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_heading_and_emphasis() {
    let doc = document(json!([
        {"t": "Header", "c": [1, ["title", [], []], [str_inline("Title")]]},
        {"t": "Para", "c": [
            str_inline("Hello"),
            {"t": "Space"},
            {"t": "Emph", "c": [str_inline("world")]}
        ]}
    ]));
    let xml = section(&doc);

    assert_eq!(
        runs(&xml),
        vec![
            ("7".to_string(), "Title".to_string()),
            ("0".to_string(), "Hello world".to_string()),
        ]
    );
    assert!(xml.contains("paraPrIDRef=\"2\" styleIDRef=\"2\""));
}

#[test]
fn test_code_block_lines() {
    let doc = document(json!([
        {"t": "CodeBlock", "c": [["", ["rust"], []], "a\nb"]}
    ]));
    assert_eq!(
        runs(&section(&doc)),
        vec![
            ("10".to_string(), "a".to_string()),
            ("10".to_string(), "b".to_string()),
        ]
    );
}

#[test]
fn test_ordered_list_start() {
    let doc = document(json!([
        {"t": "OrderedList", "c": [
            [3, {"t": "Decimal"}, {"t": "Period"}],
            [[para("x")], [para("y")]]
        ]}
    ]));
    let texts: Vec<String> = runs(&section(&doc)).into_iter().map(|(_, t)| t).collect();
    assert_eq!(texts, vec!["3. x", "4. y"]);
}

#[test]
fn test_table_with_ragged_rows() {
    let doc = document(json!([
        {"t": "Table", "c": [
            ["", [], []],
            [null, []],
            [[{"t": "AlignDefault"}, {"t": "ColWidthDefault"}],
             [{"t": "AlignDefault"}, {"t": "ColWidthDefault"}]],
            [["", [], []], [[["", [], []], [plain_cell("A"), plain_cell("B")]]]],
            [[["", [], []], 0, [], [[["", [], []], [plain_cell("1")]]]]],
            [["", [], []], []]
        ]}
    ]));
    let xml = section(&doc);

    assert!(xml.contains("rowCnt=\"2\" colCnt=\"2\""));
    assert!(xml.contains("borderFillIDRef=\"3\""));
    assert_eq!(cell_texts(&xml), vec!["A", "B", "1", ""]);
    assert_eq!(xml.matches("header=\"1\"").count(), 2);
}

#[test]
fn test_display_math() {
    let doc = document(json!([
        {"t": "Para", "c": [{"t": "Math", "c": [{"t": "DisplayMath"}, "\\frac{1}{2}"]}]}
    ]));
    let xml = section(&doc);
    assert!(xml.contains("<hp:script>{1} over {2}</hp:script>"));
}

// ============================================================================
// Document level behavior
// ============================================================================

#[test]
fn test_title_block_from_metadata() {
    let doc = document_with_meta(
        json!({
            "title": {"t": "MetaInlines", "c": [str_inline("Report")]},
            "author": {"t": "MetaList", "c": [
                {"t": "MetaInlines", "c": [str_inline("Kim")]}
            ]},
            "date": {"t": "MetaString", "c": "2026-03-01"}
        }),
        json!([para("Body")]),
    );
    let package = convert(&doc);
    let xml = read_part(&package, "Contents/section0.xml").unwrap();

    assert_eq!(
        runs(&xml),
        vec![
            ("7".to_string(), "Report".to_string()),
            ("0".to_string(), "Kim | 2026-03-01".to_string()),
            ("0".to_string(), String::new()),
            ("0".to_string(), "Body".to_string()),
        ]
    );

    let manifest = read_part(&package, "Contents/content.hpf").unwrap();
    assert!(manifest.contains("<opf:title>Report</opf:title>"));
    assert!(manifest.contains(">Kim</opf:meta>"));
    assert!(manifest.contains(">2026-03-01T09:30:00Z</opf:meta>"));
}

#[test]
fn test_empty_document_gets_one_paragraph() {
    let xml = section(&document(json!([])));
    assert_eq!(runs(&xml), vec![("0".to_string(), String::new())]);
    assert!(xml.ends_with("</hs:sec>"));
}

#[test]
fn test_unknown_nodes_are_skipped() {
    let doc = document(json!([
        {"t": "Sidebar", "c": [1, 2, 3]},
        {"t": "Para", "c": [str_inline("kept"), {"t": "Sparkle", "c": "?"}]},
        {"t": "RawBlock", "c": ["html", "<br>"]}
    ]));
    let texts: Vec<String> = runs(&section(&doc)).into_iter().map(|(_, t)| t).collect();
    assert_eq!(texts, vec!["kept"]);
}

#[test]
fn test_paragraph_ids_follow_skeleton_seed() {
    let xml = section(&document(json!([para("one"), para("two")])));
    assert!(xml.contains("<hp:p id=\"3121190098\""));
    assert!(xml.contains("<hp:p id=\"3121190099\""));
    assert!(xml.contains("<hp:p id=\"3121190100\""));
}

#[test]
fn test_text_is_escaped() {
    let xml = section(&document(json!([para("a < b & c")])));
    assert!(xml.contains("<hp:t>a &lt; b &amp; c</hp:t>"));
}

#[test]
fn test_malformed_input_rejected() {
    assert!(PandocDocument::from_json_str("{\"blocks\": 3}").is_err());
    assert!(PandocDocument::from_json_str("not json").is_err());
}
