//! Package fidelity tests
//!
//! A converted package must be the skeleton with three parts rewritten:
//! all other entries keep their bytes, order and compression, and the
//! patched header only ever grows its style catalogs.

use std::io::{Cursor, Read};

use panhwpx_ast::{Block, Inline, PandocDocument};
use panhwpx_hwpx::test_utils::{
    create_skeleton, part_names, read_part, PASS_THROUGH_PARTS, SKELETON_HEADER_XML,
};
use panhwpx_hwpx::{HwpxConverter, Skeleton};
use tempfile::TempDir;
use zip::{CompressionMethod, ZipArchive};

// ============================================================================
// Helpers
// ============================================================================

fn sample_document() -> PandocDocument {
    PandocDocument::with_blocks(vec![
        Block::Paragraph(vec![Inline::text("첫 문단")]),
        Block::CodeBlock("fn main() {}".to_string()),
    ])
}

fn convert() -> (Vec<u8>, Vec<u8>) {
    let skeleton_bytes = create_skeleton();
    let skeleton = Skeleton::from_bytes(skeleton_bytes.clone()).unwrap();
    let out = HwpxConverter::default()
        .convert(&sample_document(), &skeleton)
        .unwrap();
    (skeleton_bytes, out)
}

/// Compressed bytes, CRC and compression method of an entry
fn raw_entry(package: &[u8], name: &str) -> (Vec<u8>, u32, CompressionMethod) {
    let mut archive = ZipArchive::new(Cursor::new(package)).unwrap();
    for index in 0..archive.len() {
        let mut entry = archive.by_index_raw(index).unwrap();
        if entry.name() == name {
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes).unwrap();
            return (bytes, entry.crc32(), entry.compression());
        }
    }
    panic!("entry {name} not found");
}

/// Declared itemCnt of a catalog element
fn item_count(xml: &str, catalog: &str) -> usize {
    let start = xml.find(&format!("<{catalog} itemCnt=\"")).unwrap() + catalog.len() + 11;
    let end = start + xml[start..].find('"').unwrap();
    xml[start..end].parse().unwrap()
}

/// Content between a catalog's start tag and its closing tag
fn catalog_body<'a>(xml: &'a str, catalog: &str) -> &'a str {
    let open = xml.find(&format!("<{catalog} ")).unwrap();
    let start = open + xml[open..].find('>').unwrap() + 1;
    let end = xml.find(&format!("</{catalog}>")).unwrap();
    &xml[start..end]
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_untouched_parts_byte_identical() {
    let (skeleton, out) = convert();
    for (name, _) in PASS_THROUGH_PARTS {
        assert_eq!(raw_entry(&out, name), raw_entry(&skeleton, name), "{name}");
    }
    assert_eq!(raw_entry(&out, "mimetype"), raw_entry(&skeleton, "mimetype"));
}

#[test]
fn test_entry_order_preserved() {
    let (skeleton, out) = convert();
    let names = part_names(&out);
    assert_eq!(names, part_names(&skeleton));
    assert_eq!(names[0], "mimetype");
    assert_eq!(raw_entry(&out, "mimetype").2, CompressionMethod::Stored);
}

#[test]
fn test_catalogs_grow_monotonically() {
    let (_, out) = convert();
    let header = read_part(&out, "Contents/header.xml").unwrap();

    for (catalog, added) in [("hh:charProperties", 4), ("hh:borderFills", 1)] {
        assert_eq!(
            item_count(&header, catalog),
            item_count(SKELETON_HEADER_XML, catalog) + added,
            "{catalog}"
        );
        // Existing entries come through unchanged, new ones are appended
        assert!(
            catalog_body(&header, catalog).starts_with(catalog_body(SKELETON_HEADER_XML, catalog)),
            "{catalog}"
        );
    }
}

#[test]
fn test_header_gains_heading_and_code_styles() {
    let (_, out) = convert();
    let header = read_part(&out, "Contents/header.xml").unwrap();

    for id in 7..=10 {
        assert!(header.contains(&format!("<hh:charPr id=\"{id}\"")), "charPr {id}");
    }
    assert!(header.contains("<hh:borderFill id=\"3\""));
    assert!(header.contains("D2Coding"));
    assert_eq!(header.matches("fontCnt=\"3\"").count(), 2);
}

#[test]
fn test_section_keeps_page_setup() {
    let (skeleton, out) = convert();
    let before = read_part(&skeleton, "Contents/section0.xml").unwrap();
    let after = read_part(&out, "Contents/section0.xml").unwrap();

    let setup_end = before.find("</hp:p>").unwrap() + "</hp:p>".len();
    assert!(after.starts_with(&before[..setup_end]));
    assert!(!after.contains("placeholder"));
    assert!(after.contains("<hp:t>첫 문단</hp:t>"));
    assert!(after.contains("<hp:run charPrIDRef=\"10\"><hp:t>fn main() {}</hp:t>"));
}

#[test]
fn test_convert_file_roundtrip_on_disk() {
    let dir = TempDir::new().unwrap();
    let skeleton_path = dir.path().join("Skeleton.hwpx");
    let output_path = dir.path().join("report.hwpx");
    std::fs::write(&skeleton_path, create_skeleton()).unwrap();

    HwpxConverter::default()
        .convert_file(&sample_document(), &skeleton_path, &output_path)
        .unwrap();

    let out = std::fs::read(&output_path).unwrap();
    let skeleton = std::fs::read(&skeleton_path).unwrap();
    assert_eq!(part_names(&out), part_names(&skeleton));
    assert!(read_part(&out, "Contents/section0.xml")
        .unwrap()
        .contains("첫 문단"));
}

#[test]
fn test_conversion_is_repeatable() {
    let skeleton = Skeleton::from_bytes(create_skeleton()).unwrap();
    let converter = HwpxConverter::default();
    let first = converter.convert(&sample_document(), &skeleton).unwrap();
    let second = converter.convert(&sample_document(), &skeleton).unwrap();

    // Each conversion starts its paragraph ids from the configured seed
    assert_eq!(
        read_part(&first, "Contents/section0.xml"),
        read_part(&second, "Contents/section0.xml")
    );
}
