//! Shared test utilities for panhwpx-hwpx
//!
//! This module provides a small but structurally faithful skeleton package
//! and helpers for reading parts back out of generated archives.

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Header part with seven character shapes, two border fills and outline
/// paragraph shapes whose `hc:prev` spacing is zero
pub const SKELETON_HEADER_XML: &str = concat!(
    r##"<?xml version="1.0" encoding="UTF-8" standalone="yes" ?>"##,
    r##"<hh:head xmlns:hh="http://www.hancom.co.kr/hwpml/2011/head" xmlns:hc="http://www.hancom.co.kr/hwpml/2011/core" xmlns:hp="http://www.hancom.co.kr/hwpml/2011/paragraph" version="1.4" secCnt="1">"##,
    r##"<hh:refList>"##,
    r##"<hh:fontfaces itemCnt="2">"##,
    r##"<hh:fontface lang="HANGUL" fontCnt="2"><hh:font id="0" face="함초롬돋움" type="TTF" isEmbedded="0"/><hh:font id="1" face="함초롬바탕" type="TTF" isEmbedded="0"/></hh:fontface>"##,
    r##"<hh:fontface lang="LATIN" fontCnt="1"><hh:font id="0" face="함초롬돋움" type="TTF" isEmbedded="0"/></hh:fontface>"##,
    r##"</hh:fontfaces>"##,
    r##"<hh:borderFills itemCnt="2">"##,
    r##"<hh:borderFill id="1" threeD="0" shadow="0" centerLine="NONE" breakCellSeparateLine="0"><hh:leftBorder type="NONE" width="0.1 mm" color="#000000"/></hh:borderFill>"##,
    r##"<hh:borderFill id="2" threeD="0" shadow="0" centerLine="NONE" breakCellSeparateLine="0"><hh:leftBorder type="NONE" width="0.1 mm" color="#000000"/></hh:borderFill>"##,
    r##"</hh:borderFills>"##,
    r##"<hh:charProperties itemCnt="7">"##,
    r##"<hh:charPr id="0" height="1000" textColor="#000000"/>"##,
    r##"<hh:charPr id="1" height="1000" textColor="#000000"/>"##,
    r##"<hh:charPr id="2" height="900" textColor="#000000"/>"##,
    r##"<hh:charPr id="3" height="900" textColor="#000000"/>"##,
    r##"<hh:charPr id="4" height="900" textColor="#000000"/>"##,
    r##"<hh:charPr id="5" height="1600" textColor="#2E74B5"/>"##,
    r##"<hh:charPr id="6" height="1100" textColor="#000000"/>"##,
    r##"</hh:charProperties>"##,
    r##"<hh:paraProperties itemCnt="4">"##,
    r##"<hh:paraPr id="0"><hh:margin><hc:intent value="0" unit="HWPUNIT"/><hc:prev value="0" unit="HWPUNIT"/></hh:margin></hh:paraPr>"##,
    r##"<hh:paraPr id="2"><hp:switch><hp:case hp:required-namespace="http://www.hancom.co.kr/hwpml/2016/HwpUnitChar"><hh:margin><hc:prev value="0" unit="HWPUNIT"/></hh:margin></hp:case><hp:default><hh:margin><hc:prev value="0" unit="HWPUNIT"/></hh:margin></hp:default></hp:switch></hh:paraPr>"##,
    r##"<hh:paraPr id="3"><hh:margin><hc:prev value="0" unit="HWPUNIT"/></hh:margin></hh:paraPr>"##,
    r##"<hh:paraPr id="4"><hh:margin><hc:prev value="0" unit="HWPUNIT"/></hh:margin></hh:paraPr>"##,
    r##"</hh:paraProperties>"##,
    r##"</hh:refList>"##,
    r##"</hh:head>"##,
);

/// Section part whose first paragraph carries the section properties
pub const SKELETON_SECTION_XML: &str = concat!(
    r##"<?xml version="1.0" encoding="UTF-8" standalone="yes" ?>"##,
    r##"<hs:sec xmlns:hs="http://www.hancom.co.kr/hwpml/2011/section" xmlns:hp="http://www.hancom.co.kr/hwpml/2011/paragraph">"##,
    r##"<hp:p id="3121190098" paraPrIDRef="0" styleIDRef="0" pageBreak="0" columnBreak="0" merged="0">"##,
    r##"<hp:run charPrIDRef="0"><hp:secPr id="" textDirection="HORIZONTAL"><hp:pagePr landscape="WIDELY" width="59528" height="84186"/></hp:secPr></hp:run>"##,
    r##"</hp:p>"##,
    r##"<hp:p id="3121190099" paraPrIDRef="0" styleIDRef="0" pageBreak="0" columnBreak="0" merged="0"><hp:run charPrIDRef="0"><hp:t>placeholder</hp:t></hp:run></hp:p>"##,
    r##"</hs:sec>"##,
);

/// Package manifest with empty metadata fields
pub const SKELETON_CONTENT_HPF: &str = concat!(
    r##"<?xml version="1.0" encoding="UTF-8" standalone="yes" ?>"##,
    r##"<opf:package xmlns:opf="http://www.idpf.org/2007/opf/" version="" unique-identifier="" id="">"##,
    r##"<opf:metadata>"##,
    r##"<opf:title/>"##,
    r##"<opf:language>ko</opf:language>"##,
    r##"<opf:meta name="creator" content="text"/>"##,
    r##"<opf:meta name="subject" content="text"/>"##,
    r##"<opf:meta name="lastsaveby" content="text">skeleton</opf:meta>"##,
    r##"<opf:meta name="CreatedDate" content="text">2020-01-01T00:00:00Z</opf:meta>"##,
    r##"<opf:meta name="ModifiedDate" content="text">2020-01-01T00:00:00Z</opf:meta>"##,
    r##"<opf:meta name="date" content="text"/>"##,
    r##"</opf:metadata>"##,
    r##"<opf:manifest><opf:item id="header" href="Contents/header.xml" media-type="application/xml"/><opf:item id="section0" href="Contents/section0.xml" media-type="application/xml"/></opf:manifest>"##,
    r##"</opf:package>"##,
);

/// Parts that are copied through untouched
pub const PASS_THROUGH_PARTS: &[(&str, &str)] = &[
    (
        "version.xml",
        r##"<?xml version="1.0" encoding="UTF-8" standalone="yes" ?><hv:HCFVersion xmlns:hv="http://www.hancom.co.kr/hwpml/2011/version" tagetApplication="WORDPROCESSOR" major="5" minor="1"/>"##,
    ),
    (
        "META-INF/container.xml",
        r##"<?xml version="1.0" encoding="UTF-8" standalone="yes" ?><ocf:container xmlns:ocf="urn:oasis:names:tc:opendocument:xmlns:container"><ocf:rootfiles><ocf:rootfile full-path="Contents/content.hpf" media-type="application/hwpml-package+xml"/></ocf:rootfiles></ocf:container>"##,
    ),
    ("Preview/PrvText.txt", "미리 보기 텍스트"),
];

/// Create a skeleton HWPX package for testing
///
/// This creates a ZIP with:
/// - mimetype (stored, first entry)
/// - version.xml, META-INF/container.xml, Preview/PrvText.txt (deflated)
/// - Contents/header.xml, Contents/section0.xml, Contents/content.hpf
pub fn create_skeleton() -> Vec<u8> {
    let mut parts: Vec<(&str, &str)> = vec![
        ("Contents/header.xml", SKELETON_HEADER_XML),
        ("Contents/section0.xml", SKELETON_SECTION_XML),
        ("Contents/content.hpf", SKELETON_CONTENT_HPF),
    ];
    parts.extend_from_slice(PASS_THROUGH_PARTS);
    create_skeleton_with(&parts)
}

/// Create a skeleton containing `mimetype` plus the given parts
pub fn create_skeleton_with(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    zip.start_file("mimetype", stored).unwrap();
    zip.write_all(b"application/hwp+zip").unwrap();

    for (name, content) in parts {
        zip.start_file(*name, deflated).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }

    zip.finish().unwrap();
    buffer.into_inner()
}

/// Read a part of an archive as a string
pub fn read_part(package: &[u8], name: &str) -> Option<String> {
    let mut archive = ZipArchive::new(Cursor::new(package)).unwrap();
    let mut file = archive.by_name(name).ok()?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).unwrap();
    Some(contents)
}

/// Entry names of an archive in stored order
pub fn part_names(package: &[u8]) -> Vec<String> {
    let mut archive = ZipArchive::new(Cursor::new(package)).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index_raw(i).unwrap().name().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_skeleton() {
        let skeleton = create_skeleton();
        let names = part_names(&skeleton);

        assert_eq!(names[0], "mimetype");
        assert!(names.contains(&"Contents/header.xml".to_string()));
        assert!(names.contains(&"Contents/section0.xml".to_string()));
        assert!(names.contains(&"Contents/content.hpf".to_string()));
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_read_part() {
        let skeleton = create_skeleton();
        assert_eq!(
            read_part(&skeleton, "mimetype").as_deref(),
            Some("application/hwp+zip")
        );
        assert!(read_part(&skeleton, "Contents/header.xml")
            .unwrap()
            .contains("hh:charProperties"));
        assert!(read_part(&skeleton, "nonexistent.xml").is_none());
    }
}
