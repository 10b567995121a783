//! Style catalog patching of `Contents/header.xml`
//!
//! The skeleton's header part declares the numbered resources paragraphs
//! refer to. Conversion needs a few more of them: character shapes for
//! headings and code, a solid border fill for table cells, per-script font
//! faces and spacing before outline headings. Each edit is located with
//! [`find_elements`] and spliced into the original text, so the rest of
//! the part keeps its exact bytes.
//!
//! Catalogs are append-only: existing entries are never touched and the
//! catalog's `itemCnt` is raised by the number of entries added.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use tracing::{debug, warn};

use crate::config::{FontSettings, HeadingSpacing, StyleConfig};
use crate::error::{HwpxError, Result};
use crate::styles::{added_char_shapes, CharShape, TABLE_BORDER_FILL_ID};
use crate::text::escape_xml;
use crate::xml_span::{find_elements, replace_attribute, splice, ElementSpan};

/// Script tags of the per-script attributes on `hh:fontRef` and friends
const SCRIPTS: [&str; 7] = [
    "hangul", "latin", "hanja", "japanese", "other", "symbol", "user",
];

/// Element names accepted for the border fill catalog
const BORDER_FILL_CATALOGS: [&str; 2] = ["hh:borderFills", "hh:borderFillList"];

/// Add the converter's style resources to a header part
pub fn patch_header_xml(header_xml: &str, config: &StyleConfig) -> Result<String> {
    let xml = replace_font_faces(header_xml, &config.fonts)?;

    let char_prs: Vec<String> = added_char_shapes().map(|shape| char_pr_xml(&shape)).collect();
    let xml = append_to_catalog(&xml, &["hh:charProperties"], "hh:charPr", &char_prs)?;

    let border_fill = vec![border_fill_xml(TABLE_BORDER_FILL_ID)];
    let xml = append_to_catalog(&xml, &BORDER_FILL_CATALOGS, "hh:borderFill", &border_fill)?;

    apply_heading_spacing(&xml, &config.spacing)
}

/// Replace every `hh:fontface` block with the configured faces
///
/// Each block gets three fonts: ids 0 and 1 are the script's primary face,
/// id 2 is the code face referenced by the code character shape.
fn replace_font_faces(xml: &str, fonts: &FontSettings) -> Result<String> {
    let mut edits = Vec::new();

    for span in find_elements(xml, "hh:fontface")? {
        let Some(lang) = span.attr("lang") else {
            debug!("fontface without lang attribute left unchanged");
            continue;
        };

        let primary = escape_xml(fonts.face_for(lang));
        let code = escape_xml(&fonts.code);
        let mut block = format!("<hh:fontface lang=\"{}\" fontCnt=\"3\">", lang);
        block.push_str(&font_xml(0, &primary));
        block.push_str(&font_xml(1, &primary));
        block.push_str(&font_xml(2, &code));
        block.push_str("</hh:fontface>");

        edits.push((span.range(), block));
    }

    debug!(count = edits.len(), "replacing font faces");
    Ok(splice(xml, edits))
}

/// Append entries to the first catalog found under any of `catalog_names`
fn append_to_catalog(
    xml: &str,
    catalog_names: &[&str],
    entry_name: &str,
    entries: &[String],
) -> Result<String> {
    let (catalog_name, catalog) = find_catalog(xml, catalog_names)?;

    let existing = find_elements(xml, entry_name)?
        .iter()
        .filter(|entry| catalog.contains(entry))
        .count();
    let declared = declared_count(&catalog, catalog_name)?;
    if declared != existing {
        return Err(HwpxError::StyleCatalog(format!(
            "<{}> declares itemCnt=\"{}\" but contains {} <{}> entries",
            catalog_name, declared, existing, entry_name
        )));
    }

    let new_count = (declared + entries.len()).to_string();
    let start_tag = catalog.start_tag(xml);
    let new_start_tag = replace_attribute(start_tag, "itemCnt", &new_count).ok_or_else(|| {
        HwpxError::StyleCatalog(format!("<{}> has no itemCnt attribute", catalog_name))
    })?;
    let added: String = entries.concat();

    debug!(
        catalog = catalog_name,
        from = declared,
        to = %new_count,
        "appending catalog entries"
    );

    let edits = if catalog.is_empty_element() {
        let open = new_start_tag
            .trim_end_matches("/>")
            .trim_end()
            .to_string();
        vec![(
            catalog.range(),
            format!("{}>{}</{}>", open, added, catalog_name),
        )]
    } else {
        vec![
            (catalog.start..catalog.start_tag_end, new_start_tag),
            (catalog.end_tag_start..catalog.end_tag_start, added),
        ]
    };

    Ok(splice(xml, edits))
}

fn find_catalog<'n>(xml: &str, catalog_names: &[&'n str]) -> Result<(&'n str, ElementSpan)> {
    for name in catalog_names {
        if let Some(span) = find_elements(xml, name)?.into_iter().next() {
            return Ok((name, span));
        }
    }
    Err(HwpxError::StyleCatalog(format!(
        "catalog <{}> not found in header",
        catalog_names.join("> or <")
    )))
}

fn declared_count(catalog: &ElementSpan, catalog_name: &str) -> Result<usize> {
    let raw = catalog.attr("itemCnt").ok_or_else(|| {
        HwpxError::StyleCatalog(format!("<{}> has no itemCnt attribute", catalog_name))
    })?;
    raw.trim().parse().map_err(|_| {
        HwpxError::StyleCatalog(format!(
            "<{}> has unparsable itemCnt=\"{}\"",
            catalog_name, raw
        ))
    })
}

/// Set the spacing before paragraphs of the configured paragraph shapes
///
/// Only `hc:prev` elements inside the matching `hh:paraPr` whose value is
/// still zero are changed; both branches of an `hp:switch` are covered.
fn apply_heading_spacing(xml: &str, spacing: &[HeadingSpacing]) -> Result<String> {
    if spacing.is_empty() {
        return Ok(xml.to_string());
    }

    // A later entry for the same paraPr wins
    let wanted: BTreeMap<u32, u32> = spacing
        .iter()
        .map(|entry| (entry.para_pr_id, entry.before))
        .collect();

    let para_prs = find_elements(xml, "hh:paraPr")?;
    let prevs = find_elements(xml, "hc:prev")?;
    let mut edits = Vec::new();

    for (para_pr_id, before) in wanted {
        let id = para_pr_id.to_string();
        let Some(para_pr) = para_prs.iter().find(|span| span.attr("id") == Some(id.as_str()))
        else {
            warn!(para_pr_id, "paragraph shape not found, spacing not applied");
            continue;
        };

        for prev in prevs
            .iter()
            .filter(|prev| para_pr.contains(prev) && prev.attr("value") == Some("0"))
        {
            let tag = prev.start_tag(xml);
            if let Some(new_tag) = replace_attribute(tag, "value", &before.to_string()) {
                edits.push((prev.start..prev.start_tag_end, new_tag));
            }
        }
    }

    Ok(splice(xml, edits))
}

fn char_pr_xml(shape: &CharShape) -> String {
    let per_script = |value: u32| -> String {
        SCRIPTS
            .iter()
            .map(|script| format!(" {}=\"{}\"", script, value))
            .collect()
    };

    let mut xml = String::new();
    let _ = write!(
        xml,
        "<hh:charPr id=\"{}\" height=\"{}\" textColor=\"#000000\" shadeColor=\"none\" \
         useFontSpace=\"0\" useKerning=\"0\" symMark=\"NONE\" borderFillIDRef=\"2\"{}>",
        shape.id,
        shape.height,
        if shape.bold { " bold=\"1\"" } else { "" }
    );
    let _ = write!(xml, "<hh:fontRef{}/>", per_script(shape.font_ref));
    let _ = write!(xml, "<hh:ratio{}/>", per_script(100));
    let _ = write!(xml, "<hh:spacing{}/>", per_script(0));
    let _ = write!(xml, "<hh:relSz{}/>", per_script(100));
    let _ = write!(xml, "<hh:offset{}/>", per_script(0));
    xml.push_str("<hh:underline type=\"NONE\" shape=\"SOLID\" color=\"#000000\"/>");
    xml.push_str("<hh:strikeout shape=\"NONE\" color=\"#000000\"/>");
    xml.push_str("<hh:outline type=\"NONE\"/>");
    xml.push_str("<hh:shadow type=\"NONE\" color=\"#C0C0C0\" offsetX=\"10\" offsetY=\"10\"/>");
    xml.push_str("</hh:charPr>");
    xml
}

fn border_fill_xml(id: u32) -> String {
    let mut xml = format!(
        "<hh:borderFill id=\"{}\" threeD=\"0\" shadow=\"0\" centerLine=\"NONE\" \
         breakCellSeparateLine=\"0\">",
        id
    );
    xml.push_str("<hh:slash type=\"NONE\" Crooked=\"0\" isCounter=\"0\"/>");
    xml.push_str("<hh:backSlash type=\"NONE\" Crooked=\"0\" isCounter=\"0\"/>");
    for edge in ["left", "right", "top", "bottom"] {
        let _ = write!(
            xml,
            "<hh:{}Border type=\"SOLID\" width=\"0.12 mm\" color=\"#000000\"/>",
            edge
        );
    }
    xml.push_str("<hh:diagonal type=\"NONE\" width=\"0.12 mm\" color=\"#000000\"/>");
    xml.push_str("</hh:borderFill>");
    xml
}

fn font_xml(id: u32, face: &str) -> String {
    format!(
        "<hh:font id=\"{}\" face=\"{}\" type=\"TTF\" isEmbedded=\"0\">\
         <hh:typeInfo familyType=\"FCAT_GOTHIC\" weight=\"6\" proportion=\"4\" contrast=\"0\" \
         strokeVariation=\"1\" armStyle=\"1\" letterform=\"1\" midline=\"1\" xHeight=\"1\"/>\
         </hh:font>",
        id, face
    )
}
