//! Section part envelope
//!
//! `Contents/section0.xml` starts with the XML prolog, the `<hs:sec>` start
//! tag with its namespace declarations and a first paragraph that carries
//! the page setup (`hp:secPr`). Generated content is placed between that
//! paragraph and the closing `</hs:sec>`; everything after the first
//! paragraph in the skeleton is dropped.

use crate::error::{HwpxError, Result};
use crate::xml_span::find_elements;

/// Closing tag of a section part
pub const SECTION_END: &str = "</hs:sec>";

/// The reusable leading part of a skeleton section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionEnvelope<'a> {
    /// Prolog and `<hs:sec ...>` start tag
    pub prefix: &'a str,
    /// The first `hp:p` element, including nested content
    pub first_paragraph: &'a str,
}

impl<'a> SectionEnvelope<'a> {
    /// Locate the envelope in a skeleton section part
    pub fn parse(section_xml: &'a str) -> Result<Self> {
        let sec = find_elements(section_xml, "hs:sec")?
            .into_iter()
            .next()
            .ok_or_else(|| HwpxError::InvalidStructure("section has no <hs:sec> element".into()))?;

        let paragraph = find_elements(section_xml, "hp:p")?
            .into_iter()
            .find(|p| sec.contains(p))
            .ok_or_else(|| {
                HwpxError::InvalidStructure("section has no paragraph carrying secPr".into())
            })?;

        Ok(Self {
            prefix: &section_xml[..sec.start_tag_end],
            first_paragraph: &section_xml[paragraph.range()],
        })
    }

    /// Assemble a complete section part around generated paragraphs
    pub fn wrap<S: AsRef<str>>(&self, paragraphs: &[S]) -> String {
        let body_len: usize = paragraphs.iter().map(|p| p.as_ref().len()).sum();
        let mut xml = String::with_capacity(
            self.prefix.len() + self.first_paragraph.len() + body_len + SECTION_END.len(),
        );
        xml.push_str(self.prefix);
        xml.push_str(self.first_paragraph);
        for paragraph in paragraphs {
            xml.push_str(paragraph.as_ref());
        }
        xml.push_str(SECTION_END);
        xml
    }
}
