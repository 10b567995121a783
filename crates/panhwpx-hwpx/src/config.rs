//! Converter configuration
//!
//! All settings have defaults matching the bundled skeleton package, so an
//! empty TOML file (or no file at all) yields a working configuration.
//!
//! ```toml
//! [layout]
//! page_text_width = 42520
//! line_spacing_percent = 160
//!
//! [fonts]
//! fallback = "NimbusSanL"
//! code = "D2Coding"
//!
//! [fonts.faces]
//! HANGUL = "NanumSquareOTF"
//!
//! [[spacing]]
//! para_pr_id = 2
//! before = 800
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level converter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Page geometry used by the line segment engine
    pub layout: LayoutSettings,
    /// Per-script font faces written into the header part
    pub fonts: FontSettings,
    /// Spacing before paragraphs of the listed paragraph styles
    pub spacing: Vec<HeadingSpacing>,
}

/// Page geometry, all lengths in HWPUNIT (1/100 pt)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Page width minus left and right margins
    pub page_text_width: u32,
    /// Line spacing in percent of the character height
    pub line_spacing_percent: u32,
    /// Character height of body text (10pt)
    pub normal_char_height: u32,
    /// Paragraph ids are allocated after this value
    pub paragraph_id_seed: u64,
}

/// Font faces per script tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    /// Script tag (`HANGUL`, `LATIN`, ...) to primary face name
    pub faces: BTreeMap<String, String>,
    /// Face for script tags missing from `faces`
    pub fallback: String,
    /// Monospace face used by code blocks
    pub code: String,
}

/// Spacing-before override for one paragraph style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingSpacing {
    /// `hh:paraPr` id
    pub para_pr_id: u32,
    /// Spacing before the paragraph in HWPUNIT
    pub before: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            fonts: FontSettings::default(),
            spacing: vec![
                HeadingSpacing {
                    para_pr_id: 2,
                    before: 800,
                },
                HeadingSpacing {
                    para_pr_id: 3,
                    before: 600,
                },
                HeadingSpacing {
                    para_pr_id: 4,
                    before: 400,
                },
            ],
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            page_text_width: 42520,
            line_spacing_percent: 160,
            normal_char_height: 1000,
            paragraph_id_seed: 3_121_190_098,
        }
    }
}

impl Default for FontSettings {
    fn default() -> Self {
        let faces = [
            ("HANGUL", "NanumSquareOTF"),
            ("LATIN", "NimbusSanL"),
            ("HANJA", "Noto Sans CJK KR"),
            ("JAPANESE", "Noto Sans CJK KR"),
            ("OTHER", "NimbusSanL"),
            ("SYMBOL", "STIX Two Text"),
            ("USER", "NimbusSanL"),
        ]
        .into_iter()
        .map(|(script, face)| (script.to_string(), face.to_string()))
        .collect();

        Self {
            faces,
            fallback: "NimbusSanL".to_string(),
            code: "D2Coding".to_string(),
        }
    }
}

impl FontSettings {
    /// Primary face for a script tag, falling back to [`FontSettings::fallback`]
    pub fn face_for(&self, script: &str) -> &str {
        self.faces
            .get(script)
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

impl StyleConfig {
    /// Parse a configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
