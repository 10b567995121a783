//! Line segment geometry (`hp:linesegarray`)
//!
//! Hangul does not re-layout paragraphs whose line segments are present, so
//! every generated paragraph carries an approximation of where its lines
//! break. Widths are estimated per character: anything above U+2000
//! (Hangul, CJK, fullwidth forms) is as wide as the character height,
//! everything else half as wide. Kerning, ligatures and real font metrics
//! are ignored.

use std::fmt::Write as _;

/// Flag of the first line of a paragraph
pub const FLAG_FIRST: u32 = 0x20000;
/// Flag of the last line of a paragraph
pub const FLAG_LAST: u32 = 0x40000;
/// Flags of a paragraph that fits on one line
pub const FLAG_SINGLE: u32 = FLAG_FIRST | FLAG_LAST;

/// Code points above this are treated as full-width
const WIDE_THRESHOLD: u32 = 0x2000;

/// Geometry of one visual line, in HWPUNIT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSegment {
    /// Character offset where the line starts
    pub text_pos: usize,
    pub vert_pos: i64,
    pub vert_size: u32,
    pub text_height: u32,
    pub baseline: u32,
    pub spacing: i64,
    pub horz_pos: u32,
    pub horz_size: u32,
    pub flags: u32,
}

impl LineSegment {
    pub fn is_first(&self) -> bool {
        self.flags & FLAG_FIRST != 0
    }

    pub fn is_last(&self) -> bool {
        self.flags & FLAG_LAST != 0
    }

    fn write_xml(&self, out: &mut String) {
        let _ = write!(
            out,
            "<hp:lineseg textpos=\"{}\" vertpos=\"{}\" vertsize=\"{}\" textheight=\"{}\" \
             baseline=\"{}\" spacing=\"{}\" horzpos=\"{}\" horzsize=\"{}\" flags=\"{}\"/>",
            self.text_pos,
            self.vert_pos,
            self.vert_size,
            self.text_height,
            self.baseline,
            self.spacing,
            self.horz_pos,
            self.horz_size,
            self.flags
        );
    }
}

/// Compute line segments for a paragraph of text
///
/// Returns at least one segment. Offsets are counted in characters.
pub fn compute_line_segments(
    text: &str,
    char_height: u32,
    line_spacing_percent: u32,
    page_width: u32,
) -> Vec<LineSegment> {
    let height = i64::from(char_height);
    let spacing = height * (i64::from(line_spacing_percent) - 100) / 100;
    let baseline = char_height * 85 / 100;

    let starts = line_starts(text, char_height, page_width);
    let count = starts.len();

    starts
        .into_iter()
        .enumerate()
        .map(|(index, text_pos)| {
            let flags = match (index == 0, index + 1 == count) {
                (true, true) => FLAG_SINGLE,
                (true, false) => FLAG_FIRST,
                (false, true) => FLAG_LAST,
                (false, false) => 0,
            };
            LineSegment {
                text_pos,
                vert_pos: index as i64 * (height + spacing),
                vert_size: char_height,
                text_height: char_height,
                baseline,
                spacing,
                horz_pos: 0,
                horz_size: page_width,
                flags,
            }
        })
        .collect()
}

/// Greedy line breaking on estimated character widths
fn line_starts(text: &str, char_height: u32, page_width: u32) -> Vec<usize> {
    let total = text.chars().count();
    let mut starts = vec![0];
    let mut width: u64 = 0;

    for (index, ch) in text.chars().enumerate() {
        width += if u32::from(ch) > WIDE_THRESHOLD {
            u64::from(char_height)
        } else {
            u64::from(char_height / 2)
        };

        if width > u64::from(page_width) && index + 1 < total {
            starts.push(index + 1);
            width = 0;
        }
    }

    starts
}

/// Serialize segments as an `hp:linesegarray` element
pub fn line_segments_xml(segments: &[LineSegment]) -> String {
    let mut out = String::from("<hp:linesegarray>");
    for segment in segments {
        segment.write_xml(&mut out);
    }
    out.push_str("</hp:linesegarray>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: u32 = 42520;

    #[test]
    fn test_empty_text_single_line() {
        let segments = compute_line_segments("", 1000, 160, WIDTH);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text_pos, 0);
        assert_eq!(segments[0].flags, FLAG_SINGLE);
        assert_eq!(segments[0].flags, 393216);
    }

    #[test]
    fn test_geometry_fields() {
        let segments = compute_line_segments("Hello", 1000, 160, WIDTH);
        let seg = segments[0];
        assert_eq!(seg.vert_pos, 0);
        assert_eq!(seg.vert_size, 1000);
        assert_eq!(seg.text_height, 1000);
        assert_eq!(seg.baseline, 850);
        assert_eq!(seg.spacing, 600);
        assert_eq!(seg.horz_pos, 0);
        assert_eq!(seg.horz_size, WIDTH);
    }

    #[test]
    fn test_latin_wraps_at_half_width() {
        // 500 units per char: the 86th char pushes the width past 42520
        let text = "a".repeat(100);
        let segments = compute_line_segments(&text, 1000, 160, WIDTH);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].text_pos, 86);
        assert_eq!(segments[1].vert_pos, 1600);
        assert_eq!(segments[0].flags, FLAG_FIRST);
        assert_eq!(segments[1].flags, FLAG_LAST);
    }

    #[test]
    fn test_hangul_is_full_width() {
        let text = "가".repeat(100);
        let segments = compute_line_segments(&text, 1000, 160, WIDTH);
        let starts: Vec<_> = segments.iter().map(|s| s.text_pos).collect();
        assert_eq!(starts, vec![0, 43, 86]);
        assert_eq!(segments[1].flags, 0);
    }

    #[test]
    fn test_no_break_after_last_char() {
        // Exactly overflowing on the final character does not open a new line
        let text = "a".repeat(86);
        let segments = compute_line_segments(&text, 1000, 160, WIDTH);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].flags, FLAG_SINGLE);
    }

    #[test]
    fn test_offsets_increase_and_flags_unique() {
        let mixed = "mixed 한글 text ".repeat(40);
        let hangul = "가".repeat(500);
        for text in ["x", mixed.as_str(), hangul.as_str()] {
            let segments = compute_line_segments(text, 1300, 160, 10000);
            assert_eq!(segments[0].text_pos, 0);
            assert!(segments.windows(2).all(|w| w[0].text_pos < w[1].text_pos));
            assert!(segments.windows(2).all(|w| w[0].vert_pos < w[1].vert_pos));
            assert_eq!(segments.iter().filter(|s| s.is_first()).count(), 1);
            assert_eq!(segments.iter().filter(|s| s.is_last()).count(), 1);
            assert!(segments.last().unwrap().is_last());
        }
    }

    #[test]
    fn test_xml_output() {
        let xml = line_segments_xml(&compute_line_segments("", 1000, 160, WIDTH));
        assert_eq!(
            xml,
            "<hp:linesegarray><hp:lineseg textpos=\"0\" vertpos=\"0\" vertsize=\"1000\" \
             textheight=\"1000\" baseline=\"850\" spacing=\"600\" horzpos=\"0\" \
             horzsize=\"42520\" flags=\"393216\"/></hp:linesegarray>"
        );
    }
}
