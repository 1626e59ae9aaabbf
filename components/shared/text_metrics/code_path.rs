/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use serde::Serialize;

use crate::text_view::TextView;

/// How a font has to process a piece of text.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum CodePath {
    /// One glyph per character, advances can simply be added up.
    Simple,
    /// Like `Simple`, but glyphs may paint outside of their advance.
    SimpleWithGlyphOverflow,
    /// The text needs shaping: combining marks, complex scripts, joiners and
    /// emoji sequences.
    Complex,
}

fn character_needs_complex_path(character: char) -> bool {
    matches!(
        character as u32,
        // Combining diacritical marks.
        0x0300..=0x036F |
            // Hebrew, Arabic, Syriac, Thaana, NKo, Samaritan, Mandaic, Indic
            // scripts, Sinhala, Thai, Lao, Tibetan, Myanmar.
            0x0591..=0x1059 |
            // Hangul Jamo.
            0x1100..=0x11FF |
            0x135D..=0x135F |
            // Tagalog through Mongolian.
            0x1700..=0x18AF |
            0x1900..=0x194F |
            0x1980..=0x19DF |
            0x1A00..=0x1CFF |
            0x1DC0..=0x1DFF |
            // Zero width non-joiner and joiner.
            0x200C..=0x200D |
            0x20D0..=0x20FF |
            0x2CEF..=0x2CF1 |
            0x302A..=0x302F |
            0xA67C..=0xA67D |
            0xA6F0..=0xA6F1 |
            0xA800..=0xABFF |
            0xD7B0..=0xD7FF |
            // Variation selectors.
            0xFE00..=0xFE0F |
            0xFE20..=0xFE2F |
            // Regional indicators and emoji modifiers.
            0x1F1E6..=0x1F1FF |
            0x1F3FB..=0x1F3FF |
            0xE0100..=0xE01EF
    )
}

/// Classifies `text` by the cheapest path that can measure it correctly.
pub fn character_range_code_path(text: TextView<'_>) -> CodePath {
    if text.is_8bit() {
        return CodePath::Simple;
    }
    if text.chars().any(character_needs_complex_path) {
        return CodePath::Complex;
    }
    CodePath::Simple
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextContent;

    #[test]
    fn test_code_path_classification() {
        let path = |text: &str| character_range_code_path(TextContent::new(text).view());
        assert_eq!(path("hello"), CodePath::Simple);
        assert_eq!(path("ab\u{1F600}cd"), CodePath::Simple);
        assert_eq!(path("e\u{301}"), CodePath::Complex);
        assert_eq!(path("\u{5D0}\u{5D1}"), CodePath::Complex);
        assert_eq!(path("\u{1F44D}\u{1F3FD}"), CodePath::Complex);
    }
}
