/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Predicates over text content and text style used while building lines.

use icu_properties::GeneralCategory;
use icu_properties::maps::general_category;
use text_metrics::{FontCascade, InlineLayoutUnit, TextDirection, TextView};
use unicode_bidi::{BidiClass, bidi_class};

use crate::inline_text_box::InlineTextItem;
use crate::measure::{UseTrailingWhitespaceMeasuringOptimization, width_of_item_range};
use crate::style::{HangingPunctuation, TextStyle, TextWrapMode, WhiteSpaceCollapse};

pub const HORIZONTAL_ELLIPSIS: &str = "\u{2026}";
pub const VERTICAL_ELLIPSIS: &str = "\u{22EE}";

/// The text of the ellipsis used for `text-overflow: ellipsis`.
pub fn ellipsis_text(is_horizontal: bool) -> &'static str {
    if is_horizontal {
        HORIZONTAL_ELLIPSIS
    } else {
        VERTICAL_ELLIPSIS
    }
}

/// <https://www.w3.org/TR/css-text-4/#white-space-collapsing>
pub fn should_preserve_spaces_and_tabs(style: &TextStyle) -> bool {
    matches!(
        style.white_space_collapse,
        WhiteSpaceCollapse::Preserve | WhiteSpaceCollapse::BreakSpaces
    )
}

/// <https://www.w3.org/TR/css-text-4/#white-space-collapsing>
pub fn should_preserve_newline(style: &TextStyle) -> bool {
    matches!(
        style.white_space_collapse,
        WhiteSpaceCollapse::Preserve |
            WhiteSpaceCollapse::PreserveBreaks |
            WhiteSpaceCollapse::BreakSpaces
    )
}

/// <https://www.w3.org/TR/css-text-4/#text-wrap>
pub fn is_wrapping_allowed(style: &TextStyle) -> bool {
    style.text_wrap_mode != TextWrapMode::NoWrap
}

/// <https://www.w3.org/TR/css-text-4/#white-space-phase-2>
pub fn should_trailing_whitespace_hang(style: &TextStyle) -> bool {
    style.white_space_collapse == WhiteSpaceCollapse::Preserve &&
        style.text_wrap_mode != TextWrapMode::NoWrap
}

/// Whether `text` has characters that make bidi resolution necessary.
pub fn contains_strong_directionality_text(text: TextView<'_>) -> bool {
    // Latin-1 has no right-to-left characters or bidi controls.
    if text.is_8bit() {
        return false;
    }
    text.chars().any(|character| {
        matches!(
            bidi_class(character),
            BidiClass::R |
                BidiClass::AL |
                BidiClass::RLE |
                BidiClass::RLO |
                BidiClass::LRE |
                BidiClass::LRO |
                BidiClass::PDF
        )
    })
}

/// The base direction of `text`, from its first strong character.
pub fn direction_for_text_content(text: TextView<'_>) -> TextDirection {
    if text.is_8bit() {
        return TextDirection::Ltr;
    }
    for character in text.chars() {
        match bidi_class(character) {
            BidiClass::L => return TextDirection::Ltr,
            BidiClass::R | BidiClass::AL => return TextDirection::Rtl,
            _ => {},
        }
    }
    TextDirection::Ltr
}

fn leading_character(inline_text_item: &InlineTextItem<'_>) -> (char, usize) {
    inline_text_item
        .inline_text_box()
        .text()
        .code_point_at(inline_text_item.start())
}

/// The last code point of the item and the offset it starts at.
fn trailing_character(inline_text_item: &InlineTextItem<'_>) -> (char, usize) {
    let text = inline_text_item.inline_text_box().text();
    let position =
        text.align_to_code_point_start(inline_text_item.start(), inline_text_item.end() - 1);
    (text.code_point_at(position).0, position)
}

fn width_of_character_at(
    inline_text_item: &InlineTextItem<'_>,
    font_cascade: &dyn FontCascade,
    position: usize,
) -> InlineLayoutUnit {
    let end = inline_text_item
        .inline_text_box()
        .text()
        .next_code_point_boundary(position)
        .min(inline_text_item.end());
    width_of_item_range(
        inline_text_item,
        font_cascade,
        position,
        end,
        0.,
        UseTrailingWhitespaceMeasuringOptimization::Yes,
    )
}

/// <https://www.w3.org/TR/css-text-3/#valdef-hanging-punctuation-first>
pub fn has_hangable_punctuation_start(inline_text_item: &InlineTextItem<'_>, style: &TextStyle) -> bool {
    if inline_text_item.is_empty() ||
        !style
            .hanging_punctuation
            .contains(HangingPunctuation::FIRST)
    {
        return false;
    }
    matches!(
        general_category().get(leading_character(inline_text_item).0),
        GeneralCategory::OpenPunctuation |
            GeneralCategory::InitialPunctuation |
            GeneralCategory::FinalPunctuation
    )
}

pub fn hangable_punctuation_start_width(
    inline_text_item: &InlineTextItem<'_>,
    style: &TextStyle,
) -> InlineLayoutUnit {
    if !has_hangable_punctuation_start(inline_text_item, style) {
        return 0.;
    }
    width_of_character_at(
        inline_text_item,
        style.font_cascade(),
        inline_text_item.start(),
    )
}

/// <https://www.w3.org/TR/css-text-3/#valdef-hanging-punctuation-last>
pub fn has_hangable_punctuation_end(inline_text_item: &InlineTextItem<'_>, style: &TextStyle) -> bool {
    if inline_text_item.is_empty() ||
        !style.hanging_punctuation.contains(HangingPunctuation::LAST)
    {
        return false;
    }
    matches!(
        general_category().get(trailing_character(inline_text_item).0),
        GeneralCategory::ClosePunctuation |
            GeneralCategory::InitialPunctuation |
            GeneralCategory::FinalPunctuation
    )
}

pub fn hangable_punctuation_end_width(
    inline_text_item: &InlineTextItem<'_>,
    style: &TextStyle,
) -> InlineLayoutUnit {
    if !has_hangable_punctuation_end(inline_text_item, style) {
        return 0.;
    }
    let (_, position) = trailing_character(inline_text_item);
    width_of_character_at(inline_text_item, style.font_cascade(), position)
}

/// <https://www.w3.org/TR/css-text-3/#valdef-hanging-punctuation-allow-end>
pub fn has_hangable_stop_or_comma_end(inline_text_item: &InlineTextItem<'_>, style: &TextStyle) -> bool {
    if inline_text_item.is_empty() ||
        !style
            .hanging_punctuation
            .intersects(HangingPunctuation::ALLOW_END | HangingPunctuation::FORCE_END)
    {
        return false;
    }
    matches!(
        trailing_character(inline_text_item).0,
        '\u{2C}' |
            '\u{2E}' |
            '\u{60C}' |
            '\u{6D4}' |
            '\u{3001}' |
            '\u{3002}' |
            '\u{FF0C}' |
            '\u{FF0E}' |
            '\u{FE50}' |
            '\u{FE51}' |
            '\u{FE52}' |
            '\u{FF61}' |
            '\u{FF64}'
    )
}

pub fn hangable_stop_or_comma_end_width(
    inline_text_item: &InlineTextItem<'_>,
    style: &TextStyle,
) -> InlineLayoutUnit {
    if !has_hangable_stop_or_comma_end(inline_text_item, style) {
        return 0.;
    }
    let (_, position) = trailing_character(inline_text_item);
    width_of_character_at(inline_text_item, style.font_cascade(), position)
}

#[cfg(test)]
mod tests {
    use text_metrics::TextContent;

    use super::*;

    #[test]
    fn test_strong_directionality() {
        let latin = TextContent::new("abc");
        let hebrew = TextContent::new("abc \u{5D0}");
        let embedding = TextContent::new("\u{202A}abc\u{202C}");
        let mixed_neutral = TextContent::new("\u{2014}123");
        assert!(!contains_strong_directionality_text(latin.view()));
        assert!(contains_strong_directionality_text(hebrew.view()));
        assert!(contains_strong_directionality_text(embedding.view()));
        assert!(!contains_strong_directionality_text(mixed_neutral.view()));
    }

    #[test]
    fn test_direction_for_text_content() {
        let rtl = TextContent::new("123 \u{627}\u{644} abc");
        let ltr = TextContent::new("\u{2014} abc \u{5D0}");
        let neutral = TextContent::new("\u{2014}\u{2014}");
        assert_eq!(direction_for_text_content(rtl.view()), TextDirection::Rtl);
        assert_eq!(direction_for_text_content(ltr.view()), TextDirection::Ltr);
        assert_eq!(direction_for_text_content(neutral.view()), TextDirection::Ltr);
    }

    #[test]
    fn test_ellipsis_text() {
        assert_eq!(ellipsis_text(true), "\u{2026}");
        assert_eq!(ellipsis_text(false), "\u{22EE}");
        assert!(std::ptr::eq(ellipsis_text(true), ellipsis_text(true)));
    }
}
