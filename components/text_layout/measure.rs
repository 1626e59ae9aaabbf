/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Width measurement of ranges of inline text.

use std::sync::Arc;

use app_units::MAX_AU;
use text_config::pref;
use text_metrics::{CodePath, FontCascade, InlineLayoutUnit, TextDirection, TextRun, TextView};

use crate::inline_text_box::{InlineTextBox, InlineTextItem};
use crate::style::TextStyle;
use crate::text_properties::should_preserve_spaces_and_tabs;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UseTrailingWhitespaceMeasuringOptimization {
    Yes,
    No,
}

/// The largest inline size layout can represent.
pub fn max_inline_layout_unit() -> InlineLayoutUnit {
    MAX_AU.to_f32_px()
}

/// Font backends may report NaN or infinite advances for broken fonts; layout
/// only ever sees finite values.
pub(crate) fn normalize_width(width: InlineLayoutUnit) -> InlineLayoutUnit {
    if width.is_nan() {
        return 0.;
    }
    if width.is_infinite() {
        return max_inline_layout_unit();
    }
    width
}

fn space_width(inline_text_box: &InlineTextBox, font_cascade: &dyn FontCascade) -> InlineLayoutUnit {
    if inline_text_box.can_use_simplified_content_measuring() {
        return font_cascade.primary_font_space_width();
    }
    font_cascade.width_of_space_string()
}

/// Measures `[from, to)` of `inline_text_box`.
///
/// With [`UseTrailingWhitespaceMeasuringOptimization::Yes`], a range that is
/// followed by a space is measured together with that space, minus the width
/// of the space, so that kerning and ligatures across the boundary are taken
/// into account the same way they are when the whole text is measured.
pub fn width(
    inline_text_box: &InlineTextBox,
    font_cascade: &dyn FontCascade,
    from: usize,
    to: usize,
    content_logical_left: InlineLayoutUnit,
    use_trailing_whitespace_measuring_optimization: UseTrailingWhitespaceMeasuringOptimization,
) -> InlineLayoutUnit {
    let text = inline_text_box.text();
    debug_assert!(from <= to);
    debug_assert!(to <= text.len());
    if from == to {
        return 0.;
    }

    if inline_text_box.is_combined() {
        return font_cascade.size();
    }

    let extend_measuring = use_trailing_whitespace_measuring_optimization ==
        UseTrailingWhitespaceMeasuringOptimization::Yes &&
        (font_cascade.enable_kerning() || font_cascade.requires_shaping()) &&
        to < text.len() &&
        text.code_unit_at(to) == ' ' as u16 &&
        pref!(layout_text_trailing_whitespace_measuring_enabled);
    let measured_to = if extend_measuring { to + 1 } else { to };

    let mut width = if inline_text_box.can_use_simplified_content_measuring() {
        font_cascade.width_for_simple_text(text.substring(from..measured_to))
    } else {
        let style = inline_text_box.style();
        let directional_override = style.has_directional_override();
        let direction = if directional_override {
            style.direction
        } else {
            TextDirection::Ltr
        };
        let tab_size = (!style.collapse_white_space() && style.tab_size != 0).then_some(style.tab_size);
        let run = TextRun::new(text, from..measured_to)
            .with_direction(direction, directional_override)
            .with_tab_size(tab_size)
            .with_x_position(content_logical_left);
        font_cascade.width(&run)
    };

    if extend_measuring {
        width -= space_width(inline_text_box, font_cascade) + font_cascade.word_spacing();
    }
    normalize_width(width)
}

/// Measures `[from, to)`, which must lie inside `inline_text_item`.
pub fn width_of_item_range(
    inline_text_item: &InlineTextItem<'_>,
    font_cascade: &dyn FontCascade,
    from: usize,
    to: usize,
    content_logical_left: InlineLayoutUnit,
    use_trailing_whitespace_measuring_optimization: UseTrailingWhitespaceMeasuringOptimization,
) -> InlineLayoutUnit {
    debug_assert!(from >= inline_text_item.start());
    debug_assert!(to <= inline_text_item.end());
    if from == to {
        return 0.;
    }

    let inline_text_box = inline_text_item.inline_text_box();
    if inline_text_item.is_whitespace() {
        // Collapsible whitespace renders as a single space regardless of its length.
        let single_white_space =
            to - from == 1 || !should_preserve_spaces_and_tabs(inline_text_item.style());
        if single_white_space {
            return normalize_width(space_width(inline_text_box, font_cascade));
        }
    }
    width(
        inline_text_box,
        font_cascade,
        from,
        to,
        content_logical_left,
        use_trailing_whitespace_measuring_optimization,
    )
}

pub fn width_of_item(
    inline_text_item: &InlineTextItem<'_>,
    font_cascade: &dyn FontCascade,
    content_logical_left: InlineLayoutUnit,
) -> InlineLayoutUnit {
    width_of_item_range(
        inline_text_item,
        font_cascade,
        inline_text_item.start(),
        inline_text_item.end(),
        content_logical_left,
        UseTrailingWhitespaceMeasuringOptimization::Yes,
    )
}

/// The width the trailing space of `[from, to)` adds to it.
pub fn trailing_whitespace_width(
    inline_text_box: &InlineTextBox,
    font_cascade: &dyn FontCascade,
    from: usize,
    to: usize,
) -> InlineLayoutUnit {
    debug_assert!(to > from + 1);
    debug_assert!(inline_text_box.text().code_unit_at(to - 1) == ' ' as u16);
    width(
        inline_text_box,
        font_cascade,
        from,
        to,
        0.,
        UseTrailingWhitespaceMeasuringOptimization::Yes,
    ) - width(
        inline_text_box,
        font_cascade,
        from,
        to - 1,
        0.,
        UseTrailingWhitespaceMeasuringOptimization::No,
    )
}

/// Characters whose advance is not simply their glyph advance: controls,
/// invisible formatting characters and whitespace that may need tab stops or
/// line breaks.
pub fn character_can_use_simplified_text_measuring(
    character: char,
    whitespace_is_collapsed: bool,
) -> bool {
    match character {
        '\n' | '\r' => whitespace_is_collapsed,
        '\t' => false,
        '\u{AD}' | '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}' => {
            false
        },
        '\u{FEFF}' | '\u{FFFC}' => false,
        _ => !character.is_control(),
    }
}

/// Whether every range of `text` can be measured by summing primary font
/// advances, for the given style and optional `::first-line` style.
pub fn can_use_simplified_text_measuring(
    text: TextView<'_>,
    style: &TextStyle,
    first_line_style: Option<&TextStyle>,
) -> bool {
    let font_cascade = style.font_cascade();
    if font_cascade.word_spacing() != 0. || font_cascade.letter_spacing() != 0. {
        return false;
    }
    if font_cascade.code_path(text) != CodePath::Simple {
        return false;
    }
    if let Some(first_line_style) = first_line_style {
        let first_line_font_cascade = first_line_style.font_cascade();
        let same_font = Arc::ptr_eq(&style.font_cascade, &first_line_style.font_cascade) ||
            (first_line_font_cascade.primary_font() == font_cascade.primary_font() &&
                first_line_font_cascade.size() == font_cascade.size());
        if !same_font {
            return false;
        }
    }
    if font_cascade.synthetic_bold_offset() != 0. {
        return false;
    }

    let primary_font = font_cascade.primary_font();
    let whitespace_is_collapsed = style.collapse_white_space();
    text.chars().all(|character| {
        if !character_can_use_simplified_text_measuring(character, whitespace_is_collapsed) {
            return false;
        }
        let glyph_data = font_cascade.glyph_data_for_character(character, false);
        glyph_data.is_valid() && glyph_data.font == Some(primary_font)
    })
}
