/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Finding where content can be split to fit a line.

use log::{debug, warn};
use serde::Serialize;
use text_config::pref;
use text_metrics::{FontCascade, InlineLayoutUnit};

use crate::break_iterator::{
    CachedLineBreakIterator, ContentAnalysis, LineBreakIteratorMode, following_grapheme_cluster_length,
    grapheme_cluster_boundaries, next_breakable_position, next_breakable_position_ignoring_nbsp,
    next_breakable_position_ignoring_nbsp_without_shortcut, next_breakable_position_keeping_all_words,
    next_breakable_position_keeping_all_words_ignoring_nbsp, next_breakable_position_without_shortcut,
};
use crate::inline_text_box::{InlineTextBox, InlineTextItem};
use crate::measure::{UseTrailingWhitespaceMeasuringOptimization, width};
use crate::style::{Hyphens, LineBreak, NbspMode, TextStyle, WordBreak};

const SOFT_HYPHEN: u16 = 0xAD;

/// The part of a piece of content that goes on the current line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct WordBreakLeft {
    /// In code units, from the start of the content.
    pub length: usize,
    pub width: InlineLayoutUnit,
}

pub fn line_break_iterator_mode(line_break: LineBreak) -> LineBreakIteratorMode {
    match line_break {
        LineBreak::Auto | LineBreak::AfterWhiteSpace | LineBreak::Anywhere => {
            LineBreakIteratorMode::Default
        },
        LineBreak::Loose => LineBreakIteratorMode::Loose,
        LineBreak::Normal => LineBreakIteratorMode::Normal,
        LineBreak::Strict => LineBreakIteratorMode::Strict,
    }
}

pub fn content_analysis(word_break: WordBreak) -> ContentAnalysis {
    match word_break {
        WordBreak::Normal | WordBreak::BreakAll | WordBreak::KeepAll | WordBreak::BreakWord => {
            ContentAnalysis::Mechanical
        },
        WordBreak::Auto => ContentAnalysis::Linguistic,
    }
}

/// The length of the first user-perceived character (grapheme cluster) of
/// `[start, start + length)`.
pub fn first_user_perceived_character_length(
    inline_text_box: &InlineTextBox,
    start: usize,
    length: usize,
) -> usize {
    let text = inline_text_box.text();
    debug_assert!(!text.is_empty());
    if text.is_8bit() {
        return 1;
    }
    let character_length = if inline_text_box.can_use_simple_font_code_path() {
        text.code_point_at(start).1
    } else {
        following_grapheme_cluster_length(text, start).unwrap_or(length)
    };
    character_length.min(length)
}

pub fn first_user_perceived_character_length_for_item(inline_text_item: &InlineTextItem<'_>) -> usize {
    first_user_perceived_character_length(
        inline_text_item.inline_text_box(),
        inline_text_item.start(),
        inline_text_item.length(),
    )
    .min(inline_text_item.length())
}

pub fn break_word_for_item(
    inline_text_item: &InlineTextItem<'_>,
    font_cascade: &dyn FontCascade,
    text_width: InlineLayoutUnit,
    available_width: InlineLayoutUnit,
    content_logical_left: InlineLayoutUnit,
) -> WordBreakLeft {
    break_word(
        inline_text_item.inline_text_box(),
        inline_text_item.start(),
        inline_text_item.length(),
        text_width,
        available_width,
        content_logical_left,
        font_cascade,
    )
}

/// Finds the longest prefix of `[start, start + length)` that fits in
/// `available_width` without splitting a character. `text_width` is the
/// width of the whole range, used to guess where the split falls.
///
/// If not even the first user-perceived character fits, that character is
/// returned anyway so that content always makes progress.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "break_word",
        skip_all,
        fields(servo_profiling = true),
        level = "trace",
    )
)]
pub fn break_word(
    inline_text_box: &InlineTextBox,
    start: usize,
    length: usize,
    text_width: InlineLayoutUnit,
    available_width: InlineLayoutUnit,
    content_logical_left: InlineLayoutUnit,
    font_cascade: &dyn FontCascade,
) -> WordBreakLeft {
    debug_assert!(available_width >= 0.);
    debug_assert!(length > 0, "break_word called with an empty range");
    debug_assert!(start + length <= inline_text_box.len());
    if length == 0 {
        return WordBreakLeft::default();
    }

    let word_break_left = if inline_text_box.can_use_simple_font_code_path() {
        break_simple_text(
            inline_text_box,
            start,
            length,
            text_width,
            available_width,
            content_logical_left,
            font_cascade,
        )
    } else {
        break_complex_text(
            inline_text_box,
            start,
            length,
            available_width,
            content_logical_left,
            font_cascade,
        )
    };

    if word_break_left.length > 0 {
        return word_break_left;
    }

    let first_character_length = first_user_perceived_character_length(inline_text_box, start, length);
    debug!("Nothing fits in {available_width}px, breaking after the first character");
    WordBreakLeft {
        length: first_character_length,
        width: width(
            inline_text_box,
            font_cascade,
            start,
            start + first_character_length,
            content_logical_left,
            UseTrailingWhitespaceMeasuringOptimization::Yes,
        ),
    }
}

fn break_simple_text(
    inline_text_box: &InlineTextBox,
    start: usize,
    length: usize,
    text_width: InlineLayoutUnit,
    available_width: InlineLayoutUnit,
    content_logical_left: InlineLayoutUnit,
    font_cascade: &dyn FontCascade,
) -> WordBreakLeft {
    let text = inline_text_box.text();
    let aligned = |index: usize| text.align_to_code_point_start(start, index);
    let measure = |end: usize| {
        width(
            inline_text_box,
            font_cascade,
            start,
            end,
            content_logical_left,
            UseTrailingWhitespaceMeasuringOptimization::Yes,
        )
    };
    let last_candidate = start + length - 1;

    let guess_from_fixed_pitch = font_cascade.is_fixed_pitch() &&
        inline_text_box.can_use_simplified_content_measuring() &&
        pref!(layout_text_fixed_pitch_breaking_enabled);
    if guess_from_fixed_pitch {
        let monospace_character_width = font_cascade.width_of_space_string();
        if monospace_character_width > 0. {
            let estimated_character_count = (available_width / monospace_character_width).floor() as usize;
            let end = aligned(start.saturating_add(estimated_character_count).min(last_candidate));
            let underflow_width = measure(end);
            // A font can claim to be fixed pitch and still have glyphs of a
            // different width.
            let looks_fixed_pitch = underflow_width <= available_width &&
                underflow_width + monospace_character_width >= available_width;
            if looks_fixed_pitch {
                return WordBreakLeft {
                    length: end - start,
                    width: underflow_width,
                };
            }
        }
    }

    let average_character_width = text_width / length as InlineLayoutUnit;
    let seed_factor = pref!(layout_text_bisection_seed_factor) as InlineLayoutUnit;
    let seed_offset = if average_character_width > 0. && average_character_width.is_finite() {
        (seed_factor * available_width / average_character_width) as usize
    } else {
        length
    };

    let mut left = start;
    let mut right = aligned(left.saturating_add(seed_offset).min(last_candidate));
    let mut left_side_width = 0.;
    while left < right {
        let middle = aligned((left + right) / 2);
        let end_of_middle_character = text.next_code_point_boundary(middle);
        let width = measure(end_of_middle_character);
        if width < available_width {
            left = end_of_middle_character;
            left_side_width = width;
        } else if width > available_width {
            right = middle;
        } else {
            right = end_of_middle_character;
            left_side_width = width;
            break;
        }
    }
    WordBreakLeft {
        length: right - start,
        width: left_side_width,
    }
}

fn break_complex_text(
    inline_text_box: &InlineTextBox,
    start: usize,
    length: usize,
    available_width: InlineLayoutUnit,
    content_logical_left: InlineLayoutUnit,
    font_cascade: &dyn FontCascade,
) -> WordBreakLeft {
    let text = inline_text_box.text();
    let mut left_side = WordBreakLeft::default();
    for boundary in grapheme_cluster_boundaries(text.substring(start..start + length)) {
        let width = width(
            inline_text_box,
            font_cascade,
            start,
            start + boundary,
            content_logical_left,
            UseTrailingWhitespaceMeasuringOptimization::Yes,
        );
        if width > available_width {
            return left_side;
        }
        left_side = WordBreakLeft {
            length: boundary,
            width,
        };
    }

    // Callers only break content that overflows.
    warn!("break_word: the whole content fits in {available_width}px");
    debug_assert!(
        left_side.length < length,
        "break_word called with content that fits"
    );
    left_side
}

/// The first soft wrap opportunity at or after `start`, following the
/// `word-break`, `line-break` and `-webkit-nbsp-mode` values of `style`.
pub fn find_next_breakable_position(
    iterator: &CachedLineBreakIterator<'_>,
    start: usize,
    style: &TextStyle,
) -> usize {
    let keep_all_words = style.word_break == WordBreak::KeepAll;
    let break_nbsp = style.auto_wrap() && style.nbsp_mode == NbspMode::Space;

    if keep_all_words {
        if break_nbsp {
            return next_breakable_position_keeping_all_words(iterator, start);
        }
        return next_breakable_position_keeping_all_words_ignoring_nbsp(iterator, start);
    }

    if iterator.mode() == LineBreakIteratorMode::Default {
        if break_nbsp {
            return next_breakable_position(iterator, start);
        }
        return next_breakable_position_ignoring_nbsp(iterator, start);
    }

    if break_nbsp {
        return next_breakable_position_without_shortcut(iterator, start);
    }
    next_breakable_position_ignoring_nbsp_without_shortcut(iterator, start)
}

/// Whether there is a soft wrap opportunity between two adjacent
/// non-whitespace items, as in `[ex-][ample]`.
pub fn may_break_in_between(
    previous_inline_item: &InlineTextItem<'_>,
    next_inline_item: &InlineTextItem<'_>,
) -> bool {
    debug_assert!(!previous_inline_item.is_whitespace() && !next_inline_item.is_whitespace());

    let previous_text = previous_inline_item.text();
    let previous_length = previous_text.len();
    let last_character = match previous_length {
        0 => 0,
        _ => previous_text.code_unit_at(previous_length - 1),
    };
    if last_character == SOFT_HYPHEN && previous_inline_item.style().hyphens == Hyphens::None {
        return false;
    }
    let second_to_last_character = match previous_length {
        0 | 1 => 0,
        _ => previous_text.code_unit_at(previous_length - 2),
    };

    let next_style = next_inline_item.style();
    let mut iterator = CachedLineBreakIterator::new(
        next_inline_item.text(),
        line_break_iterator_mode(next_style.line_break),
        content_analysis(next_style.word_break),
        next_style.locale.as_deref(),
    );
    iterator
        .prior_context_mut()
        .set(second_to_last_character, last_character);
    find_next_breakable_position(&iterator, 0, next_style) == 0
}
