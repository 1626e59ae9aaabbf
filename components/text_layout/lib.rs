/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

#![deny(unsafe_code)]

//! Measuring inline text and finding where it may wrap. Inline formatting
//! context layout calls into this crate to size text items, split content
//! that overflows a line, work out which fallback fonts a line uses and
//! distribute justification space.

mod break_iterator;
pub mod expansion;
mod fallback_fonts;
mod inline_text_box;
mod line_breaking;
mod measure;
pub mod style;
mod text_properties;

pub use crate::break_iterator::{
    CachedLineBreakIterator, ContentAnalysis, LineBreakIteratorMode, PriorContext,
    following_grapheme_cluster_length, grapheme_cluster_boundaries, next_breakable_position,
    next_breakable_position_ignoring_nbsp, next_breakable_position_ignoring_nbsp_without_shortcut,
    next_breakable_position_keeping_all_words,
    next_breakable_position_keeping_all_words_ignoring_nbsp,
    next_breakable_position_without_shortcut,
};
pub use crate::expansion::{ExpansionInfo, LineRun, LineRunKind, computed_expansions};
pub use crate::fallback_fonts::{
    EnclosingAscentDescent, FallbackFontList, IncludeHyphen, enclosing_glyph_bounds_for_text,
    fallback_fonts_for_text,
};
pub use crate::inline_text_box::{InlineTextBox, InlineTextItem};
pub use crate::line_breaking::{
    WordBreakLeft, break_word, break_word_for_item, content_analysis,
    find_next_breakable_position, first_user_perceived_character_length,
    first_user_perceived_character_length_for_item, line_break_iterator_mode,
    may_break_in_between,
};
pub use crate::measure::{
    UseTrailingWhitespaceMeasuringOptimization, can_use_simplified_text_measuring,
    character_can_use_simplified_text_measuring, max_inline_layout_unit, trailing_whitespace_width,
    width, width_of_item, width_of_item_range,
};
pub use crate::style::TextStyle;
pub use crate::text_properties::{
    HORIZONTAL_ELLIPSIS, VERTICAL_ELLIPSIS, contains_strong_directionality_text,
    direction_for_text_content, ellipsis_text, hangable_punctuation_end_width,
    hangable_punctuation_start_width, hangable_stop_or_comma_end_width,
    has_hangable_punctuation_end, has_hangable_punctuation_start, has_hangable_stop_or_comma_end,
    is_wrapping_allowed, should_preserve_newline, should_preserve_spaces_and_tabs,
    should_trailing_whitespace_hang,
};
