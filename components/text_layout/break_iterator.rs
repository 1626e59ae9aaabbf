/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Soft wrap opportunities and grapheme cluster boundaries.
//!
//! Line breaking follows <https://www.unicode.org/reports/tr14/> through
//! ICU4X, with a few shortcuts for ASCII text and the treatment of spaces that
//! CSS requires on top of UAX #14.

use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use icu_segmenter::{LineBreakOptions, LineBreakStrictness, LineBreakWordOption, LineSegmenter};
use log::trace;
use rustc_hash::FxHashMap;
use text_config::pref;
use text_metrics::TextView;
use unicode_segmentation::UnicodeSegmentation;

const NO_BREAK_SPACE: u16 = 0xA0;

/// How strictly UAX #14 is applied, mirroring `line-break`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LineBreakIteratorMode {
    Default,
    Loose,
    Normal,
    Strict,
}

/// Whether soft wrap opportunities may depend on a dictionary of words, for
/// scripts that do not separate words with spaces.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ContentAnalysis {
    Mechanical,
    Linguistic,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum NbspBehavior {
    TreatNbspAsBreak,
    IgnoreNbsp,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct SegmenterKey {
    mode: LineBreakIteratorMode,
    content_analysis: ContentAnalysis,
    keep_all: bool,
    chinese_or_japanese: bool,
}

thread_local! {
    static LINE_SEGMENTERS: RefCell<FxHashMap<SegmenterKey, Rc<LineSegmenter>>> =
        RefCell::new(FxHashMap::default());
}

fn line_segmenter(key: SegmenterKey) -> Rc<LineSegmenter> {
    LINE_SEGMENTERS.with(|segmenters| {
        segmenters
            .borrow_mut()
            .entry(key)
            .or_insert_with(|| {
                let mut options = LineBreakOptions::default();
                options.strictness = match key.mode {
                    LineBreakIteratorMode::Default | LineBreakIteratorMode::Normal => {
                        LineBreakStrictness::Normal
                    },
                    LineBreakIteratorMode::Loose => LineBreakStrictness::Loose,
                    LineBreakIteratorMode::Strict => LineBreakStrictness::Strict,
                };
                options.word_option = if key.keep_all {
                    LineBreakWordOption::KeepAll
                } else {
                    LineBreakWordOption::Normal
                };
                options.ja_zh = key.chinese_or_japanese;
                let segmenter = match key.content_analysis {
                    ContentAnalysis::Mechanical => LineSegmenter::new_auto_with_options(options),
                    ContentAnalysis::Linguistic => LineSegmenter::new_dictionary_with_options(options),
                };
                Rc::new(segmenter)
            })
            .clone()
    })
}

/// The (up to) two characters preceding the iterated text on the same line.
/// A zero code unit means there is no character.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PriorContext {
    second_to_last: u16,
    last: u16,
}

impl PriorContext {
    pub fn set(&mut self, second_to_last: u16, last: u16) {
        self.second_to_last = second_to_last;
        self.last = last;
    }

    pub fn last(&self) -> u16 {
        self.last
    }

    pub fn second_to_last(&self) -> u16 {
        self.second_to_last
    }

    /// The code units of the context, in text order.
    fn code_units(&self) -> impl Iterator<Item = u16> {
        [self.second_to_last, self.last]
            .into_iter()
            .skip_while(|unit| *unit == 0)
    }

    pub fn len(&self) -> usize {
        self.code_units().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Finds soft wrap opportunities in a piece of text. The UAX #14 breaks are
/// computed on first use and kept for subsequent queries.
pub struct CachedLineBreakIterator<'a> {
    text: TextView<'a>,
    mode: LineBreakIteratorMode,
    content_analysis: ContentAnalysis,
    chinese_or_japanese: bool,
    prior_context: PriorContext,
    /// Break positions, indexed by `keep_all` and by whether NBSP is treated as
    /// a space.
    breaks: [OnceCell<Vec<usize>>; 4],
}

impl<'a> CachedLineBreakIterator<'a> {
    pub fn new(
        text: TextView<'a>,
        mode: LineBreakIteratorMode,
        content_analysis: ContentAnalysis,
        locale: Option<&str>,
    ) -> Self {
        let chinese_or_japanese = locale.is_some_and(|locale| {
            let language = locale.split(['-', '_']).next().unwrap_or_default();
            language.eq_ignore_ascii_case("ja") || language.eq_ignore_ascii_case("zh")
        });
        Self {
            text,
            mode,
            content_analysis,
            chinese_or_japanese,
            prior_context: PriorContext::default(),
            breaks: Default::default(),
        }
    }

    pub fn text(&self) -> TextView<'a> {
        self.text
    }

    pub fn mode(&self) -> LineBreakIteratorMode {
        self.mode
    }

    pub fn content_analysis(&self) -> ContentAnalysis {
        self.content_analysis
    }

    pub fn prior_context(&self) -> &PriorContext {
        &self.prior_context
    }

    pub fn prior_context_mut(&mut self) -> &mut PriorContext {
        // The cached breaks depend on the context.
        self.breaks = Default::default();
        &mut self.prior_context
    }

    fn breaks(&self, keep_all: bool, nbsp_behavior: NbspBehavior) -> &[usize] {
        let index = (keep_all as usize) << 1 | (nbsp_behavior == NbspBehavior::TreatNbspAsBreak) as usize;
        self.breaks[index].get_or_init(|| {
            let context_length = self.prior_context.len();
            let mut code_units: Vec<u16> = self.prior_context.code_units().collect();
            code_units.extend(self.text.to_utf16().into_iter().map(|unit| {
                if nbsp_behavior == NbspBehavior::TreatNbspAsBreak && unit == NO_BREAK_SPACE {
                    ' ' as u16
                } else {
                    unit
                }
            }));

            let segmenter = line_segmenter(SegmenterKey {
                mode: self.mode,
                content_analysis: self.content_analysis,
                keep_all,
                chinese_or_japanese: self.chinese_or_japanese,
            });
            // The start of the combined text is never an opportunity; a break
            // right after the context is one at position zero of our text.
            let breaks: Vec<usize> = segmenter
                .segment_utf16(&code_units)
                .filter(|position| *position > 0 && *position >= context_length)
                .map(|position| position - context_length)
                .collect();
            trace!("Line breaks {breaks:?} with {context_length} characters of context");
            breaks
        })
    }

    fn is_break_before(&self, position: usize, keep_all: bool, nbsp_behavior: NbspBehavior) -> bool {
        self.breaks(keep_all, nbsp_behavior)
            .binary_search(&position)
            .is_ok()
    }
}

#[inline]
fn is_breakable_space(character: u16, nbsp_behavior: NbspBehavior) -> bool {
    character == ' ' as u16 ||
        character == '\n' as u16 ||
        character == '\t' as u16 ||
        (nbsp_behavior == NbspBehavior::TreatNbspAsBreak && character == NO_BREAK_SPACE)
}

fn is_ascii_alphanumeric(character: u16) -> bool {
    u8::try_from(character).is_ok_and(|character| character.is_ascii_alphanumeric())
}

/// Decides the opportunity between two ASCII characters without UAX #14 when
/// the answer is cheap to give, or `None` when the segmenter has to decide.
fn ascii_break_between(second_to_last: u16, last: u16, character: u16) -> Option<bool> {
    if last >= 0x80 || character >= 0x80 {
        return None;
    }
    // A hyphen before a digit is a minus sign unless it joins two alphanumeric
    // parts, as in `ABCD-1234`.
    if last == '-' as u16 && (character as u8).is_ascii_digit() {
        return Some(is_ascii_alphanumeric(second_to_last));
    }
    if is_ascii_alphanumeric(last) && is_ascii_alphanumeric(character) {
        return Some(false);
    }
    None
}

fn next_breakable_position_internal(
    iterator: &CachedLineBreakIterator<'_>,
    start: usize,
    nbsp_behavior: NbspBehavior,
    use_ascii_shortcut: bool,
    keep_all: bool,
) -> usize {
    let text = iterator.text();
    let length = text.len();
    let context = iterator.prior_context();
    let (mut second_to_last, mut last) = match start {
        0 => (context.second_to_last(), context.last()),
        1 => (context.last(), text.code_unit_at(0)),
        _ => (text.code_unit_at(start - 2), text.code_unit_at(start - 1)),
    };
    let use_ascii_shortcut =
        use_ascii_shortcut && pref!(layout_text_line_break_ascii_shortcut_enabled);

    for position in start..length {
        let character = text.code_unit_at(position);
        if is_breakable_space(character, nbsp_behavior) {
            return position;
        }

        let shortcut_answer = if use_ascii_shortcut {
            ascii_break_between(second_to_last, last, character)
        } else {
            None
        };
        let is_opportunity = match shortcut_answer {
            Some(answer) => answer,
            None => iterator.is_break_before(position, keep_all, nbsp_behavior),
        };
        // The space before this position was already reported.
        if is_opportunity && !is_breakable_space(last, nbsp_behavior) {
            return position;
        }

        second_to_last = last;
        last = character;
    }
    length
}

/// The first soft wrap opportunity at or after `start`, or the length of the
/// text if there is none. Non-breaking spaces are breakable spaces.
pub fn next_breakable_position(iterator: &CachedLineBreakIterator<'_>, start: usize) -> usize {
    next_breakable_position_internal(iterator, start, NbspBehavior::TreatNbspAsBreak, true, false)
}

pub fn next_breakable_position_ignoring_nbsp(
    iterator: &CachedLineBreakIterator<'_>,
    start: usize,
) -> usize {
    next_breakable_position_internal(iterator, start, NbspBehavior::IgnoreNbsp, true, false)
}

/// Like [`next_breakable_position`], but every opportunity comes from UAX #14
/// so that `line-break` strictness is honoured for ASCII too.
pub fn next_breakable_position_without_shortcut(
    iterator: &CachedLineBreakIterator<'_>,
    start: usize,
) -> usize {
    next_breakable_position_internal(iterator, start, NbspBehavior::TreatNbspAsBreak, false, false)
}

pub fn next_breakable_position_ignoring_nbsp_without_shortcut(
    iterator: &CachedLineBreakIterator<'_>,
    start: usize,
) -> usize {
    next_breakable_position_internal(iterator, start, NbspBehavior::IgnoreNbsp, false, false)
}

/// `word-break: keep-all`: no opportunities between letters, including CJK
/// ideographs.
pub fn next_breakable_position_keeping_all_words(
    iterator: &CachedLineBreakIterator<'_>,
    start: usize,
) -> usize {
    next_breakable_position_internal(iterator, start, NbspBehavior::TreatNbspAsBreak, false, true)
}

pub fn next_breakable_position_keeping_all_words_ignoring_nbsp(
    iterator: &CachedLineBreakIterator<'_>,
    start: usize,
) -> usize {
    next_breakable_position_internal(iterator, start, NbspBehavior::IgnoreNbsp, false, true)
}

/// The end offsets, in code units, of the extended grapheme clusters of
/// `text`. The last entry is the length of the text.
pub fn grapheme_cluster_boundaries(text: TextView<'_>) -> Vec<usize> {
    let string = text.to_string_lossy();
    let mut boundaries = Vec::new();
    let mut position = 0;
    for cluster in string.graphemes(true) {
        position += cluster.chars().map(char::len_utf16).sum::<usize>();
        boundaries.push(position);
    }
    debug_assert_eq!(position, text.len());
    boundaries
}

/// The length of the grapheme cluster starting at `start`, or `None` at the
/// end of the text.
pub fn following_grapheme_cluster_length(text: TextView<'_>, start: usize) -> Option<usize> {
    if start >= text.len() {
        return None;
    }
    let string = text.substring(start..text.len()).to_string_lossy();
    string
        .graphemes(true)
        .next()
        .map(|cluster| cluster.chars().map(char::len_utf16).sum())
}

#[cfg(test)]
mod tests {
    use text_metrics::TextContent;

    use super::*;

    fn iterator(text: &TextContent) -> CachedLineBreakIterator<'_> {
        CachedLineBreakIterator::new(
            text.view(),
            LineBreakIteratorMode::Default,
            ContentAnalysis::Mechanical,
            None,
        )
    }

    #[test]
    fn test_spaces_are_opportunities() {
        let text = TextContent::new("hello world");
        let iterator = iterator(&text);
        assert_eq!(next_breakable_position(&iterator, 0), 5);
        assert_eq!(next_breakable_position(&iterator, 6), 11);
    }

    #[test]
    fn test_nbsp_handling() {
        let text = TextContent::new("ab\u{A0}cd");
        let iterator = iterator(&text);
        assert_eq!(next_breakable_position(&iterator, 0), 2);
        assert_eq!(next_breakable_position_ignoring_nbsp(&iterator, 0), 5);
        assert_eq!(next_breakable_position_without_shortcut(&iterator, 0), 2);
        assert_eq!(
            next_breakable_position_ignoring_nbsp_without_shortcut(&iterator, 0),
            5
        );
    }

    #[test]
    fn test_ideographs_break_unless_keeping_words() {
        let text = TextContent::new("\u{4E16}\u{754C}\u{4F60}\u{597D}");
        let iterator = iterator(&text);
        assert_eq!(next_breakable_position(&iterator, 0), 1);
        assert_eq!(next_breakable_position_keeping_all_words(&iterator, 0), 4);
        assert_eq!(
            next_breakable_position_keeping_all_words_ignoring_nbsp(&iterator, 0),
            4
        );
    }

    #[test]
    fn test_prior_context() {
        let text = TextContent::new("ample");
        let mut iterator = iterator(&text);
        assert_eq!(next_breakable_position(&iterator, 0), 5);

        iterator.prior_context_mut().set('x' as u16, '-' as u16);
        assert_eq!(iterator.prior_context().len(), 2);
        assert_eq!(next_breakable_position(&iterator, 0), 0);

        iterator.prior_context_mut().set('x' as u16, 'e' as u16);
        assert_eq!(next_breakable_position(&iterator, 0), 5);
    }

    #[test]
    fn test_hyphen_before_digits() {
        let text = TextContent::new("ABCD-1234 -5");
        let iterator = iterator(&text);
        assert_eq!(next_breakable_position(&iterator, 1), 5);
        assert_eq!(next_breakable_position(&iterator, 10), 12);
    }

    #[test]
    fn test_grapheme_cluster_boundaries() {
        let text = TextContent::new("ab\u{1F600}e\u{301}");
        assert_eq!(grapheme_cluster_boundaries(text.view()), vec![1, 2, 4, 6]);
        assert_eq!(following_grapheme_cluster_length(text.view(), 2), Some(2));
        assert_eq!(following_grapheme_cluster_length(text.view(), 4), Some(2));
        assert_eq!(following_grapheme_cluster_length(text.view(), 6), None);
    }
}
