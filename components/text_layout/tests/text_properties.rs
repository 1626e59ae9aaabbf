/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

mod common;

use common::{MockFontCascade, style_with_advance};
use text_layout::style::{HangingPunctuation, TextWrapMode, WhiteSpaceCollapse};
use text_layout::{
    InlineTextBox, InlineTextItem, TextStyle, hangable_punctuation_end_width,
    hangable_punctuation_start_width, hangable_stop_or_comma_end_width,
    has_hangable_punctuation_end, has_hangable_punctuation_start, has_hangable_stop_or_comma_end,
    should_trailing_whitespace_hang,
};

fn hanging_style(hanging_punctuation: HangingPunctuation) -> TextStyle {
    let mut style = MockFontCascade::new(10.)
        .with_advance('\u{201C}', 6.)
        .with_advance('\u{3002}', 16.)
        .into_style();
    style.hanging_punctuation = hanging_punctuation;
    style
}

fn whole_item(inline_text_box: &InlineTextBox) -> InlineTextItem<'_> {
    InlineTextItem::new(inline_text_box, 0, inline_text_box.len(), false)
}

#[test]
fn test_hanging_punctuation_first() {
    let style = hanging_style(HangingPunctuation::FIRST);
    let quoted = InlineTextBox::new("\u{201C}quote", style.clone());
    let item = whole_item(&quoted);
    assert!(has_hangable_punctuation_start(&item, &style));
    assert_eq!(hangable_punctuation_start_width(&item, &style), 6.);

    let plain = InlineTextBox::new("quote", style.clone());
    let item = whole_item(&plain);
    assert!(!has_hangable_punctuation_start(&item, &style));
    assert_eq!(hangable_punctuation_start_width(&item, &style), 0.);

    let without_first = hanging_style(HangingPunctuation::LAST);
    let item = whole_item(&quoted);
    assert!(!has_hangable_punctuation_start(&item, &without_first));
}

#[test]
fn test_hanging_punctuation_last() {
    let style = hanging_style(HangingPunctuation::LAST);
    let parenthesized = InlineTextBox::new("(aside)", style.clone());
    let item = whole_item(&parenthesized);
    assert!(has_hangable_punctuation_end(&item, &style));
    assert_eq!(hangable_punctuation_end_width(&item, &style), 10.);

    // Only the item's own range counts.
    let inner = InlineTextItem::new(&parenthesized, 1, 5, false);
    assert!(!has_hangable_punctuation_end(&inner, &style));

    let empty = InlineTextItem::new(&parenthesized, 3, 0, false);
    assert!(!has_hangable_punctuation_end(&empty, &style));
    assert_eq!(hangable_punctuation_end_width(&empty, &style), 0.);
}

#[test]
fn test_hanging_stops_and_commas() {
    let style = hanging_style(HangingPunctuation::ALLOW_END);
    let sentence = InlineTextBox::new("end.", style.clone());
    let item = whole_item(&sentence);
    assert!(has_hangable_stop_or_comma_end(&item, &style));
    assert_eq!(hangable_stop_or_comma_end_width(&item, &style), 10.);

    let ideographic = InlineTextBox::new("\u{7D42}\u{3002}", style.clone());
    let item = whole_item(&ideographic);
    assert!(has_hangable_stop_or_comma_end(&item, &style));
    assert_eq!(hangable_stop_or_comma_end_width(&item, &style), 16.);

    let exclamation = InlineTextBox::new("end!", style.clone());
    let item = whole_item(&exclamation);
    assert!(!has_hangable_stop_or_comma_end(&item, &style));

    let force_end = hanging_style(HangingPunctuation::FORCE_END);
    let item = whole_item(&sentence);
    assert!(has_hangable_stop_or_comma_end(&item, &force_end));
    assert!(!has_hangable_stop_or_comma_end(&item, &hanging_style(HangingPunctuation::LAST)));
}

#[test]
fn test_trailing_whitespace_hangs() {
    let mut style = style_with_advance(10.);
    assert!(!should_trailing_whitespace_hang(&style));
    style.white_space_collapse = WhiteSpaceCollapse::Preserve;
    assert!(should_trailing_whitespace_hang(&style));
    style.text_wrap_mode = TextWrapMode::NoWrap;
    assert!(!should_trailing_whitespace_hang(&style));
}
