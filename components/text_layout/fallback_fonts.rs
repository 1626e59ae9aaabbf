/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Which fonts of a cascade end up rendering a piece of text. Line box
//! construction needs them because fallback fonts contribute their own ascent
//! and descent to the line.

use icu_properties::GeneralCategory;
use icu_properties::maps::general_category;
use icu_properties::sets::default_ignorable_code_point;
use rustc_hash::FxHashSet;
use serde::Serialize;
use text_metrics::{
    CodePointIterator, FontCascade, FontIdentifier, InlineLayoutUnit, Latin1TextIterator,
    SurrogatePairAwareTextIterator, SyntheticBoldInclusion, TextContent, TextView,
};

use crate::style::TextStyle;

/// The fallback fonts used by some text. The primary font is never included.
pub type FallbackFontList = FxHashSet<FontIdentifier>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IncludeHyphen {
    No,
    Yes,
}

/// Small caps render lowercase letters as uppercase glyphs.
fn character_for_lookup(character: char, is_small_caps: bool) -> char {
    if !is_small_caps {
        return character;
    }
    let mut uppercase = character.to_uppercase();
    match (uppercase.next(), uppercase.next()) {
        (Some(uppercase), None) => uppercase,
        _ => character,
    }
}

fn collect_fallback_fonts<I: CodePointIterator>(
    mut iterator: I,
    font_cascade: &dyn FontCascade,
    is_rtl: bool,
    fallback_fonts: &mut FallbackFontList,
) {
    let primary_font = font_cascade.primary_font();
    let is_small_caps = font_cascade.is_small_caps();
    while let Some((character, cluster_length)) = iterator.consume() {
        iterator.advance(cluster_length);

        let character = character_for_lookup(character, is_small_caps);
        let glyph_data = font_cascade.glyph_data_for_character(character, is_rtl);
        let Some(font) = glyph_data.font else {
            continue;
        };
        if glyph_data.glyph == 0 || font == primary_font {
            continue;
        }
        let is_non_spacing_mark = general_category().get(character) == GeneralCategory::NonspacingMark;
        // Combining marks have no advance but still paint, and need room in the line.
        let has_advance = is_non_spacing_mark ||
            font_cascade.width_for_glyph(font, glyph_data.glyph, SyntheticBoldInclusion::Exclude) > 0.;
        if has_advance && !default_ignorable_code_point().contains(character) {
            fallback_fonts.insert(font);
        }
    }
}

fn collect_fallback_fonts_for_text(
    text: TextView<'_>,
    font_cascade: &dyn FontCascade,
    is_rtl: bool,
    fallback_fonts: &mut FallbackFontList,
) {
    match text {
        TextView::Latin1(bytes) => collect_fallback_fonts(
            Latin1TextIterator::new(bytes),
            font_cascade,
            is_rtl,
            fallback_fonts,
        ),
        TextView::Utf16(units) => collect_fallback_fonts(
            SurrogatePairAwareTextIterator::new(units),
            font_cascade,
            is_rtl,
            fallback_fonts,
        ),
    }
}

pub fn fallback_fonts_for_text(
    text: TextView<'_>,
    style: &TextStyle,
    include_hyphen: IncludeHyphen,
) -> FallbackFontList {
    let font_cascade = style.font_cascade();
    let is_rtl = style.direction.is_rtl();
    let mut fallback_fonts = FallbackFontList::default();

    if include_hyphen == IncludeHyphen::Yes {
        let hyphen = TextContent::new(&style.hyphen_string);
        collect_fallback_fonts_for_text(hyphen.view(), font_cascade, is_rtl, &mut fallback_fonts);
    }
    collect_fallback_fonts_for_text(text, font_cascade, is_rtl, &mut fallback_fonts);
    fallback_fonts
}

/// How far the ink of some text extends above and below the baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct EnclosingAscentDescent {
    /// The top of the highest glyph, negative when above the baseline.
    pub ascent: InlineLayoutUnit,
    /// The bottom of the lowest glyph.
    pub descent: InlineLayoutUnit,
}

fn enclosing_glyph_bounds<I: CodePointIterator>(
    mut iterator: I,
    font_cascade: &dyn FontCascade,
    is_rtl: bool,
) -> EnclosingAscentDescent {
    let primary_font = font_cascade.primary_font();
    let is_small_caps = font_cascade.is_small_caps();
    let mut enclosing: Option<EnclosingAscentDescent> = None;
    while let Some((character, cluster_length)) = iterator.consume() {
        iterator.advance(cluster_length);

        let character = character_for_lookup(character, is_small_caps);
        let glyph_data = font_cascade.glyph_data_for_character(character, is_rtl);
        let font = glyph_data.font.unwrap_or(primary_font);
        let bounds = font_cascade.bounds_for_glyph(font, glyph_data.glyph);
        enclosing = Some(match enclosing {
            Some(enclosing) => EnclosingAscentDescent {
                ascent: enclosing.ascent.min(bounds.min_y()),
                descent: enclosing.descent.max(bounds.max_y()),
            },
            None => EnclosingAscentDescent {
                ascent: bounds.min_y(),
                descent: bounds.max_y(),
            },
        });
    }
    enclosing.unwrap_or_default()
}

pub fn enclosing_glyph_bounds_for_text(text: TextView<'_>, style: &TextStyle) -> EnclosingAscentDescent {
    let font_cascade = style.font_cascade();
    let is_rtl = style.direction.is_rtl();
    match text {
        TextView::Latin1(bytes) => {
            enclosing_glyph_bounds(Latin1TextIterator::new(bytes), font_cascade, is_rtl)
        },
        TextView::Utf16(units) => enclosing_glyph_bounds(
            SurrogatePairAwareTextIterator::new(units),
            font_cascade,
            is_rtl,
        ),
    }
}
