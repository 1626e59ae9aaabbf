/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

mod common;

use common::{MockFontCascade, PRIMARY_FONT, init_logging};
use euclid::default::{Point2D, Rect, Size2D};
use text_layout::{
    EnclosingAscentDescent, IncludeHyphen, enclosing_glyph_bounds_for_text, fallback_fonts_for_text,
};
use text_metrics::{FontIdentifier, TextContent};

const FALLBACK_FONT: FontIdentifier = FontIdentifier(7);
const HYPHEN_FONT: FontIdentifier = FontIdentifier(9);

fn fonts(text: &str, font_cascade: MockFontCascade, include_hyphen: IncludeHyphen) -> Vec<FontIdentifier> {
    let content = TextContent::new(text);
    let style = font_cascade.into_style();
    let mut fonts: Vec<_> = fallback_fonts_for_text(content.view(), &style, include_hyphen)
        .into_iter()
        .collect();
    fonts.sort();
    fonts
}

#[test]
fn test_primary_font_is_never_a_fallback() {
    init_logging();
    assert!(fonts("plain", MockFontCascade::new(10.), IncludeHyphen::No).is_empty());

    let font_cascade = MockFontCascade::new(10.).with_fallback('l', FALLBACK_FONT);
    assert_eq!(
        fonts("plain", font_cascade.clone(), IncludeHyphen::No),
        vec![FALLBACK_FONT]
    );
    assert_eq!(
        fonts("lull", font_cascade, IncludeHyphen::No),
        vec![FALLBACK_FONT]
    );
}

#[test]
fn test_glyphs_without_advance() {
    // Missing glyphs contribute nothing.
    let font_cascade = MockFontCascade::new(10.).with_missing('\u{4E16}');
    assert!(fonts("a\u{4E16}", font_cascade, IncludeHyphen::No).is_empty());

    let font_cascade = MockFontCascade::new(10.)
        .with_fallback('x', FALLBACK_FONT)
        .with_advance('x', 0.);
    assert!(fonts("axb", font_cascade, IncludeHyphen::No).is_empty());

    // Combining marks paint even without an advance.
    let font_cascade = MockFontCascade::new(10.)
        .with_fallback('\u{301}', FALLBACK_FONT)
        .with_advance('\u{301}', 0.);
    assert_eq!(
        fonts("e\u{301}", font_cascade, IncludeHyphen::No),
        vec![FALLBACK_FONT]
    );

    // Default ignorable characters never show up, whatever their advance.
    let font_cascade = MockFontCascade::new(10.).with_fallback('\u{200B}', FALLBACK_FONT);
    assert!(fonts("a\u{200B}b", font_cascade, IncludeHyphen::No).is_empty());
}

#[test]
fn test_hyphen_and_small_caps() {
    let font_cascade = MockFontCascade::new(10.)
        .with_fallback('\u{2010}', HYPHEN_FONT)
        .with_fallback('\u{4E16}', FALLBACK_FONT);
    assert_eq!(
        fonts("\u{4E16}", font_cascade.clone(), IncludeHyphen::No),
        vec![FALLBACK_FONT]
    );
    assert_eq!(
        fonts("\u{4E16}", font_cascade, IncludeHyphen::Yes),
        vec![FALLBACK_FONT, HYPHEN_FONT]
    );

    let mut small_caps = MockFontCascade::new(10.).with_fallback('A', FALLBACK_FONT);
    small_caps.small_caps = true;
    assert_eq!(
        fonts("a", small_caps, IncludeHyphen::No),
        vec![FALLBACK_FONT]
    );
}

#[test]
fn test_enclosing_glyph_bounds() {
    let font_cascade = MockFontCascade::new(10.)
        .with_fallback('b', FALLBACK_FONT)
        .with_glyph_bounds(
            PRIMARY_FONT,
            Rect::new(Point2D::new(0., -12.), Size2D::new(10., 16.)),
        )
        .with_glyph_bounds(
            FALLBACK_FONT,
            Rect::new(Point2D::new(0., -20.), Size2D::new(10., 30.)),
        );
    let style = font_cascade.into_style();

    let primary_only = TextContent::new("aa");
    assert_eq!(
        enclosing_glyph_bounds_for_text(primary_only.view(), &style),
        EnclosingAscentDescent {
            ascent: -12.,
            descent: 4.,
        }
    );

    let mixed = TextContent::new("ab");
    assert_eq!(
        enclosing_glyph_bounds_for_text(mixed.view(), &style),
        EnclosingAscentDescent {
            ascent: -20.,
            descent: 10.,
        }
    );

    let empty = TextContent::new("");
    assert_eq!(
        enclosing_glyph_bounds_for_text(empty.view(), &style),
        EnclosingAscentDescent::default()
    );
}
