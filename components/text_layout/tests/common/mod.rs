/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

#![allow(dead_code)]

use std::sync::Arc;

use euclid::default::{Point2D, Rect, Size2D};
use rustc_hash::{FxHashMap, FxHashSet};
use text_layout::TextStyle;
use text_metrics::{
    FontCascade, FontIdentifier, GlyphData, GlyphId, InlineLayoutUnit, NOTDEF_GLYPH,
    SyntheticBoldInclusion, TextRun, TextView,
};

pub const PRIMARY_FONT: FontIdentifier = FontIdentifier(1);

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A font cascade where every character is its own glyph with a fixed
/// advance, optionally adjusted by kerning pairs.
#[derive(Clone, Debug)]
pub struct MockFontCascade {
    pub size: InlineLayoutUnit,
    pub default_advance: InlineLayoutUnit,
    pub advances: FxHashMap<char, InlineLayoutUnit>,
    pub kerning_pairs: FxHashMap<(char, char), InlineLayoutUnit>,
    pub fixed_pitch: bool,
    pub kerning: bool,
    pub requires_shaping: bool,
    pub small_caps: bool,
    pub fallback_fonts: FxHashMap<char, FontIdentifier>,
    pub missing_characters: FxHashSet<char>,
    pub glyph_bounds: FxHashMap<FontIdentifier, Rect<InlineLayoutUnit>>,
}

impl MockFontCascade {
    pub fn new(default_advance: InlineLayoutUnit) -> Self {
        Self {
            size: 16.,
            default_advance,
            advances: FxHashMap::default(),
            kerning_pairs: FxHashMap::default(),
            fixed_pitch: false,
            kerning: false,
            requires_shaping: false,
            small_caps: false,
            fallback_fonts: FxHashMap::default(),
            missing_characters: FxHashSet::default(),
            glyph_bounds: FxHashMap::default(),
        }
    }

    pub fn monospace(advance: InlineLayoutUnit) -> Self {
        Self {
            fixed_pitch: true,
            ..Self::new(advance)
        }
    }

    pub fn with_advance(mut self, character: char, advance: InlineLayoutUnit) -> Self {
        self.advances.insert(character, advance);
        self
    }

    /// Enables kerning and adds `adjustment` between `first` and `second`.
    pub fn with_kerning_pair(
        mut self,
        first: char,
        second: char,
        adjustment: InlineLayoutUnit,
    ) -> Self {
        self.kerning = true;
        self.kerning_pairs.insert((first, second), adjustment);
        self
    }

    pub fn with_fallback(mut self, character: char, font: FontIdentifier) -> Self {
        self.fallback_fonts.insert(character, font);
        self
    }

    pub fn with_missing(mut self, character: char) -> Self {
        self.missing_characters.insert(character);
        self
    }

    pub fn with_glyph_bounds(mut self, font: FontIdentifier, bounds: Rect<InlineLayoutUnit>) -> Self {
        self.glyph_bounds.insert(font, bounds);
        self
    }

    pub fn advance(&self, character: char) -> InlineLayoutUnit {
        self.advances
            .get(&character)
            .copied()
            .unwrap_or(self.default_advance)
    }

    fn measure(&self, text: TextView<'_>) -> InlineLayoutUnit {
        let mut width = 0.;
        let mut previous = None;
        for character in text.chars() {
            width += self.advance(character);
            if let (true, Some(previous)) = (self.kerning, previous) {
                width += self
                    .kerning_pairs
                    .get(&(previous, character))
                    .copied()
                    .unwrap_or(0.);
            }
            previous = Some(character);
        }
        width
    }

    pub fn into_style(self) -> TextStyle {
        TextStyle::new(Arc::new(self))
    }
}

pub fn style_with_advance(advance: InlineLayoutUnit) -> TextStyle {
    MockFontCascade::new(advance).into_style()
}

impl FontCascade for MockFontCascade {
    fn primary_font(&self) -> FontIdentifier {
        PRIMARY_FONT
    }

    fn size(&self) -> InlineLayoutUnit {
        self.size
    }

    fn width_for_simple_text(&self, text: TextView<'_>) -> InlineLayoutUnit {
        self.measure(text)
    }

    fn width(&self, run: &TextRun<'_>) -> InlineLayoutUnit {
        self.measure(run.text())
    }

    fn width_of_space_string(&self) -> InlineLayoutUnit {
        self.advance(' ')
    }

    fn primary_font_space_width(&self) -> InlineLayoutUnit {
        self.advance(' ')
    }

    fn enable_kerning(&self) -> bool {
        self.kerning
    }

    fn requires_shaping(&self) -> bool {
        self.requires_shaping
    }

    fn is_small_caps(&self) -> bool {
        self.small_caps
    }

    fn is_fixed_pitch(&self) -> bool {
        self.fixed_pitch
    }

    fn glyph_data_for_character(&self, character: char, _mirror: bool) -> GlyphData {
        if self.missing_characters.contains(&character) {
            return GlyphData {
                glyph: NOTDEF_GLYPH,
                font: None,
            };
        }
        GlyphData {
            glyph: character as GlyphId,
            font: Some(
                self.fallback_fonts
                    .get(&character)
                    .copied()
                    .unwrap_or(PRIMARY_FONT),
            ),
        }
    }

    fn width_for_glyph(
        &self,
        _font: FontIdentifier,
        glyph: GlyphId,
        _synthetic_bold: SyntheticBoldInclusion,
    ) -> InlineLayoutUnit {
        char::from_u32(glyph).map_or(0., |character| self.advance(character))
    }

    fn bounds_for_glyph(&self, font: FontIdentifier, glyph: GlyphId) -> Rect<InlineLayoutUnit> {
        if let Some(bounds) = self.glyph_bounds.get(&font) {
            return *bounds;
        }
        let advance = char::from_u32(glyph).map_or(0., |character| self.advance(character));
        Rect::new(
            Point2D::new(0., -0.8 * self.size),
            Size2D::new(advance, self.size),
        )
    }
}
