/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use euclid::default::Rect;
use serde::{Deserialize, Serialize};

use crate::code_path::{CodePath, character_range_code_path};
use crate::expansion::{self, ExpansionBehavior};
use crate::text_run::TextRun;
use crate::text_view::TextView;
use crate::{InlineLayoutUnit, TextDirection};

pub type GlyphId = u32;

/// The glyph a font uses when it has nothing for a character.
pub const NOTDEF_GLYPH: GlyphId = 0;

/// Identifies one font of a cascade. This only names the font; holding one
/// does not keep the font alive.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct FontIdentifier(pub u32);

/// The result of resolving a character against a font cascade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphData {
    pub glyph: GlyphId,
    /// The font that provided `glyph`, or `None` when no font in the cascade
    /// covers the character.
    pub font: Option<FontIdentifier>,
}

impl GlyphData {
    pub fn is_valid(&self) -> bool {
        self.glyph != NOTDEF_GLYPH && self.font.is_some()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SyntheticBoldInclusion {
    Incorporate,
    Exclude,
}

/// A font cascade: the primary font of an element plus its fallbacks, at a
/// given size. Layout only ever talks to fonts through this trait.
pub trait FontCascade: Send + Sync {
    fn primary_font(&self) -> FontIdentifier;

    /// The computed font size in CSS pixels.
    fn size(&self) -> InlineLayoutUnit;

    /// Sum of the advances of `text` when every character maps to exactly one
    /// glyph of the primary font.
    fn width_for_simple_text(&self, text: TextView<'_>) -> InlineLayoutUnit;

    /// Shapes and measures `run`.
    fn width(&self, run: &TextRun<'_>) -> InlineLayoutUnit;

    /// The shaped width of a single space, letter spacing included.
    fn width_of_space_string(&self) -> InlineLayoutUnit;

    /// The advance of the space glyph of the primary font.
    fn primary_font_space_width(&self) -> InlineLayoutUnit;

    fn word_spacing(&self) -> InlineLayoutUnit {
        0.
    }

    fn letter_spacing(&self) -> InlineLayoutUnit {
        0.
    }

    fn enable_kerning(&self) -> bool;

    /// Whether ligatures or other features make widths depend on context.
    fn requires_shaping(&self) -> bool;

    fn is_small_caps(&self) -> bool {
        false
    }

    fn is_fixed_pitch(&self) -> bool;

    /// Extra advance added to every glyph of the primary font to fake bold.
    fn synthetic_bold_offset(&self) -> InlineLayoutUnit {
        0.
    }

    fn glyph_data_for_character(&self, character: char, mirror: bool) -> GlyphData;

    fn width_for_glyph(
        &self,
        font: FontIdentifier,
        glyph: GlyphId,
        synthetic_bold: SyntheticBoldInclusion,
    ) -> InlineLayoutUnit;

    /// Ink bounds of `glyph`, relative to the baseline with y growing downwards.
    fn bounds_for_glyph(&self, font: FontIdentifier, glyph: GlyphId) -> Rect<InlineLayoutUnit>;

    fn code_path(&self, text: TextView<'_>) -> CodePath {
        character_range_code_path(text)
    }

    fn can_expand_around_ideographs_in_complex_text(&self) -> bool {
        true
    }

    fn expansion_opportunity_count(
        &self,
        text: TextView<'_>,
        direction: TextDirection,
        behavior: ExpansionBehavior,
    ) -> (usize, bool) {
        expansion::expansion_opportunity_count(
            text,
            direction,
            behavior,
            self.can_expand_around_ideographs_in_complex_text(),
        )
    }
}
