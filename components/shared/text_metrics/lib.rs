/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

#![deny(unsafe_code)]

//! The interface between inline layout and fonts, and the text storage types
//! both sides agree on.

mod code_path;
pub mod expansion;
mod font;
mod iterator;
mod text_run;
mod text_view;

use serde::{Deserialize, Serialize};

pub use crate::code_path::{CodePath, character_range_code_path};
pub use crate::expansion::{ExpansionBehavior, ExpansionEdge};
pub use crate::font::{
    FontCascade, FontIdentifier, GlyphData, GlyphId, NOTDEF_GLYPH, SyntheticBoldInclusion,
};
pub use crate::iterator::{CodePointIterator, Latin1TextIterator, SurrogatePairAwareTextIterator};
pub use crate::text_run::TextRun;
pub use crate::text_view::{
    REPLACEMENT_CHARACTER, TextContent, TextView, is_lead_surrogate, is_trail_surrogate,
};

/// Inline sizes in CSS pixels.
pub type InlineLayoutUnit = f32;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn is_rtl(self) -> bool {
        self == TextDirection::Rtl
    }
}
