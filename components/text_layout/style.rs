/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The computed values of the inherited text properties that inline text
//! measuring and line breaking depend on.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use serde::Serialize;
use text_metrics::{FontCascade, TextDirection};

/// <https://www.w3.org/TR/css-text-4/#white-space-collapsing>
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum WhiteSpaceCollapse {
    #[default]
    Collapse,
    Preserve,
    PreserveBreaks,
    PreserveSpaces,
    BreakSpaces,
}

/// <https://www.w3.org/TR/css-text-4/#text-wrap-mode>
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum TextWrapMode {
    #[default]
    Wrap,
    NoWrap,
}

/// <https://www.w3.org/TR/css-text-4/#word-break-property>
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum WordBreak {
    #[default]
    Normal,
    BreakAll,
    KeepAll,
    BreakWord,
    /// `word-break: auto-phrase`, which asks for language-aware segmentation.
    Auto,
}

/// <https://www.w3.org/TR/css-text-3/#line-break-property>
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum LineBreak {
    #[default]
    Auto,
    Loose,
    Normal,
    Strict,
    AfterWhiteSpace,
    Anywhere,
}

/// The non-standard `-webkit-nbsp-mode` property.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum NbspMode {
    #[default]
    Normal,
    /// Non-breaking spaces are wrap opportunities like ordinary spaces.
    Space,
}

/// <https://www.w3.org/TR/css-text-3/#hyphens-property>
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum Hyphens {
    None,
    #[default]
    Manual,
    Auto,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum UnicodeBidi {
    #[default]
    Normal,
    Embed,
    Isolate,
    BidiOverride,
    IsolateOverride,
    Plaintext,
}

bitflags! {
    /// <https://www.w3.org/TR/css-text-3/#hanging-punctuation-property>
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct HangingPunctuation: u8 {
        const FIRST = 1 << 0;
        const LAST = 1 << 1;
        const ALLOW_END = 1 << 2;
        const FORCE_END = 1 << 3;
    }
}

/// A snapshot of the style of an inline text box.
#[derive(Clone)]
pub struct TextStyle {
    pub font_cascade: Arc<dyn FontCascade>,
    pub white_space_collapse: WhiteSpaceCollapse,
    pub text_wrap_mode: TextWrapMode,
    pub word_break: WordBreak,
    pub line_break: LineBreak,
    pub nbsp_mode: NbspMode,
    pub hyphens: Hyphens,
    pub hanging_punctuation: HangingPunctuation,
    pub direction: TextDirection,
    pub unicode_bidi: UnicodeBidi,
    /// `tab-size` in multiples of the space width. Zero disables tab stops.
    pub tab_size: u32,
    /// The content language, for example `ja` or `zh-Hant`.
    pub locale: Option<String>,
    /// The string rendered at an automatic or manual hyphenation point.
    pub hyphen_string: String,
}

impl TextStyle {
    pub fn new(font_cascade: Arc<dyn FontCascade>) -> Self {
        Self {
            font_cascade,
            white_space_collapse: WhiteSpaceCollapse::default(),
            text_wrap_mode: TextWrapMode::default(),
            word_break: WordBreak::default(),
            line_break: LineBreak::default(),
            nbsp_mode: NbspMode::default(),
            hyphens: Hyphens::default(),
            hanging_punctuation: HangingPunctuation::empty(),
            direction: TextDirection::Ltr,
            unicode_bidi: UnicodeBidi::default(),
            tab_size: 8,
            locale: None,
            hyphen_string: String::from("\u{2010}"),
        }
    }

    pub fn font_cascade(&self) -> &dyn FontCascade {
        &*self.font_cascade
    }

    /// Whether sequences of spaces and tabs collapse.
    pub fn collapse_white_space(&self) -> bool {
        matches!(
            self.white_space_collapse,
            WhiteSpaceCollapse::Collapse | WhiteSpaceCollapse::PreserveBreaks
        )
    }

    pub fn auto_wrap(&self) -> bool {
        self.text_wrap_mode == TextWrapMode::Wrap
    }

    /// Whether `direction` applies to every character regardless of its bidi
    /// class.
    pub fn has_directional_override(&self) -> bool {
        matches!(
            self.unicode_bidi,
            UnicodeBidi::BidiOverride | UnicodeBidi::IsolateOverride
        )
    }
}

impl fmt::Debug for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextStyle")
            .field("primary_font", &self.font_cascade.primary_font())
            .field("font_size", &self.font_cascade.size())
            .field("white_space_collapse", &self.white_space_collapse)
            .field("text_wrap_mode", &self.text_wrap_mode)
            .field("word_break", &self.word_break)
            .field("line_break", &self.line_break)
            .field("nbsp_mode", &self.nbsp_mode)
            .field("hyphens", &self.hyphens)
            .field("hanging_punctuation", &self.hanging_punctuation)
            .field("direction", &self.direction)
            .field("unicode_bidi", &self.unicode_bidi)
            .field("tab_size", &self.tab_size)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}
