/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use text_metrics::{CodePath, TextContent, TextView};

use crate::measure::can_use_simplified_text_measuring;
use crate::style::TextStyle;

/// A run of text from the box tree together with its style.
#[derive(Debug)]
pub struct InlineTextBox {
    content: TextContent,
    style: TextStyle,
    first_line_style: Option<TextStyle>,
    /// `text-combine-upright`: the whole content occupies a single em square.
    is_combined: bool,
    can_use_simple_font_code_path: bool,
    can_use_simplified_content_measuring: bool,
}

impl InlineTextBox {
    pub fn new(content: impl Into<TextContent>, style: TextStyle) -> Self {
        Self::new_with_first_line_style(content, style, None)
    }

    pub fn new_with_first_line_style(
        content: impl Into<TextContent>,
        style: TextStyle,
        first_line_style: Option<TextStyle>,
    ) -> Self {
        let content = content.into();
        let can_use_simple_font_code_path =
            style.font_cascade().code_path(content.view()) != CodePath::Complex;
        let can_use_simplified_content_measuring = can_use_simple_font_code_path &&
            can_use_simplified_text_measuring(
                content.view(),
                &style,
                first_line_style.as_ref(),
            );
        Self {
            content,
            style,
            first_line_style,
            is_combined: false,
            can_use_simple_font_code_path,
            can_use_simplified_content_measuring,
        }
    }

    pub fn with_combined(mut self, is_combined: bool) -> Self {
        self.is_combined = is_combined;
        self
    }

    pub fn content(&self) -> &TextContent {
        &self.content
    }

    pub fn text(&self) -> TextView<'_> {
        self.content.view()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn first_line_style(&self) -> Option<&TextStyle> {
        self.first_line_style.as_ref()
    }

    pub fn is_combined(&self) -> bool {
        self.is_combined
    }

    pub fn can_use_simple_font_code_path(&self) -> bool {
        self.can_use_simple_font_code_path
    }

    /// Whether the width of any range of this box is the plain sum of the
    /// advances of its characters in the primary font.
    pub fn can_use_simplified_content_measuring(&self) -> bool {
        self.can_use_simplified_content_measuring
    }
}

/// A range of an [`InlineTextBox`] produced by inline item building: either a
/// run of whitespace or a run of non-whitespace text.
#[derive(Clone, Copy, Debug)]
pub struct InlineTextItem<'a> {
    inline_text_box: &'a InlineTextBox,
    start: usize,
    length: usize,
    is_whitespace: bool,
}

impl<'a> InlineTextItem<'a> {
    pub fn new(
        inline_text_box: &'a InlineTextBox,
        start: usize,
        length: usize,
        is_whitespace: bool,
    ) -> Self {
        debug_assert!(start + length <= inline_text_box.len());
        Self {
            inline_text_box,
            start,
            length,
            is_whitespace,
        }
    }

    pub fn inline_text_box(&self) -> &'a InlineTextBox {
        self.inline_text_box
    }

    pub fn style(&self) -> &'a TextStyle {
        self.inline_text_box.style()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn is_whitespace(&self) -> bool {
        self.is_whitespace
    }

    pub fn text(&self) -> TextView<'a> {
        self.inline_text_box.text().substring(self.start..self.end())
    }
}
