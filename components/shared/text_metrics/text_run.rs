/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::ops::Range;

use crate::expansion::ExpansionBehavior;
use crate::text_view::TextView;
use crate::{InlineLayoutUnit, TextDirection};

/// A range of text handed to a [`crate::FontCascade`] for measuring, along
/// with the bidi and tab settings that affect its shaping.
#[derive(Clone, Debug)]
pub struct TextRun<'a> {
    storage: TextView<'a>,
    range: Range<usize>,
    pub direction: TextDirection,
    /// Whether `direction` overrides the bidi class of every character.
    pub directional_override: bool,
    /// Tab stops are enabled when this is set, in multiples of the space width.
    pub tab_size: Option<u32>,
    /// The logical left of the content, used to resolve tab stops.
    pub x_position: InlineLayoutUnit,
    pub expansion_behavior: ExpansionBehavior,
}

impl<'a> TextRun<'a> {
    pub fn new(storage: TextView<'a>, range: Range<usize>) -> Self {
        debug_assert!(range.start <= range.end && range.end <= storage.len());
        Self {
            storage,
            range,
            direction: TextDirection::Ltr,
            directional_override: false,
            tab_size: None,
            x_position: 0.,
            expansion_behavior: ExpansionBehavior::default_behavior(),
        }
    }

    pub fn with_direction(mut self, direction: TextDirection, directional_override: bool) -> Self {
        self.direction = direction;
        self.directional_override = directional_override;
        self
    }

    pub fn with_tab_size(mut self, tab_size: Option<u32>) -> Self {
        self.tab_size = tab_size;
        self
    }

    pub fn with_x_position(mut self, x_position: InlineLayoutUnit) -> Self {
        self.x_position = x_position;
        self
    }

    /// The measured text.
    pub fn text(&self) -> TextView<'a> {
        self.storage.substring(self.range.clone())
    }

    /// The whole text storage the run points into.
    pub fn storage(&self) -> TextView<'a> {
        self.storage
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}
