/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::text_view::{REPLACEMENT_CHARACTER, TextView, is_lead_surrogate, is_trail_surrogate};

/// A cursor over the code points of a text view. Callers pick the
/// implementation matching the storage once, then drive it from generic code.
pub trait CodePointIterator {
    /// The code point under the cursor and the number of code units it spans,
    /// or `None` at the end of the text. Does not move the cursor.
    fn consume(&self) -> Option<(char, usize)>;

    /// Moves the cursor forward by `count` code units.
    fn advance(&mut self, count: usize);

    fn position(&self) -> usize;
}

pub struct Latin1TextIterator<'a> {
    text: &'a [u8],
    position: usize,
}

impl<'a> Latin1TextIterator<'a> {
    pub fn new(text: &'a [u8]) -> Self {
        Self { text, position: 0 }
    }
}

impl CodePointIterator for Latin1TextIterator<'_> {
    #[inline]
    fn consume(&self) -> Option<(char, usize)> {
        self.text.get(self.position).map(|&byte| (byte as char, 1))
    }

    #[inline]
    fn advance(&mut self, count: usize) {
        self.position = (self.position + count).min(self.text.len());
    }

    fn position(&self) -> usize {
        self.position
    }
}

/// Iterates UTF-16 text, joining surrogate pairs. An unpaired surrogate is
/// reported as U+FFFD spanning one code unit.
pub struct SurrogatePairAwareTextIterator<'a> {
    text: &'a [u16],
    position: usize,
}

impl<'a> SurrogatePairAwareTextIterator<'a> {
    pub fn new(text: &'a [u16]) -> Self {
        Self { text, position: 0 }
    }
}

impl CodePointIterator for SurrogatePairAwareTextIterator<'_> {
    fn consume(&self) -> Option<(char, usize)> {
        let unit = *self.text.get(self.position)?;
        if !is_lead_surrogate(unit) && !is_trail_surrogate(unit) {
            return Some((
                char::from_u32(unit as u32).unwrap_or(REPLACEMENT_CHARACTER),
                1,
            ));
        }
        Some(TextView::Utf16(self.text).code_point_at(self.position))
    }

    #[inline]
    fn advance(&mut self, count: usize) {
        self.position = (self.position + count).min(self.text.len());
    }

    fn position(&self) -> usize {
        self.position
    }
}
