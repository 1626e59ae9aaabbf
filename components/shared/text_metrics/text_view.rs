/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Text storage for inline content. Offsets handed around by layout are always
//! code units of the storage: bytes for Latin-1 content and UTF-16 code units
//! otherwise.

use std::ops::Range;
use std::sync::Arc;

pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

#[inline]
pub fn is_lead_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

#[inline]
pub fn is_trail_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

#[inline]
fn combine_surrogates(lead: u16, trail: u16) -> char {
    let code_point = 0x10000 + (((lead as u32) - 0xD800) << 10) + ((trail as u32) - 0xDC00);
    char::from_u32(code_point).unwrap_or(REPLACEMENT_CHARACTER)
}

/// The owned text of an inline text box.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TextContent {
    Latin1(Arc<[u8]>),
    Utf16(Arc<[u16]>),
}

impl TextContent {
    /// Stores `text` with one byte per character when every character is
    /// Latin-1, and as UTF-16 otherwise.
    pub fn new(text: &str) -> Self {
        if text.chars().all(|character| (character as u32) < 0x100) {
            TextContent::Latin1(text.chars().map(|character| character as u8).collect())
        } else {
            TextContent::Utf16(text.encode_utf16().collect())
        }
    }

    pub fn from_utf16(units: Vec<u16>) -> Self {
        TextContent::Utf16(units.into())
    }

    pub fn from_latin1(bytes: Vec<u8>) -> Self {
        TextContent::Latin1(bytes.into())
    }

    pub fn view(&self) -> TextView<'_> {
        match self {
            TextContent::Latin1(bytes) => TextView::Latin1(bytes),
            TextContent::Utf16(units) => TextView::Utf16(units),
        }
    }

    pub fn len(&self) -> usize {
        self.view().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_8bit(&self) -> bool {
        matches!(self, TextContent::Latin1(_))
    }
}

impl From<&str> for TextContent {
    fn from(text: &str) -> Self {
        TextContent::new(text)
    }
}

/// A borrowed view of [`TextContent`], or of any slice of code units.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextView<'a> {
    Latin1(&'a [u8]),
    Utf16(&'a [u16]),
}

impl<'a> TextView<'a> {
    pub fn len(&self) -> usize {
        match self {
            TextView::Latin1(bytes) => bytes.len(),
            TextView::Utf16(units) => units.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_8bit(&self) -> bool {
        matches!(self, TextView::Latin1(_))
    }

    /// The code unit at `index`, widened to 16 bits.
    #[inline]
    pub fn code_unit_at(&self, index: usize) -> u16 {
        match self {
            TextView::Latin1(bytes) => bytes[index] as u16,
            TextView::Utf16(units) => units[index],
        }
    }

    pub fn substring(&self, range: Range<usize>) -> TextView<'a> {
        match *self {
            TextView::Latin1(bytes) => TextView::Latin1(&bytes[range]),
            TextView::Utf16(units) => TextView::Utf16(&units[range]),
        }
    }

    /// Decodes the code point starting at `index`, returning it along with the
    /// number of code units it occupies. Unpaired surrogates decode to U+FFFD
    /// and occupy a single unit.
    pub fn code_point_at(&self, index: usize) -> (char, usize) {
        match self {
            TextView::Latin1(bytes) => (bytes[index] as char, 1),
            TextView::Utf16(units) => {
                let unit = units[index];
                if is_lead_surrogate(unit) {
                    if let Some(&trail) = units.get(index + 1) {
                        if is_trail_surrogate(trail) {
                            return (combine_surrogates(unit, trail), 2);
                        }
                    }
                    return (REPLACEMENT_CHARACTER, 1);
                }
                if is_trail_surrogate(unit) {
                    return (REPLACEMENT_CHARACTER, 1);
                }
                (char::from_u32(unit as u32).unwrap_or(REPLACEMENT_CHARACTER), 1)
            },
        }
    }

    /// Moves `index` back to the start of the code point that contains it,
    /// never going before `start`.
    pub fn align_to_code_point_start(&self, start: usize, index: usize) -> usize {
        let TextView::Utf16(units) = self else {
            return index;
        };
        if index > start &&
            index < units.len() &&
            is_trail_surrogate(units[index]) &&
            is_lead_surrogate(units[index - 1])
        {
            return index - 1;
        }
        index
    }

    /// The offset just past the code point that starts at `index`.
    pub fn next_code_point_boundary(&self, index: usize) -> usize {
        if index >= self.len() {
            return self.len();
        }
        index + self.code_point_at(index).1
    }

    /// Iterates the characters of this view, replacing unpaired surrogates.
    pub fn chars(self) -> impl Iterator<Item = char> + 'a {
        let view = self;
        let mut position = 0;
        std::iter::from_fn(move || {
            if position >= view.len() {
                return None;
            }
            let (character, length) = view.code_point_at(position);
            position += length;
            Some(character)
        })
    }

    pub fn to_utf16(&self) -> Vec<u16> {
        match self {
            TextView::Latin1(bytes) => bytes.iter().map(|&byte| byte as u16).collect(),
            TextView::Utf16(units) => units.to_vec(),
        }
    }

    /// A UTF-8 copy of this view, with unpaired surrogates replaced. Each
    /// replacement occupies exactly one code unit of the source.
    pub fn to_string_lossy(&self) -> String {
        self.chars().collect()
    }
}
