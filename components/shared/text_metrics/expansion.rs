/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Justification opportunities. See
//! <https://www.w3.org/TR/css-text-3/#justification-opportunity>.

use serde::Serialize;

use crate::TextDirection;
use crate::text_view::TextView;

/// What may happen at one edge of a run when justifying.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ExpansionEdge {
    Force,
    Allow,
    Forbid,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct ExpansionBehavior {
    pub left: ExpansionEdge,
    pub right: ExpansionEdge,
}

impl ExpansionBehavior {
    pub const fn new(left: ExpansionEdge, right: ExpansionEdge) -> Self {
        Self { left, right }
    }

    pub const fn default_behavior() -> Self {
        Self::new(ExpansionEdge::Forbid, ExpansionEdge::Allow)
    }

    pub const fn forbid_all() -> Self {
        Self::new(ExpansionEdge::Forbid, ExpansionEdge::Forbid)
    }
}

impl Default for ExpansionBehavior {
    fn default() -> Self {
        Self::default_behavior()
    }
}

/// Characters that justification stretches like a space.
#[inline]
pub fn treat_as_space(character: char) -> bool {
    matches!(character, ' ' | '\t' | '\n' | '\u{A0}')
}

pub fn is_cjk_ideograph(character: char) -> bool {
    matches!(
        character as u32,
        0x4E00..=0x9FFF |
            0x3400..=0x4DBF |
            0x2E80..=0x2EFF |
            0x2F00..=0x2FDF |
            0x31C0..=0x31EF |
            0xF900..=0xFAFF |
            0x20000..=0x2A6DF |
            0x2A700..=0x2B73F |
            0x2B740..=0x2B81F |
            0x2F800..=0x2FA1F
    )
}

/// Ideographs plus the symbols and punctuation that are typeset alongside them
/// and can be spaced apart when justifying.
pub fn is_cjk_ideograph_or_symbol(character: char) -> bool {
    match character as u32 {
        // Mandarin tone marks.
        0x2C7 | 0x2CA | 0x2CB | 0x2D9 => true,
        0x2020 | 0x2021 | 0x2030 | 0x203B | 0x203C | 0x2042 | 0x2047..=0x2049 | 0x2051 => true,
        0x20DD | 0x20DE | 0x2100 | 0x2103 | 0x2105 | 0x2109 | 0x210A | 0x2113 | 0x2116 => true,
        0x2121 | 0x212B | 0x213B | 0x2150..=0x2152 | 0x2156..=0x215A => true,
        0x2160..=0x216B | 0x2170..=0x217B | 0x217F | 0x2189 => true,
        0x2307 | 0x2312 | 0x23BE..=0x23CC | 0x23CE | 0x2423 => true,
        0x2460..=0x2492 | 0x249C..=0x24FF => true,
        0x25A0..=0x25A2 | 0x25AA | 0x25AB | 0x25B1..=0x25B3 | 0x25B6 | 0x25B7 => true,
        0x25BC | 0x25BD | 0x25C0 | 0x25C1 | 0x25C6 | 0x25C7 | 0x25C9 | 0x25CB | 0x25CC => true,
        0x25CE..=0x25D3 | 0x25E2..=0x25E6 | 0x25EF => true,
        0x2600..=0x2603 | 0x2605 | 0x2606 | 0x260E | 0x2616 | 0x2617 | 0x2640 | 0x2642 => true,
        0x2660..=0x266F | 0x2672..=0x267D => true,
        0x26A0 | 0x26BD | 0x26BE | 0x2713 | 0x271A | 0x273F | 0x2740 | 0x2756 => true,
        0x2776..=0x277F | 0x2B1A => true,
        // Ideographic description characters.
        0x2FF0..=0x2FFF => true,
        // Wavy dash is not spaced.
        0x3030 => false,
        // CJK symbols and punctuation, kana, bopomofo, enclosed letters, compatibility.
        0x3000..=0x303F | 0x3040..=0x30FF | 0x3100..=0x312F | 0x3190..=0x31BF => true,
        0x3200..=0x33FF => true,
        0xF860..=0xF862 | 0xFE30..=0xFE4F | 0xFE10..=0xFE12 | 0xFE19 => true,
        0xFF0D | 0xFF1B | 0xFF1C | 0xFF1E => false,
        // Halfwidth and fullwidth forms.
        0xFF00..=0xFFEF => true,
        0x1F100 | 0x1F110..=0x1F129 | 0x1F130..=0x1F149 | 0x1F150..=0x1F169 => true,
        0x1F170..=0x1F189 | 0x1F200..=0x1F6FF => true,
        _ => is_cjk_ideograph(character),
    }
}

/// Counts the justification opportunities inside `text`. Returns the count
/// and whether the text ends right after an opportunity, which callers use to
/// avoid doubling up at run boundaries.
pub fn expansion_opportunity_count(
    text: TextView<'_>,
    direction: TextDirection,
    behavior: ExpansionBehavior,
    expand_around_ideographs: bool,
) -> (usize, bool) {
    let mut count: usize = 0;
    let mut is_after_expansion = behavior.left == ExpansionEdge::Forbid;
    if behavior.left == ExpansionEdge::Force {
        count += 1;
        is_after_expansion = true;
    }

    let mut visit = |character: char| {
        if treat_as_space(character) {
            count += 1;
            is_after_expansion = true;
            return;
        }
        if expand_around_ideographs && is_cjk_ideograph_or_symbol(character) {
            if !is_after_expansion {
                count += 1;
            }
            count += 1;
            is_after_expansion = true;
            return;
        }
        is_after_expansion = false;
    };

    match direction {
        TextDirection::Ltr => text.chars().for_each(&mut visit),
        TextDirection::Rtl => {
            let characters: Vec<char> = text.chars().collect();
            characters.into_iter().rev().for_each(&mut visit);
        },
    }

    if !is_after_expansion && behavior.right == ExpansionEdge::Force {
        count += 1;
        is_after_expansion = true;
    } else if is_after_expansion && behavior.right == ExpansionEdge::Forbid {
        debug_assert!(count > 0);
        count = count.saturating_sub(1);
        is_after_expansion = false;
    }

    (count, is_after_expansion)
}
