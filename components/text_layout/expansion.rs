/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Distribution of justification opportunities over the runs of a line, for
//! `text-align: justify`.

use std::ops::Range;

use log::debug;
use smallvec::SmallVec;
use text_metrics::{ExpansionBehavior, ExpansionEdge, TextDirection};

use crate::inline_text_box::InlineTextBox;
use crate::text_properties::should_preserve_spaces_and_tabs;

#[derive(Clone, Copy, Debug)]
pub enum LineRunKind<'a> {
    Text {
        inline_text_box: &'a InlineTextBox,
        start: usize,
        length: usize,
    },
    /// An inline-block, image or other replaced content.
    AtomicBox,
    InlineBoxStart,
    InlineBoxEnd,
    SoftLineBreak,
    HardLineBreak,
    WordBreakOpportunity,
    /// Out-of-flow content that leaves no trace on the line.
    Opaque,
}

/// One run of a line box, in logical order.
#[derive(Clone, Copy, Debug)]
pub struct LineRun<'a> {
    pub kind: LineRunKind<'a>,
    pub inline_direction: TextDirection,
}

impl<'a> LineRun<'a> {
    pub fn new(kind: LineRunKind<'a>) -> Self {
        Self {
            kind,
            inline_direction: TextDirection::Ltr,
        }
    }

    pub fn text(inline_text_box: &'a InlineTextBox, start: usize, length: usize) -> Self {
        debug_assert!(start + length <= inline_text_box.len());
        Self::new(LineRunKind::Text {
            inline_text_box,
            start,
            length,
        })
    }

    pub fn with_inline_direction(mut self, inline_direction: TextDirection) -> Self {
        self.inline_direction = inline_direction;
        self
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, LineRunKind::Text { .. })
    }

    pub fn is_atomic_box(&self) -> bool {
        matches!(self.kind, LineRunKind::AtomicBox)
    }

    /// Text with at least one character, or an atomic box.
    fn has_content(&self) -> bool {
        match self.kind {
            LineRunKind::Text { length, .. } => length > 0,
            LineRunKind::AtomicBox => true,
            _ => false,
        }
    }
}

/// Per-run justification opportunities of a line. Both lists are indexed by
/// the position of the run in the requested range.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpansionInfo {
    pub opportunity_list: SmallVec<[usize; 8]>,
    pub behavior_list: SmallVec<[ExpansionBehavior; 8]>,
    pub opportunity_count: usize,
}

/// Computes where a justified line may stretch. `hanging_trailing_whitespace_length`
/// is the number of code units of hanging whitespace at the end of the last
/// text run of the line, which never receives extra space.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "computed_expansions",
        skip_all,
        fields(servo_profiling = true),
        level = "trace",
    )
)]
pub fn computed_expansions(
    runs: &[LineRun<'_>],
    run_range: Range<usize>,
    hanging_trailing_whitespace_length: usize,
) -> ExpansionInfo {
    let mut expansion_info = ExpansionInfo::default();
    if run_range.start > run_range.end || run_range.end > runs.len() {
        debug_assert!(false, "Run range {run_range:?} outside of {} runs", runs.len());
        return expansion_info;
    }

    // Line start behaves as if it followed an expansion, so the first run never
    // expands on its leading side.
    let mut run_is_after_expansion = true;
    let last_text_run_index_for_trimming = match hanging_trailing_whitespace_length {
        0 => None,
        _ => runs.iter().rposition(LineRun::is_text),
    };
    let mut last_index_with_content = None;

    for (index, run) in runs[run_range.clone()].iter().enumerate() {
        let run_index = run_range.start + index;
        let mut expansion_behavior = ExpansionBehavior::default_behavior();
        let mut expansion_opportunities_in_run = 0;

        match run.kind {
            LineRunKind::Text {
                inline_text_box,
                start,
                length,
            } => {
                // Preserved spaces keep their width, unless they hang and are
                // trimmed from the line anyway.
                let may_alter_spacing_within_text =
                    !should_preserve_spaces_and_tabs(inline_text_box.style()) ||
                        hanging_trailing_whitespace_length > 0;
                if may_alter_spacing_within_text {
                    if inline_text_box.is_combined() {
                        expansion_behavior = ExpansionBehavior::forbid_all();
                    } else {
                        expansion_behavior.left = if run_is_after_expansion {
                            ExpansionEdge::Forbid
                        } else {
                            ExpansionEdge::Allow
                        };
                        expansion_behavior.right = ExpansionEdge::Allow;
                        let mut length = length;
                        if last_text_run_index_for_trimming == Some(run_index) {
                            length = length.saturating_sub(hanging_trailing_whitespace_length);
                        }
                        let text = inline_text_box.text().substring(start..start + length);
                        (expansion_opportunities_in_run, run_is_after_expansion) = inline_text_box
                            .style()
                            .font_cascade()
                            .expansion_opportunity_count(text, run.inline_direction, expansion_behavior);
                    }
                }
            },
            LineRunKind::AtomicBox => run_is_after_expansion = false,
            _ => {},
        }

        expansion_info.behavior_list.push(expansion_behavior);
        expansion_info
            .opportunity_list
            .push(expansion_opportunities_in_run);
        expansion_info.opportunity_count += expansion_opportunities_in_run;

        if run.has_content() {
            last_index_with_content = Some(index);
        }
    }

    // No expansion after the last piece of content of the line.
    if let Some(last_behavior) = expansion_info.behavior_list.last_mut() {
        last_behavior.right = ExpansionEdge::Forbid;
    }
    if let Some(index) = last_index_with_content {
        expansion_info.behavior_list[index].right = ExpansionEdge::Forbid;
        if expansion_info.opportunity_list[index] > 0 && run_is_after_expansion {
            // The line ends right after an opportunity, e.g. a CJK ideograph.
            // Trailing collapsible whitespace is already trimmed at this point.
            debug_assert!(expansion_info.opportunity_count > 0);
            expansion_info.opportunity_list[index] -= 1;
            expansion_info.opportunity_count -= 1;
        }
    }

    debug!(
        "{} expansion opportunities over {} runs",
        expansion_info.opportunity_count,
        run_range.len()
    );
    expansion_info
}
