// SPDX-License-Identifier: MIT OR Apache-2.0
//! Copy, paste and transform commands over a flat value sequence.
//!
//! Every command answers three questions for a [`CommandContext`]: whether
//! it applies, how its menu label reads, and how it rewrites the values.
//! [`CATALOGUE`] lists the commands in menu priority order.

use crate::host::TrackScale;
use crate::settings::FormatSettings;
use crate::span::{FormattedValueSpan, Section};
use crate::spec::TrackMode;
use crate::values::ValueShape;

/// Everything a command looks at
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    /// Easing mode of the chain's leader
    pub mode: TrackMode,
    /// Value layout
    pub shape: ValueShape,
    /// Index of the section's left value in `values`
    pub focus: usize,
    /// Current values, host-internal
    pub values: &'a [i32],
    /// Value scale of the track
    pub scale: TrackScale,
    /// Parsed clipboard contents
    pub clipboard: &'a FormattedValueSpan,
    /// Display options
    pub settings: &'a FormatSettings,
}

impl CommandContext<'_> {
    /// Section of the current values
    pub fn section(&self) -> Section {
        match self.shape {
            ValueShape::Static => Section::SingleValue,
            ValueShape::TwoPoint => Section::At(0),
            ValueShape::Chain => Section::At(self.focus as isize),
        }
    }

    /// Current values as a span, section at the focus
    pub fn current_span(&self) -> FormattedValueSpan {
        self.span_of(self.values)
    }

    fn span_of(&self, values: &[i32]) -> FormattedValueSpan {
        FormattedValueSpan::from_internal(values, self.scale.denominator)
            .with_section(self.section())
    }

    /// Whether values exist left of the section
    pub fn has_left_neighbor(&self) -> bool {
        self.shape == ValueShape::Chain && self.focus > 0
    }

    /// Whether values exist right of the section
    pub fn has_right_neighbor(&self) -> bool {
        self.shape == ValueShape::Chain && self.focus + 2 < self.values.len()
    }

    fn is_static(&self) -> bool {
        self.shape == ValueShape::Static
    }

    fn clip(&self, index: usize) -> i32 {
        self.scale.to_internal(self.clipboard.values()[index])
    }

    /// Single value to paste: a lone clipboard value or the left of its section
    fn clip_anchor(&self) -> Option<i32> {
        if self.clipboard.len() == 1 {
            return Some(self.clip(0));
        }
        self.clipboard.full_section().map(|s| self.clip(s))
    }

    /// Section of the clipboard as internal values
    fn clip_pair(&self) -> Option<(i32, i32)> {
        self.clipboard
            .section_pair()
            .map(|(left, right)| (self.scale.to_internal(left), self.scale.to_internal(right)))
    }

    fn clip_single(&self) -> Option<i32> {
        (self.clipboard.len() == 1).then(|| self.clip(0))
    }

    /// Text Copy puts on the clipboard
    pub fn copy_text(&self) -> String {
        self.current_span()
            .to_string(self.scale.precision, false, false, self.settings.copy_zigzag)
    }
}

/// A command offered in the easing context menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EasingCommand {
    /// Copy all values to the clipboard
    Copy,
    /// Paste the single value of a static easing
    PasteUnique,
    /// Paste both values of a two-point easing
    PasteTwoPoint,
    /// Paste only the left value of a two-point easing
    PasteLeft,
    /// Paste only the right value of a two-point easing
    PasteRight,
    /// Paste the clipboard section and everything left of it
    PasteLeftAll,
    /// Paste the clipboard section and everything right of it
    PasteRightAll,
    /// Paste the whole clipboard aligned on the section
    PasteAll,
    /// Paste the clipboard from the first value on
    PasteAllHeaded,
    /// Paste the clipboard ending at the last value
    PasteAllTailed,
    /// Set every value to the clipboard value
    PasteUniform,
    /// Set the section's left value and everything left of it
    PasteUniformLeft,
    /// Set the section's right value and everything right of it
    PasteUniformRight,
    /// Copy the section's left value to its right
    WriteLeftToRight,
    /// Copy the section's right value to its left
    WriteRightToLeft,
    /// Exchange the section's two values
    Swap,
    /// Flatten everything left of the section to its left value
    WriteLeftFlat,
    /// Flatten everything right of the section to its right value
    WriteRightFlat,
    /// Move every value one section to the left
    TranslateLeft,
    /// Move every value one section to the right
    TranslateRight,
    /// Mirror the values around the section's left point
    FlipLeft,
    /// Mirror the values around the middle of the section
    FlipMiddle,
    /// Mirror the values around the section's right point
    FlipRight,
    /// Reverse all values
    FlipEntire,
}

/// All commands in menu priority order
pub const CATALOGUE: [EasingCommand; 24] = [
    EasingCommand::Copy,
    EasingCommand::PasteUnique,
    EasingCommand::PasteTwoPoint,
    EasingCommand::PasteLeft,
    EasingCommand::PasteRight,
    EasingCommand::PasteAll,
    EasingCommand::PasteLeftAll,
    EasingCommand::PasteRightAll,
    EasingCommand::PasteAllHeaded,
    EasingCommand::PasteAllTailed,
    EasingCommand::PasteUniform,
    EasingCommand::PasteUniformLeft,
    EasingCommand::PasteUniformRight,
    EasingCommand::WriteLeftToRight,
    EasingCommand::WriteRightToLeft,
    EasingCommand::Swap,
    EasingCommand::WriteLeftFlat,
    EasingCommand::WriteRightFlat,
    EasingCommand::TranslateLeft,
    EasingCommand::TranslateRight,
    EasingCommand::FlipLeft,
    EasingCommand::FlipMiddle,
    EasingCommand::FlipRight,
    EasingCommand::FlipEntire,
];

impl EasingCommand {
    /// Stable identifier
    pub fn id(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::PasteUnique => "paste.unique",
            Self::PasteTwoPoint => "paste.two_point",
            Self::PasteLeft => "paste.left",
            Self::PasteRight => "paste.right",
            Self::PasteLeftAll => "paste.left_all",
            Self::PasteRightAll => "paste.right_all",
            Self::PasteAll => "paste.all",
            Self::PasteAllHeaded => "paste.all_headed",
            Self::PasteAllTailed => "paste.all_tailed",
            Self::PasteUniform => "paste.uniform",
            Self::PasteUniformLeft => "paste.uniform_left",
            Self::PasteUniformRight => "paste.uniform_right",
            Self::WriteLeftToRight => "write.left_to_right",
            Self::WriteRightToLeft => "write.right_to_left",
            Self::Swap => "write.swap",
            Self::WriteLeftFlat => "write.left_flat",
            Self::WriteRightFlat => "write.right_flat",
            Self::TranslateLeft => "translate.left",
            Self::TranslateRight => "translate.right",
            Self::FlipLeft => "flip.left",
            Self::FlipMiddle => "flip.middle",
            Self::FlipRight => "flip.right",
            Self::FlipEntire => "flip.entire",
        }
    }

    /// Look up a command by identifier
    pub fn from_id(id: &str) -> Option<Self> {
        CATALOGUE.iter().copied().find(|command| command.id() == id)
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Copy => "Copy",
            Self::PasteUnique | Self::PasteTwoPoint => "Paste",
            Self::PasteLeft => "Paste left",
            Self::PasteRight => "Paste right",
            Self::PasteLeftAll => "Paste left side",
            Self::PasteRightAll => "Paste right side",
            Self::PasteAll => "Paste both sides",
            Self::PasteAllHeaded => "Paste from start",
            Self::PasteAllTailed => "Paste to end",
            Self::PasteUniform => "Paste to all",
            Self::PasteUniformLeft => "Paste to left side",
            Self::PasteUniformRight => "Paste to right side",
            Self::WriteLeftToRight => "Left to right",
            Self::WriteRightToLeft => "Right to left",
            Self::Swap => "Swap left and right",
            Self::WriteLeftFlat => "Flatten left side",
            Self::WriteRightFlat => "Flatten right side",
            Self::TranslateLeft => "Shift left",
            Self::TranslateRight => "Shift right",
            Self::FlipLeft => "Flip at left point",
            Self::FlipMiddle => "Flip at section",
            Self::FlipRight => "Flip at right point",
            Self::FlipEntire => "Flip all",
        }
    }

    /// Whether this command reads the clipboard
    pub fn is_paste(self) -> bool {
        matches!(
            self,
            Self::PasteUnique
                | Self::PasteTwoPoint
                | Self::PasteLeft
                | Self::PasteRight
                | Self::PasteLeftAll
                | Self::PasteRightAll
                | Self::PasteAll
                | Self::PasteAllHeaded
                | Self::PasteAllTailed
                | Self::PasteUniform
                | Self::PasteUniformLeft
                | Self::PasteUniformRight
        )
    }

    /// Whether this command rewrites values
    pub fn is_mutating(self) -> bool {
        self != Self::Copy
    }

    /// Whether the command can run in this context
    pub fn is_applicable(self, ctx: &CommandContext<'_>) -> bool {
        let clip_full = ctx.clipboard.has_section_full();
        let non_static = !ctx.is_static();
        let both = ctx.has_left_neighbor() && ctx.has_right_neighbor();
        match self {
            Self::Copy => true,
            Self::PasteUnique => ctx.is_static() && ctx.clip_anchor().is_some(),
            Self::PasteTwoPoint | Self::PasteLeft | Self::PasteRight => {
                ctx.shape == ValueShape::TwoPoint && clip_full
            }
            Self::PasteLeftAll => clip_full && ctx.has_left_neighbor(),
            Self::PasteRightAll => clip_full && ctx.has_right_neighbor(),
            Self::PasteAll => clip_full && both,
            Self::PasteAllHeaded | Self::PasteAllTailed => non_static && ctx.clipboard.len() >= 2,
            Self::PasteUniform | Self::PasteUniformLeft | Self::PasteUniformRight => {
                non_static && ctx.clip_single().is_some()
            }
            Self::WriteLeftToRight | Self::WriteRightToLeft | Self::Swap => non_static,
            Self::WriteLeftFlat | Self::FlipLeft => ctx.has_left_neighbor(),
            Self::WriteRightFlat | Self::FlipRight => ctx.has_right_neighbor(),
            Self::TranslateLeft | Self::TranslateRight | Self::FlipMiddle => both,
            Self::FlipEntire => ctx.shape == ValueShape::Chain,
        }
    }

    /// Values after running the command on a copy of the current ones
    pub fn result(self, ctx: &CommandContext<'_>) -> Vec<i32> {
        let mut values = ctx.values.to_vec();
        self.mutate(ctx, &mut values);
        values
    }

    /// Whether running the command would change anything.
    ///
    /// Paste commands count as effective whenever they apply.
    pub fn is_effective(self, ctx: &CommandContext<'_>) -> bool {
        self.is_paste() || self == Self::Copy || self.result(ctx) != ctx.values
    }

    /// Menu label: the name followed by a preview of the resulting values
    pub fn label(self, ctx: &CommandContext<'_>) -> String {
        format!("{}\t{}", self.name(), self.preview(ctx))
    }

    /// Preview of the values around the section after the command runs
    pub fn preview(self, ctx: &CommandContext<'_>) -> String {
        let trail = ctx.settings.trail();
        let (left, right) = match self {
            Self::PasteLeft => (trail, -1),
            Self::PasteRight => (-1, trail),
            _ => (trail, trail),
        };
        let span = if self == Self::Copy {
            ctx.current_span()
        } else {
            ctx.span_of(&self.result(ctx))
        };
        let ellipsis = ctx.settings.ellipsis;
        span.trim_from_sect(left, right)
            .to_string(ctx.scale.precision, ellipsis, ellipsis, ctx.settings.zigzag)
    }

    /// Rewrite `values` in place.
    ///
    /// `values` must have the layout of `ctx`; the command is expected to be
    /// applicable, otherwise the values may be left untouched.
    pub fn mutate(self, ctx: &CommandContext<'_>, values: &mut [i32]) {
        let len = values.len();
        if len == 0 {
            return;
        }
        let f = ctx.focus.min(len - 1);
        let right = (f + 1).min(len - 1);
        let clip_len = ctx.clipboard.len();

        match self {
            Self::Copy => {}
            Self::PasteUnique => {
                if let Some(value) = ctx.clip_anchor() {
                    values[0] = value;
                }
            }
            Self::PasteTwoPoint => {
                if let Some((left, right)) = ctx.clip_pair() {
                    values[0] = left;
                    values[len - 1] = right;
                }
            }
            Self::PasteLeft => {
                if let Some((left, _)) = ctx.clip_pair() {
                    values[0] = left;
                }
            }
            Self::PasteRight => {
                if let Some((_, right)) = ctx.clip_pair() {
                    values[len - 1] = right;
                }
            }
            Self::PasteLeftAll => {
                if let Some(s) = ctx.clipboard.full_section() {
                    paste_aligned(ctx, values, f, s, 0..s + 2);
                }
            }
            Self::PasteRightAll => {
                if let Some(s) = ctx.clipboard.full_section() {
                    paste_aligned(ctx, values, f, s, s..clip_len);
                }
            }
            Self::PasteAll => {
                if let Some(s) = ctx.clipboard.full_section() {
                    paste_aligned(ctx, values, f, s, 0..clip_len);
                }
            }
            Self::PasteAllHeaded => {
                for (i, value) in values.iter_mut().enumerate().take(clip_len) {
                    *value = ctx.clip(i);
                }
            }
            Self::PasteAllTailed => {
                let count = len.min(clip_len);
                for k in 0..count {
                    values[len - 1 - k] = ctx.clip(clip_len - 1 - k);
                }
            }
            Self::PasteUniform => {
                if let Some(value) = ctx.clip_single() {
                    values.fill(value);
                }
            }
            Self::PasteUniformLeft => {
                if let Some(value) = ctx.clip_single() {
                    values[..=f].fill(value);
                }
            }
            Self::PasteUniformRight => {
                if let Some(value) = ctx.clip_single() {
                    values[right..].fill(value);
                }
            }
            Self::WriteLeftToRight => values[right] = values[f],
            Self::WriteRightToLeft => values[f] = values[right],
            Self::Swap => values.swap(f, right),
            Self::WriteLeftFlat => {
                let value = values[f];
                values[..f].fill(value);
            }
            Self::WriteRightFlat => {
                let value = values[right];
                values[right..].fill(value);
            }
            Self::TranslateLeft => values.copy_within(1.., 0),
            Self::TranslateRight => values.copy_within(..len - 1, 1),
            Self::FlipLeft => reflect(ctx.mode, values, 2 * f),
            Self::FlipMiddle => reflect(ctx.mode, values, 2 * f + 1),
            Self::FlipRight => reflect(ctx.mode, values, 2 * f + 2),
            Self::FlipEntire => reflect(ctx.mode, values, len - 1),
        }
    }
}

/// Paste clipboard values `range`, placing the clipboard section's left value
/// at `focus`. Targets outside the sequence are skipped.
fn paste_aligned(
    ctx: &CommandContext<'_>,
    values: &mut [i32],
    focus: usize,
    section: usize,
    range: std::ops::Range<usize>,
) {
    for j in range {
        let Some(target) = (focus + j).checked_sub(section) else {
            continue;
        };
        if let Some(slot) = values.get_mut(target) {
            *slot = ctx.clip(j);
        }
    }
}

/// Mirror the sequence around half-index `doubled_pivot / 2`.
///
/// Positions that reflect past either end take the nearest end value. With
/// an instant easing each section shows its right value, so the pivot moves
/// by half a position to keep sections, not points, mirrored.
fn reflect(mode: TrackMode, values: &mut [i32], doubled_pivot: usize) {
    let original = values.to_vec();
    let last = original.len() as isize - 1;
    let pivot = doubled_pivot as isize + isize::from(mode.is_instant());
    for (i, value) in values.iter_mut().enumerate() {
        let mirrored = (pivot - i as isize).clamp(0, last);
        *value = original[mirrored as usize];
    }
}
