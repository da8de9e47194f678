// SPDX-License-Identifier: MIT OR Apache-2.0
//! Windowed, annotated views over value sequences.
//!
//! A [`FormattedValueSpan`] is what menu previews and copied text are made
//! from. It remembers which pair of values is the active section and
//! whether values were cut off on either side, and renders as
//! `… 1.0 ↗ [2.0 ↗ 3.0]`.

use crate::values::internal_to_display;
use std::fmt::Write;

/// Marker for values cut off the span
pub const ELLIPSIS: &str = "…";
/// Separator between values when the direction is not shown
pub const ARROW: &str = "→";
/// Separator for a rising pair
pub const ARROW_UP: &str = "↗";
/// Separator for a falling pair
pub const ARROW_DOWN: &str = "↘";

/// Active section of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    /// `values[i]` and `values[i + 1]` form the active pair.
    ///
    /// After trimming, `i` may be `-1` (only the right value is inside the
    /// span) or `len - 1` (only the left value is).
    At(isize),
    /// A lone value with no pair around it
    SingleValue,
    /// No active section
    #[default]
    None,
}

/// A run of display values with an optional active section
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormattedValueSpan {
    values: Vec<f64>,
    section: Section,
    more_left: bool,
    more_right: bool,
}

impl FormattedValueSpan {
    /// Create a span. One value gets [`Section::SingleValue`], two values get
    /// the implicit pair `At(0)`, anything else has no section.
    pub fn new(values: Vec<f64>) -> Self {
        let section = match values.len() {
            1 => Section::SingleValue,
            2 => Section::At(0),
            _ => Section::None,
        };
        Self {
            values,
            section,
            more_left: false,
            more_right: false,
        }
    }

    /// Create a span from host-internal values
    pub fn from_internal(values: &[i32], denominator: i32) -> Self {
        Self::new(
            values
                .iter()
                .map(|&v| internal_to_display(v, denominator))
                .collect(),
        )
    }

    /// Replace the section
    pub fn with_section(mut self, section: Section) -> Self {
        self.section = section;
        self
    }

    /// Values in the span
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the span holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Active section
    pub fn section(&self) -> Section {
        self.section
    }

    /// Values were cut off on the left
    pub fn more_left(&self) -> bool {
        self.more_left
    }

    /// Values were cut off on the right
    pub fn more_right(&self) -> bool {
        self.more_right
    }

    /// Whether any section, including a clipped or single one, is set
    pub fn has_section(&self) -> bool {
        self.section != Section::None
    }

    /// Whether both values of the section are inside the span
    pub fn has_section_full(&self) -> bool {
        self.full_section().is_some()
    }

    /// Index of the section's left value when both values are inside the span
    pub fn full_section(&self) -> Option<usize> {
        match self.section {
            Section::At(s) if s >= 0 && (s as usize) + 1 < self.values.len() => Some(s as usize),
            _ => None,
        }
    }

    /// Values of the section when both are inside the span
    pub fn section_pair(&self) -> Option<(f64, f64)> {
        self.full_section()
            .map(|s| (self.values[s], self.values[s + 1]))
    }

    /// Section as a pair index; a single value sits at `-1`
    fn section_position(&self) -> Option<isize> {
        match self.section {
            Section::At(s) => Some(s),
            Section::SingleValue => Some(-1),
            Section::None => None,
        }
    }

    /// Drop `left` values from the front and `right` from the back.
    ///
    /// Negative counts are treated as zero. The section survives if at least
    /// one of its values is kept. The `more_*` flags are only ever set.
    pub fn trim_from_end(&self, left: isize, right: isize) -> Self {
        let left = left.max(0);
        let right = right.max(0);
        let len = self.values.len() as isize;
        let more_left = self.more_left || left > 0;
        let more_right = self.more_right || right > 0;

        let kept = len.saturating_sub(left).saturating_sub(right);
        if kept <= 0 {
            return Self {
                values: Vec::new(),
                section: Section::None,
                more_left,
                more_right,
            };
        }

        let section = match self.section_position() {
            Some(s) if s.saturating_add(1) < left || s >= len - right => Section::None,
            Some(s) => {
                let moved = s - left;
                if self.section == Section::SingleValue && moved == -1 && kept == 1 {
                    Section::SingleValue
                } else {
                    Section::At(moved)
                }
            }
            None => Section::None,
        };

        Self {
            values: self.values[left as usize..(len - right) as usize].to_vec(),
            section,
            more_left,
            more_right,
        }
    }

    /// Keep `left_trail` values before the section and `right_trail` after it.
    ///
    /// A trail of `-1` also drops the section's own value on that side.
    /// Without a section the whole span is dropped.
    pub fn trim_from_sect(&self, left_trail: isize, right_trail: isize) -> Self {
        let Some(s) = self.section_position() else {
            return self.trim_from_end(self.values.len() as isize, 0);
        };
        let len = self.values.len() as isize;
        self.trim_from_end(
            s.saturating_sub(left_trail),
            len.saturating_sub(s.saturating_add(2)).saturating_sub(right_trail),
        )
    }

    /// Render the span.
    ///
    /// Numbers get `round(log10(precision))` fractional digits. The section
    /// is wrapped in brackets, cut-off sides get an ellipsis when asked for,
    /// and with `zigzag` each arrow shows whether the value rises or falls.
    pub fn to_string(
        &self,
        precision: i32,
        ellipsis_left: bool,
        ellipsis_right: bool,
        zigzag: bool,
    ) -> String {
        let mut out = String::new();
        if self.values.is_empty() {
            return out;
        }

        let digits = fraction_digits(precision);
        let (open, close) = match self.section {
            Section::At(s) => (s, s + 1),
            _ => (isize::MIN, isize::MIN),
        };

        if ellipsis_left && self.more_left {
            out.push_str(ELLIPSIS);
            out.push(' ');
        }

        for (i, &value) in self.values.iter().enumerate() {
            if i > 0 {
                let prev = self.values[i - 1];
                out.push(' ');
                out.push_str(arrow(prev, value, zigzag));
                out.push(' ');
            }
            let i = i as isize;
            if i == open {
                out.push('[');
            }
            // -0.0 would render with a sign
            let value = if value == 0.0 { 0.0 } else { value };
            let _ = write!(out, "{value:.digits$}");
            if i == close {
                out.push(']');
            }
        }

        if ellipsis_right && self.more_right {
            out.push(' ');
            out.push_str(ELLIPSIS);
        }
        out
    }
}

fn arrow(from: f64, to: f64, zigzag: bool) -> &'static str {
    if !zigzag {
        return ARROW;
    }
    if from < to {
        ARROW_UP
    } else if from > to {
        ARROW_DOWN
    } else {
        ARROW
    }
}

/// Fractional digits shown for a precision of `precision` steps per unit
pub fn fraction_digits(precision: i32) -> usize {
    if precision <= 1 {
        return 0;
    }
    f64::from(precision).log10().round() as usize
}
