// SPDX-License-Identifier: MIT OR Apache-2.0
//! Parsing clipboard text into values.
//!
//! Only the first line is read. Every character other than `+-.0123456789`
//! is a separator, so text copied from a menu preview (`0 → [1 → 2] → 3`)
//! parses back into its numbers. A single `[`/`]` pair around exactly two
//! values marks the section.

use crate::span::{FormattedValueSpan, Section};

fn is_number_char(c: char) -> bool {
    matches!(c, '+' | '-' | '.' | '0'..='9')
}

/// Positions of `[` and `]`. If either bracket occurs more than once,
/// neither is reported.
fn bracket_positions(chars: &[char]) -> (Option<usize>, Option<usize>) {
    let opens: Vec<usize> = (0..chars.len()).filter(|&i| chars[i] == '[').collect();
    let closes: Vec<usize> = (0..chars.len()).filter(|&i| chars[i] == ']').collect();
    if opens.len() > 1 || closes.len() > 1 {
        return (None, None);
    }
    (opens.first().copied(), closes.first().copied())
}

/// Scan one number starting at `pos`, skipping leading spaces.
///
/// Returns the value with its start and end positions, or `None` when no
/// digits follow.
fn scan_number(chars: &[char], pos: usize) -> Option<(f64, usize, usize)> {
    let mut i = pos;
    while i < chars.len() && chars[i] == ' ' {
        i += 1;
    }
    let start = i;

    if i < chars.len() && matches!(chars[i], '+' | '-') {
        i += 1;
    }
    let int_start = i;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < chars.len() && chars[i] == '.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }
    if digits == 0 {
        return None;
    }

    let token: String = chars[start..i].iter().collect();
    let value = token.parse::<f64>().ok()?;
    Some((value, start, i))
}

/// Parse clipboard text into values and an optional section.
///
/// Returns an empty span when a number overflows or runs straight into
/// another number-like character (`1..2`, `1.2.3`).
pub fn parse_values(text: &str) -> FormattedValueSpan {
    let line = text.split(['\r', '\n']).next().unwrap_or_default();
    let raw: Vec<char> = line.chars().collect();

    let (open, close) = bracket_positions(&raw);

    let chars: Vec<char> = raw
        .iter()
        .map(|&c| if is_number_char(c) { c } else { ' ' })
        .collect();

    let mut values = Vec::new();
    let mut open_index = None;
    let mut close_index = None;
    let mut pos = 0;

    while let Some((value, start, end)) = scan_number(&chars, pos) {
        if !value.is_finite() {
            tracing::trace!("Clipboard number overflows: {line:?}");
            return FormattedValueSpan::default();
        }
        if end < chars.len() && chars[end] != ' ' {
            tracing::trace!("Clipboard number is malformed: {line:?}");
            return FormattedValueSpan::default();
        }
        if open_index.is_none() && open.is_some_and(|p| start >= p) {
            open_index = Some(values.len());
        }
        if close_index.is_none() && close.is_some_and(|p| start >= p) {
            close_index = Some(values.len());
        }
        values.push(value);
        pos = end;
    }

    let count = values.len();
    let open_index = open_index.unwrap_or(count);
    let close_index = close_index.unwrap_or(count);

    let section = match (open, close) {
        (Some(_), Some(_)) if close_index == open_index + 2 => Section::At(open_index as isize),
        (None, None) if count == 2 => Section::At(0),
        _ => Section::None,
    };

    FormattedValueSpan::new(values).with_section(section)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracketed_pair() {
        let parsed = parse_values("[1.0 2.0]");
        assert_eq!(parsed.values(), &[1.0, 2.0]);
        assert_eq!(parsed.section(), Section::At(0));
    }

    #[test]
    fn test_implicit_pair_only_for_two_values() {
        let two = parse_values("1.5, -2");
        assert_eq!(two.values(), &[1.5, -2.0]);
        assert_eq!(two.section(), Section::At(0));

        let three = parse_values("1.0 2.0 3.0");
        assert_eq!(three.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(three.section(), Section::None);

        let one = parse_values("4");
        assert_eq!(one.values(), &[4.0]);
        assert_eq!(one.section(), Section::None);
    }

    #[test]
    fn test_malformed_number_fails() {
        assert!(parse_values("1..2").is_empty());
        assert!(parse_values("1.2.3").is_empty());
        assert!(parse_values("3 5-2").is_empty());
    }

    #[test]
    fn test_overflow_fails() {
        let huge = format!("1 {}", "9".repeat(400));
        assert!(parse_values(&huge).is_empty());
    }

    #[test]
    fn test_section_in_the_middle() {
        let parsed = parse_values("… 0.0 ↗ [1.5 ↘ 1.0] → 1.0 …");
        assert_eq!(parsed.values(), &[0.0, 1.5, 1.0, 1.0]);
        assert_eq!(parsed.section(), Section::At(1));
        assert!(parsed.has_section_full());
    }

    #[test]
    fn test_bracket_around_wrong_count() {
        let parsed = parse_values("[1 2 3]");
        assert_eq!(parsed.values().len(), 3);
        assert_eq!(parsed.section(), Section::None);

        let half = parse_values("1 [2 3");
        assert_eq!(half.section(), Section::None);
    }

    #[test]
    fn test_repeated_brackets_disable_section() {
        let parsed = parse_values("[1 2] [3 4]");
        assert_eq!(parsed.values(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(parsed.section(), Section::None);

        let pair = parse_values("[[1 2]");
        assert_eq!(pair.section(), Section::At(0));
    }

    #[test]
    fn test_only_first_line() {
        let parsed = parse_values("10 20\r\n30 40 50");
        assert_eq!(parsed.values(), &[10.0, 20.0]);
        assert_eq!(parsed.section(), Section::At(0));
    }

    #[test]
    fn test_no_numbers() {
        let parsed = parse_values("hello");
        assert!(parsed.is_empty());
        assert_eq!(parsed.section(), Section::None);
        assert!(parse_values("").is_empty());
    }

    #[test]
    fn test_signs_and_bare_fractions() {
        let parsed = parse_values("+1 .5 -.25 3.");
        assert_eq!(parsed.values(), &[1.0, 0.5, -0.25, 3.0]);
    }
}
