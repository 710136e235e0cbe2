//! # Numeric input filter
//!
//! Measurement fields accept free text from the platform keyboard. Before the
//! value reaches a draft it is reduced to digits and at most one `.`:
//!
//! - [`filter_numeric_input`] keeps digits and the first `.`. Any later `.` is
//!   dropped and the digits that follow it are appended to the fractional part,
//!   so `"1.2.3"` becomes `"1.23"`. This is [`DotPolicy::Collapse`].
//! - [`DotPolicy::Truncate`] instead stops at the second `.` (`"1.2.3"` → `"1.2"`).
//!   Which of the two is the intended product behaviour has not been confirmed,
//!   so the policy is configurable and `Collapse` stays the default.
//! - [`filter_integer_input`] keeps digits only, for counts such as steps or sets.
//!
//! All other characters are removed silently; the result may be empty.

use serde::{Deserialize, Serialize};

/// What to do with a second decimal separator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DotPolicy {
    /// Drop extra dots and keep the digits after them.
    #[default]
    Collapse,
    /// Discard everything from the second dot onwards.
    Truncate,
}

/// Filter text with the default [`DotPolicy::Collapse`].
pub fn filter_numeric_input(raw: &str) -> String {
    filter_numeric_input_with(raw, DotPolicy::Collapse)
}

/// Filter text down to a non-negative decimal literal.
pub fn filter_numeric_input_with(raw: &str, policy: DotPolicy) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut seen_dot = false;
    for ch in raw.chars() {
        match ch {
            '0'..='9' => out.push(ch),
            '.' if !seen_dot => {
                seen_dot = true;
                out.push('.');
            }
            '.' => {
                if policy == DotPolicy::Truncate {
                    break;
                }
            }
            _ => {}
        }
    }
    out
}

/// Keep only ASCII digits.
pub fn filter_integer_input(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Parse filtered text into a finite number. Empty text and a lone `.` are `None`.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "." {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Render a magnitude without trailing zeros (`182.0` → `"182"`).
pub fn format_magnitude(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_decimals_pass_through() {
        for s in ["0", "7", "12", "182.88", "0.5", "1200", "3.", ".25", "150000", ""] {
            assert_eq!(filter_numeric_input(s), s, "input {:?}", s);
        }
    }

    #[test]
    fn test_strips_non_numeric_characters() {
        assert_eq!(filter_numeric_input("12a3"), "123");
        assert_eq!(filter_numeric_input("-5.5 kg"), "5.5");
        assert_eq!(filter_numeric_input("1,5"), "15");
        assert_eq!(filter_numeric_input("abc"), "");
        assert_eq!(filter_numeric_input("٣.5"), ".5");
    }

    #[test]
    fn test_filtered_output_has_at_most_one_dot() {
        for s in ["1..2", "..", "a.b.c.1", "9.9.9.9", "1.2.3abc4", " . 1 . "] {
            let out = filter_numeric_input(s);
            assert!(out.chars().all(|c| c.is_ascii_digit() || c == '.'));
            assert!(out.matches('.').count() <= 1, "{:?} -> {:?}", s, out);
        }
    }

    #[test]
    fn test_second_dot_collapses_into_fraction() {
        assert_eq!(filter_numeric_input("1.2.3"), "1.23");
        assert_eq!(filter_numeric_input("10..5"), "10.5");
    }

    #[test]
    fn test_second_dot_truncates_with_policy() {
        assert_eq!(filter_numeric_input_with("1.2.3", DotPolicy::Truncate), "1.2");
        assert_eq!(filter_numeric_input_with("10..5", DotPolicy::Truncate), "10.");
    }

    #[test]
    fn test_integer_filter() {
        assert_eq!(filter_integer_input("12,000 steps"), "12000");
        assert_eq!(filter_integer_input("4.5"), "45");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("182.88"), Some(182.88));
        assert_eq!(parse_decimal("3."), Some(3.0));
        assert_eq!(parse_decimal(".5"), Some(0.5));
        assert_eq!(parse_decimal(" 42 "), Some(42.0));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("."), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("inf"), None);
    }
}
