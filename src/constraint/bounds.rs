//! Constraint bound parsing
//!
//! Bounds are stored as untyped strings. Each strategy parses them with
//! its own function here. A bound that does not parse is treated as absent
//! at validation time and reported as a [`BoundIssue`] at authoring time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::definition::Question;

/// Which of the two bound fields a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    Minimum,
    Maximum,
}

impl fmt::Display for BoundSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundSide::Minimum => write!(f, "Minimum value"),
            BoundSide::Maximum => write!(f, "Maximum value"),
        }
    }
}

/// The raw bound strings of a question.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bounds<'a> {
    pub minimum: Option<&'a str>,
    pub maximum: Option<&'a str>,
}

impl<'a> Bounds<'a> {
    pub fn new(minimum: Option<&'a str>, maximum: Option<&'a str>) -> Self {
        Self {
            minimum: present(minimum),
            maximum: present(maximum),
        }
    }

    pub fn of(question: &'a Question) -> Self {
        Self::new(
            question.minimum_value.as_deref(),
            question.maximum_value.as_deref(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.minimum.is_none() && self.maximum.is_none()
    }

    /// Parses both sides with `parse`, dropping the ones that fail.
    pub fn parsed<T>(&self, parse: impl Fn(&str) -> Option<T>) -> (Option<T>, Option<T>) {
        (
            self.minimum.and_then(&parse),
            self.maximum.and_then(&parse),
        )
    }
}

/// Blank bound strings count as absent.
fn present(bound: Option<&str>) -> Option<&str> {
    bound.filter(|b| !b.trim().is_empty())
}

/// A malformed bound found while authoring a question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundIssue {
    #[error("{side} '{value}' is not a valid {expected}")]
    Unparsable {
        side: BoundSide,
        value: String,
        expected: &'static str,
    },

    #[error("{side} '{value}' must not be negative")]
    Negative { side: BoundSide, value: String },

    #[error("Minimum value '{minimum}' is greater than maximum value '{maximum}'")]
    Inverted { minimum: String, maximum: String },
}

/// Parses a culture-independent decimal (`.` separator, optional exponent).
///
/// Only ASCII digits, sign, `.` and `e`/`E` are accepted; no digit grouping.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(is_decimal_char) {
        return None;
    }
    Decimal::from_str(trimmed)
        .ok()
        .or_else(|| Decimal::from_scientific(trimmed).ok())
}

fn is_decimal_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')
}

/// Parses a non-negative character count.
pub fn parse_length(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok()
}

/// Parses a calendar date, discarding any time of day.
///
/// Accepted forms: `YYYY-MM-DD`, RFC 3339, `YYYY-MM-DDTHH:MM:SS`,
/// `YYYY-MM-DD HH:MM:SS` and `MM/DD/YYYY`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%m/%d/%Y").ok()
}

/// Authoring check shared by all strategies: each present side must parse,
/// and the parsed minimum must not exceed the parsed maximum.
pub(crate) fn check_ordered<T: PartialOrd>(
    bounds: &Bounds<'_>,
    expected: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Vec<BoundIssue> {
    let mut issues = Vec::new();

    let mut parse_side = |side: BoundSide, raw: Option<&str>| -> Option<T> {
        let raw = raw?;
        let parsed = parse(raw);
        if parsed.is_none() {
            issues.push(BoundIssue::Unparsable {
                side,
                value: raw.to_string(),
                expected,
            });
        }
        parsed
    };

    let minimum = parse_side(BoundSide::Minimum, bounds.minimum);
    let maximum = parse_side(BoundSide::Maximum, bounds.maximum);

    if let (Some(min), Some(max)) = (minimum, maximum) {
        if min > max {
            issues.push(BoundIssue::Inverted {
                minimum: bounds.minimum.unwrap_or_default().to_string(),
                maximum: bounds.maximum.unwrap_or_default().to_string(),
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_invariant() {
        assert_eq!(parse_decimal("18"), Some(Decimal::from(18)));
        assert_eq!(parse_decimal(" -2.5 "), Decimal::from_str("-2.5").ok());
        assert_eq!(parse_decimal("1e3"), Some(Decimal::from(1000)));
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("1_000"), None);
        assert_eq!(parse_decimal("1,000"), None);
        assert_eq!(parse_decimal("1 000"), None);
        assert_eq!(parse_decimal("0x10"), None);
        assert_eq!(parse_decimal("١٢"), None);
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("10"), Some(10));
        assert_eq!(parse_length("-1"), None);
        assert_eq!(parse_length("ten"), None);
    }

    #[test]
    fn test_parse_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2023, 6, 15);
        assert_eq!(parse_date("2023-06-15"), expected);
        assert_eq!(parse_date("2023-06-15T23:59:59"), expected);
        assert_eq!(parse_date("2023-06-15T08:00:00Z"), expected);
        assert_eq!(parse_date("2023-06-15 12:30:00"), expected);
        assert_eq!(parse_date("06/15/2023"), expected);
        assert_eq!(parse_date("2023-02-30"), None);
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_blank_bounds_absent() {
        let bounds = Bounds::new(Some("  "), Some("5"));
        assert!(bounds.minimum.is_none());
        assert_eq!(bounds.maximum, Some("5"));
    }

    #[test]
    fn test_check_ordered_reports_each_issue() {
        let issues = check_ordered(&Bounds::new(Some("x"), Some("3")), "number", parse_decimal);
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0],
            BoundIssue::Unparsable {
                side: BoundSide::Minimum,
                ..
            }
        ));

        let issues = check_ordered(&Bounds::new(Some("10"), Some("3")), "number", parse_decimal);
        assert_eq!(
            issues,
            vec![BoundIssue::Inverted {
                minimum: "10".into(),
                maximum: "3".into()
            }]
        );
    }

    #[test]
    fn test_issue_messages() {
        let issue = BoundIssue::Unparsable {
            side: BoundSide::Maximum,
            value: "soon".into(),
            expected: "date (YYYY-MM-DD)",
        };
        assert_eq!(
            issue.to_string(),
            "Maximum value 'soon' is not a valid date (YYYY-MM-DD)"
        );
    }
}
