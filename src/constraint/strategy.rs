//! Per-type constraint strategies
//!
//! Each strategy owns its parse-and-compare logic for the two bound
//! strings. Bounds that do not parse are ignored by `check` and reported
//! by `check_bounds`.

use super::bounds::{
    check_ordered, parse_date, parse_decimal, parse_length, BoundIssue, BoundSide, Bounds,
};
use super::errors::ConstraintViolation;

/// Validation rules for one family of question type codes.
///
/// `check` only sees non-blank values; required-ness is decided before
/// dispatch.
pub trait ConstraintStrategy: Send + Sync {
    /// Short name for diagnostics
    fn name(&self) -> &'static str;

    /// Checks a non-blank answer against the bounds.
    fn check(&self, value: &str, bounds: &Bounds<'_>) -> Result<(), ConstraintViolation>;

    /// Checks the bounds themselves at authoring time.
    fn check_bounds(&self, _bounds: &Bounds<'_>) -> Vec<BoundIssue> {
        Vec::new()
    }
}

/// Numeric range, inclusive on both ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberStrategy;

impl ConstraintStrategy for NumberStrategy {
    fn name(&self) -> &'static str {
        "number"
    }

    fn check(&self, value: &str, bounds: &Bounds<'_>) -> Result<(), ConstraintViolation> {
        let number =
            parse_decimal(value).ok_or_else(|| ConstraintViolation::NotANumber(value.to_string()))?;

        let (minimum, maximum) = bounds.parsed(parse_decimal);
        if let Some(minimum) = minimum {
            if number < minimum {
                return Err(ConstraintViolation::BelowMinimum { minimum });
            }
        }
        if let Some(maximum) = maximum {
            if number > maximum {
                return Err(ConstraintViolation::AboveMaximum { maximum });
            }
        }
        Ok(())
    }

    fn check_bounds(&self, bounds: &Bounds<'_>) -> Vec<BoundIssue> {
        check_ordered(bounds, "number", parse_decimal)
    }
}

/// Character count range, inclusive on both ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLengthStrategy;

impl ConstraintStrategy for TextLengthStrategy {
    fn name(&self) -> &'static str {
        "text-length"
    }

    fn check(&self, value: &str, bounds: &Bounds<'_>) -> Result<(), ConstraintViolation> {
        let actual = value.chars().count();

        let (minimum, maximum) = bounds.parsed(parse_length);
        if let Some(minimum) = minimum {
            if actual < minimum {
                return Err(ConstraintViolation::TooShort { minimum, actual });
            }
        }
        if let Some(maximum) = maximum {
            if actual > maximum {
                return Err(ConstraintViolation::TooLong { maximum, actual });
            }
        }
        Ok(())
    }

    fn check_bounds(&self, bounds: &Bounds<'_>) -> Vec<BoundIssue> {
        let mut issues = Vec::new();
        let sides = [
            (BoundSide::Minimum, bounds.minimum),
            (BoundSide::Maximum, bounds.maximum),
        ];

        for (side, raw) in sides {
            let Some(raw) = raw else { continue };
            if raw.trim().parse::<i64>().map_or(false, |n| n < 0) {
                issues.push(BoundIssue::Negative {
                    side,
                    value: raw.to_string(),
                });
            }
        }

        // Negative bounds already reported; skip the unparsable report for them
        let negative: Vec<BoundSide> = issues
            .iter()
            .filter_map(|issue| match issue {
                BoundIssue::Negative { side, .. } => Some(*side),
                _ => None,
            })
            .collect();
        let filtered = Bounds {
            minimum: bounds.minimum.filter(|_| !negative.contains(&BoundSide::Minimum)),
            maximum: bounds.maximum.filter(|_| !negative.contains(&BoundSide::Maximum)),
        };

        issues.extend(check_ordered(&filtered, "character count", parse_length));
        issues
    }
}

/// Calendar date range, inclusive, time of day ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateStrategy;

impl ConstraintStrategy for DateStrategy {
    fn name(&self) -> &'static str {
        "date"
    }

    fn check(&self, value: &str, bounds: &Bounds<'_>) -> Result<(), ConstraintViolation> {
        let date =
            parse_date(value).ok_or_else(|| ConstraintViolation::InvalidDate(value.to_string()))?;

        let (minimum, maximum) = bounds.parsed(parse_date);
        if let Some(minimum) = minimum {
            if date < minimum {
                return Err(ConstraintViolation::DateBeforeMinimum { minimum });
            }
        }
        if let Some(maximum) = maximum {
            if date > maximum {
                return Err(ConstraintViolation::DateAfterMaximum { maximum });
            }
        }
        Ok(())
    }

    fn check_bounds(&self, bounds: &Bounds<'_>) -> Vec<BoundIssue> {
        check_ordered(bounds, "date (YYYY-MM-DD)", parse_date)
    }
}

/// Accepts every non-blank value. Used for Boolean, the choice types and
/// any code without a registered strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveStrategy;

impl ConstraintStrategy for PermissiveStrategy {
    fn name(&self) -> &'static str {
        "permissive"
    }

    fn check(&self, _value: &str, _bounds: &Bounds<'_>) -> Result<(), ConstraintViolation> {
        Ok(())
    }
}
