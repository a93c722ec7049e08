//! Constraint violations
//!
//! A violation is an expected business outcome, never a crash. Its
//! `Display` text is the message reported back per question.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintViolation {
    #[error("An answer is required")]
    Required,

    #[error("'{0}' is not a valid number")]
    NotANumber(String),

    #[error("Value must be at least {minimum}")]
    BelowMinimum { minimum: Decimal },

    #[error("Value must be at most {maximum}")]
    AboveMaximum { maximum: Decimal },

    #[error("Answer must be at least {minimum} characters long (got {actual})")]
    TooShort { minimum: usize, actual: usize },

    #[error("Answer must be at most {maximum} characters long (got {actual})")]
    TooLong { maximum: usize, actual: usize },

    #[error("'{0}' is not a valid date")]
    InvalidDate(String),

    #[error("Date must be on or after {minimum}")]
    DateBeforeMinimum { minimum: NaiveDate },

    #[error("Date must be on or before {maximum}")]
    DateAfterMaximum { maximum: NaiveDate },

    /// Raised by strategies registered for custom type codes
    #[error("{0}")]
    Other(String),
}

impl ConstraintViolation {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            ConstraintViolation::Required => "FORMS_ANSWER_REQUIRED",
            ConstraintViolation::NotANumber(_) | ConstraintViolation::InvalidDate(_) => {
                "FORMS_ANSWER_MALFORMED"
            }
            ConstraintViolation::BelowMinimum { .. }
            | ConstraintViolation::AboveMaximum { .. }
            | ConstraintViolation::DateBeforeMinimum { .. }
            | ConstraintViolation::DateAfterMaximum { .. } => "FORMS_ANSWER_OUT_OF_RANGE",
            ConstraintViolation::TooShort { .. } | ConstraintViolation::TooLong { .. } => {
                "FORMS_ANSWER_LENGTH"
            }
            ConstraintViolation::Other(_) => "FORMS_ANSWER_REJECTED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_bound() {
        let err = ConstraintViolation::BelowMinimum {
            minimum: Decimal::from(18),
        };
        assert_eq!(err.to_string(), "Value must be at least 18");

        let err = ConstraintViolation::DateAfterMaximum {
            maximum: NaiveDate::from_ymd_opt(2100, 12, 31).unwrap(),
        };
        assert_eq!(err.to_string(), "Date must be on or before 2100-12-31");
    }

    #[test]
    fn test_range_codes_shared() {
        assert_eq!(
            ConstraintViolation::BelowMinimum {
                minimum: Decimal::ZERO
            }
            .code(),
            "FORMS_ANSWER_OUT_OF_RANGE"
        );
        assert_eq!(ConstraintViolation::Required.code(), "FORMS_ANSWER_REQUIRED");
    }
}
