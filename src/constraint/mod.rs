//! Constraint validation for single answers
//!
//! `minimum_value` / `maximum_value` are untyped strings whose meaning
//! depends on the question type code:
//!
//! - Number: inclusive decimal range
//! - ShortText / LongText: inclusive character count range
//! - Date: inclusive calendar range, time of day ignored
//! - anything else: unconstrained
//!
//! Malformed bounds are ignored when validating answers and rejected when
//! authoring questions.

mod bounds;
mod errors;
mod strategy;
mod validator;

pub use bounds::{parse_date, parse_decimal, parse_length, BoundIssue, BoundSide, Bounds};
pub use errors::ConstraintViolation;
pub use strategy::{
    ConstraintStrategy, DateStrategy, NumberStrategy, PermissiveStrategy, TextLengthStrategy,
};
pub use validator::ConstraintValidator;
