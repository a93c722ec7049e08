//! formcore - dynamic form definitions and response validation
//!
//! Forms are built from questions whose behavior comes from a question
//! type catalog. Answers are checked against per-question bounds by a
//! constraint validator keyed on the type code, then stored in the shape
//! the type dictates: a scalar value, one selected option, or several.

pub mod cli;
pub mod config;
pub mod constraint;
pub mod definition;
pub mod observability;
pub mod question_type;
pub mod response;
pub mod store;
pub mod submission;
