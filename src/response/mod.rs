//! Response storage model
//!
//! Answers arrive either as a scalar string or as a set of option ids and
//! are shaped into the storage mode the question type dictates.

mod errors;
mod shape;
mod types;

pub use errors::ShapeMismatch;
pub use shape::{check_storage_mode, shape_answer};
pub use types::{Answer, FormResponse, QuestionResponse, QuestionResponseOption};
