//! Answer shape errors
//!
//! Reported the same way as constraint violations: a message per question.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeMismatch {
    #[error("Question expects selected options, not a text value")]
    ScalarForChoice,

    #[error("Question expects a text value, not selected options")]
    SelectionForScalar,

    #[error("At least one option must be selected")]
    EmptySelection,

    #[error("Only one option may be selected (got {count})")]
    TooManySelections { count: usize },

    #[error("Option {0} is selected more than once")]
    DuplicateSelection(Uuid),

    #[error("Option {0} does not belong to this question")]
    UnknownOption(Uuid),
}

impl ShapeMismatch {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            ShapeMismatch::ScalarForChoice | ShapeMismatch::SelectionForScalar => {
                "FORMS_SHAPE_STORAGE_MODE"
            }
            ShapeMismatch::EmptySelection | ShapeMismatch::TooManySelections { .. } => {
                "FORMS_SHAPE_CARDINALITY"
            }
            ShapeMismatch::DuplicateSelection(_) => "FORMS_SHAPE_DUPLICATE_SELECTION",
            ShapeMismatch::UnknownOption(_) => "FORMS_SHAPE_UNKNOWN_OPTION",
        }
    }
}
