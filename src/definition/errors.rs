//! Form authoring errors
//!
//! Structural problems are collected, not thrown: every question gets its
//! own list of messages, keyed by its 1-based position in the request.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for authoring operations
pub type AuthoringResult<T> = Result<T, AuthoringError>;

/// Per-question structural problems found while authoring a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuralErrors {
    /// Problems with the form itself
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub form: Vec<String>,
    /// Question position (1-based) -> messages
    pub questions: BTreeMap<usize, Vec<String>>,
}

impl StructuralErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.form.is_empty() && self.questions.is_empty()
    }

    /// Total number of messages.
    pub fn len(&self) -> usize {
        self.form.len() + self.questions.values().map(Vec::len).sum::<usize>()
    }

    pub fn push_form(&mut self, message: impl Into<String>) {
        self.form.push(message.into());
    }

    pub fn push(&mut self, position: usize, message: impl Into<String>) {
        self.questions
            .entry(position)
            .or_default()
            .push(message.into());
    }

    /// Messages for the question at `position`.
    pub fn for_question(&self, position: usize) -> &[String] {
        self.questions
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl fmt::Display for StructuralErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} problem(s)", self.len())?;
        for message in &self.form {
            write!(f, "; form: {}", message)?;
        }
        for (position, messages) in &self.questions {
            for message in messages {
                write!(f, "; question {}: {}", position, message)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum AuthoringError {
    /// The definition is malformed; nothing was stored
    #[error("Form definition rejected: {0}")]
    Invalid(StructuralErrors),

    /// The persistence collaborator failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthoringError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            AuthoringError::Invalid(_) => "FORMS_FORM_INVALID",
            AuthoringError::Store(e) => e.code(),
        }
    }

    /// The structural problems, when the definition was rejected.
    pub fn structural(&self) -> Option<&StructuralErrors> {
        match self {
            AuthoringError::Invalid(errors) => Some(errors),
            AuthoringError::Store(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_grouped_by_position() {
        let mut errors = StructuralErrors::new();
        errors.push(2, "first");
        errors.push(2, "second");
        errors.push(5, "third");

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.for_question(2), ["first", "second"]);
        assert!(errors.for_question(1).is_empty());
    }

    #[test]
    fn test_display_lists_positions() {
        let mut errors = StructuralErrors::new();
        errors.push_form("Form title is required");
        errors.push(1, "Question text is required");

        let display = errors.to_string();
        assert!(display.starts_with("2 problem(s)"));
        assert!(display.contains("question 1: Question text is required"));
    }
}
