//! Submission errors
//!
//! Error codes:
//! - FORMS_FORM_NOT_FOUND
//! - FORMS_FORM_INACTIVE
//! - FORMS_RESPONSE_REJECTED (per-question messages attached)
//! - FORMS_STORE_* (propagated from the store)

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// Result type for submission operations
pub type SubmissionResult<T> = Result<T, SubmissionError>;

/// Question id -> messages for every rejected answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerErrors(BTreeMap<Uuid, Vec<String>>);

impl AnswerErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, question_id: Uuid, message: impl Into<String>) {
        self.0.entry(question_id).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of questions with at least one message.
    pub fn question_count(&self) -> usize {
        self.0.len()
    }

    /// Messages for one question.
    pub fn for_question(&self, question_id: Uuid) -> &[String] {
        self.0
            .get(&question_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn question_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.0.keys().copied()
    }

    pub fn into_inner(self) -> BTreeMap<Uuid, Vec<String>> {
        self.0
    }
}

impl fmt::Display for AnswerErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} question(s) with errors", self.0.len())?;
        for (question_id, messages) in &self.0 {
            write!(f, "; {}: {}", question_id, messages.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Form {0} not found")]
    FormNotFound(Uuid),

    #[error("Form {0} is not accepting responses")]
    FormInactive(Uuid),

    /// One or more answers failed; nothing was stored
    #[error("Response rejected: {0}")]
    Rejected(AnswerErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SubmissionError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            SubmissionError::FormNotFound(_) => "FORMS_FORM_NOT_FOUND",
            SubmissionError::FormInactive(_) => "FORMS_FORM_INACTIVE",
            SubmissionError::Rejected(_) => "FORMS_RESPONSE_REJECTED",
            SubmissionError::Store(e) => e.code(),
        }
    }

    /// The per-question messages, when answers were rejected.
    pub fn answer_errors(&self) -> Option<&AnswerErrors> {
        match self {
            SubmissionError::Rejected(errors) => Some(errors),
            _ => None,
        }
    }
}
