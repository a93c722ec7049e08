//! Response submission request bodies

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::response::Answer;

/// One respondent's answers to a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponseRequest {
    /// Caller-chosen response id, generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub form_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent_user_id: Option<Uuid>,
    #[serde(default = "default_complete")]
    pub is_complete: bool,
    #[serde(default)]
    pub answers: Vec<AnswerSubmission>,
}

fn default_complete() -> bool {
    true
}

/// The answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question_id: Uuid,
    pub answer: Answer,
}

impl AnswerSubmission {
    pub fn scalar(question_id: Uuid, value: impl Into<String>) -> Self {
        Self {
            question_id,
            answer: Answer::scalar(value),
        }
    }

    pub fn selection(question_id: Uuid, option_ids: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            question_id,
            answer: Answer::selection(option_ids),
        }
    }
}

impl SubmitResponseRequest {
    pub fn new(form_id: Uuid, answers: Vec<AnswerSubmission>) -> Self {
        Self {
            id: None,
            form_id,
            respondent_user_id: None,
            is_complete: true,
            answers,
        }
    }
}
