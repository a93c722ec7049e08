//! Submitted response records
//!
//! A `QuestionResponse` populates exactly one storage mode: `response_text`
//! for scalar questions, `selected_options` for choice questions.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One respondent's submission to a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormResponse {
    pub id: Uuid,
    pub form_id: Uuid,
    /// None for anonymous respondents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent_user_id: Option<Uuid>,
    pub is_complete: bool,
    pub submitted_on: DateTime<Utc>,
    /// Set once when the response is soft-deleted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_on: Option<DateTime<Utc>>,
    pub answers: Vec<QuestionResponse>,
}

impl FormResponse {
    pub fn is_anonymous(&self) -> bool {
        self.respondent_user_id.is_none()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_on.is_some()
    }

    /// Gets the stored answer to a question.
    pub fn answer_for(&self, question_id: Uuid) -> Option<&QuestionResponse> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }

    /// Marks the whole response deleted. Returns false if it already was.
    pub fn soft_delete(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_deleted() {
            return false;
        }
        self.deleted_on = Some(at);
        true
    }
}

/// One stored answer within a form response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: Uuid,
    pub form_response_id: Uuid,
    pub question_id: Uuid,
    /// Scalar storage mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_text: Option<String>,
    /// Selection storage mode
    #[serde(default)]
    pub selected_options: Vec<QuestionResponseOption>,
}

impl QuestionResponse {
    /// The stored scalar exactly as submitted.
    pub fn scalar_value(&self) -> Option<&str> {
        self.response_text.as_deref()
    }

    /// Selected option ids in submission order.
    pub fn selected_option_ids(&self) -> Vec<Uuid> {
        self.selected_options
            .iter()
            .map(|s| s.question_option_id)
            .collect()
    }

    pub fn is_selection(&self) -> bool {
        !self.selected_options.is_empty()
    }
}

/// Junction record: one selected option of one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionResponseOption {
    pub id: Uuid,
    pub question_response_id: Uuid,
    pub question_option_id: Uuid,
}

/// A caller-supplied answer before it is shaped for storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    /// Text, numbers and booleans in textual form, dates as `YYYY-MM-DD`
    Scalar(String),
    /// Ids of the chosen options
    Selection(Vec<Uuid>),
}

impl Answer {
    pub fn scalar(value: impl Into<String>) -> Self {
        Answer::Scalar(value.into())
    }

    pub fn selection(ids: impl IntoIterator<Item = Uuid>) -> Self {
        Answer::Selection(ids.into_iter().collect())
    }

    /// True for a blank scalar or an empty selection.
    pub fn is_blank(&self) -> bool {
        match self {
            Answer::Scalar(value) => value.trim().is_empty(),
            Answer::Selection(ids) => ids.is_empty(),
        }
    }

    /// The value handed to the constraint validator.
    ///
    /// Selections become their comma-joined ids; an empty selection is blank.
    pub fn validation_value(&self) -> Cow<'_, str> {
        match self {
            Answer::Scalar(value) => Cow::Borrowed(value.as_str()),
            Answer::Selection(ids) => Cow::Owned(
                ids.iter()
                    .map(Uuid::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_answer_json_shape() {
        let id = Uuid::new_v4();
        let answer: Answer = serde_json::from_value(json!({ "selection": [id] })).unwrap();
        assert_eq!(answer, Answer::Selection(vec![id]));

        let answer: Answer = serde_json::from_value(json!({ "scalar": "42" })).unwrap();
        assert_eq!(answer, Answer::scalar("42"));
    }

    #[test]
    fn test_blank_answers() {
        assert!(Answer::scalar("  ").is_blank());
        assert!(Answer::Selection(Vec::new()).is_blank());
        assert!(!Answer::scalar("0").is_blank());
        assert_eq!(Answer::Selection(Vec::new()).validation_value(), "");
    }

    #[test]
    fn test_soft_delete_once() {
        let mut response = FormResponse {
            id: Uuid::new_v4(),
            form_id: Uuid::new_v4(),
            respondent_user_id: None,
            is_complete: true,
            submitted_on: Utc::now(),
            deleted_on: None,
            answers: Vec::new(),
        };

        assert!(response.is_anonymous());
        assert!(response.soft_delete(Utc::now()));
        assert!(!response.soft_delete(Utc::now()));
        assert!(response.is_deleted());
    }
}
