//! Form, question and option records
//!
//! Ownership is a tree: a form owns its questions, a question owns its
//! options. The `form_id` / `question_id` fields are back-references for
//! lookups only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authored questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_on: DateTime<Utc>,
    /// Questions in display order
    pub questions: Vec<Question>,
}

impl Form {
    /// Gets a question of this form by id.
    pub fn question(&self, id: Uuid) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Returns true if the question belongs to this form.
    pub fn contains_question(&self, id: Uuid) -> bool {
        self.question(id).is_some()
    }

    /// Questions sorted by display order, ties in stored order.
    pub fn ordered_questions(&self) -> Vec<&Question> {
        let mut questions: Vec<_> = self.questions.iter().collect();
        questions.sort_by_key(|q| q.display_order);
        questions
    }
}

/// One question of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub form_id: Uuid,
    pub question_type_id: Uuid,
    pub question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    pub is_required: bool,
    /// Lower bound, interpreted per question type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_value: Option<String>,
    /// Upper bound, interpreted per question type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_value: Option<String>,
    pub display_order: i32,
    /// Options in display order; empty for scalar types
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn option(&self, id: Uuid) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn has_option(&self, id: Uuid) -> bool {
        self.option(id).is_some()
    }

    /// Options sorted by display order, ties in stored order.
    pub fn ordered_options(&self) -> Vec<&QuestionOption> {
        let mut options: Vec<_> = self.options.iter().collect();
        options.sort_by_key(|o| o.display_order);
        options
    }
}

/// A selectable option of a choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: Uuid,
    pub question_id: Uuid,
    /// Text shown to respondents
    pub option_text: String,
    /// Programmatic value; `option_text` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_value: Option<String>,
    pub display_order: i32,
}

impl QuestionOption {
    /// The programmatic value of this option.
    pub fn effective_value(&self) -> &str {
        self.option_value.as_deref().unwrap_or(&self.option_text)
    }
}
