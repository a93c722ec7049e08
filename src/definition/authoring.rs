//! Form authoring boundary
//!
//! Turns a nested form request into a `Form`, checking every question:
//! - the question type resolves (by id or by code)
//! - choice types carry at least one option, scalar types none
//! - bound strings are well-formed for the type (same rules the
//!   constraint validator applies to answers)
//! - display orders left at zero become the 1-based position

use std::collections::HashSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{AuthoringError, AuthoringResult, StructuralErrors};
use super::types::{Form, Question, QuestionOption};
use crate::constraint::ConstraintValidator;
use crate::observability::{log_event, Event};
use crate::question_type::{QuestionType, QuestionTypeRegistry};
use crate::store::FormRepository;

/// Request to create a form with its questions and options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFormRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
}

fn default_active() -> bool {
    true
}

impl Default for CreateFormRequest {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: None,
            is_active: default_active(),
            questions: Vec::new(),
        }
    }
}

/// A question inside a [`CreateFormRequest`].
///
/// The type is given by `question_type_id` or `question_type_code`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_type_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_type_code: Option<String>,
    pub question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_value: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub options: Vec<OptionDraft>,
}

/// An option inside a [`QuestionDraft`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub option_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_value: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

/// Builds and stores forms against a question type catalog.
pub struct FormAuthoring<'a> {
    registry: &'a QuestionTypeRegistry,
    validator: &'a ConstraintValidator,
}

impl<'a> FormAuthoring<'a> {
    pub fn new(registry: &'a QuestionTypeRegistry, validator: &'a ConstraintValidator) -> Self {
        Self {
            registry,
            validator,
        }
    }

    /// Validates the request and builds the form without storing it.
    pub fn build(&self, request: &CreateFormRequest) -> Result<Form, StructuralErrors> {
        let mut errors = StructuralErrors::new();
        let form_id = request.id.unwrap_or_else(Uuid::new_v4);

        if request.title.trim().is_empty() {
            errors.push_form("Form title is required");
        }

        let mut seen_ids = HashSet::new();
        let mut questions = Vec::with_capacity(request.questions.len());

        for (index, draft) in request.questions.iter().enumerate() {
            let position = index + 1;

            if let Some(id) = draft.id {
                if !seen_ids.insert(id) {
                    errors.push(position, format!("Question id {} is used more than once", id));
                }
            }

            let question_type = match self.resolve_type(draft) {
                Ok(question_type) => Some(question_type),
                Err(message) => {
                    errors.push(position, message);
                    None
                }
            };

            for message in self.check_question(draft, question_type) {
                errors.push(position, message);
            }

            if let Some(question_type) = question_type {
                questions.push(assemble_question(form_id, position, draft, question_type));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Form {
            id: form_id,
            title: request.title.clone(),
            description: request.description.clone(),
            is_active: request.is_active,
            created_on: Utc::now(),
            questions,
        })
    }

    /// Validates, builds and stores a form.
    pub fn create_form(
        &self,
        request: &CreateFormRequest,
        repository: &dyn FormRepository,
    ) -> AuthoringResult<Form> {
        let form = match self.build(request) {
            Ok(form) => form,
            Err(errors) => {
                log_event(
                    Event::FormRejected,
                    &[
                        ("problems", &errors.len().to_string()),
                        ("title", &request.title),
                    ],
                );
                return Err(AuthoringError::Invalid(errors));
            }
        };

        repository.insert_form(&form)?;

        log_event(
            Event::FormCreated,
            &[
                ("form_id", &form.id.to_string()),
                ("questions", &form.questions.len().to_string()),
            ],
        );
        Ok(form)
    }

    fn resolve_type(&self, draft: &QuestionDraft) -> Result<&'a QuestionType, String> {
        let by_id = draft.question_type_id.map(|id| {
            self.registry
                .get(id)
                .ok_or_else(|| format!("Unknown question type {}", id))
        });
        let by_code = draft.question_type_code.as_deref().map(|code| {
            self.registry
                .find_by_code(code)
                .ok_or_else(|| format!("Unknown question type '{}'", code))
        });

        match (by_id, by_code) {
            (None, None) => Err("A question type is required".to_string()),
            (Some(found), None) | (None, Some(found)) => found,
            (Some(by_id), Some(by_code)) => {
                let (by_id, by_code) = (by_id?, by_code?);
                if by_id.id != by_code.id {
                    return Err(format!(
                        "Question type id {} does not match code '{}'",
                        by_id.id, by_code.code
                    ));
                }
                Ok(by_id)
            }
        }
    }

    /// Structural and bound checks for one question.
    fn check_question(
        &self,
        draft: &QuestionDraft,
        question_type: Option<&QuestionType>,
    ) -> Vec<String> {
        let mut messages = Vec::new();

        if draft.question_text.trim().is_empty() {
            messages.push("Question text is required".to_string());
        }

        if let Some(question_type) = question_type {
            if question_type.has_options && draft.options.is_empty() {
                messages.push(format!(
                    "Question type '{}' requires at least one option",
                    question_type.code
                ));
            }
            if !question_type.has_options && !draft.options.is_empty() {
                messages.push(format!(
                    "Question type '{}' does not take options",
                    question_type.code
                ));
            }

            messages.extend(
                self.validator
                    .check_bounds(
                        question_type,
                        draft.minimum_value.as_deref(),
                        draft.maximum_value.as_deref(),
                    )
                    .into_iter()
                    .map(|issue| issue.to_string()),
            );
        }

        let mut values = HashSet::new();
        for (index, option) in draft.options.iter().enumerate() {
            if option.option_text.trim().is_empty() {
                messages.push(format!("Option {} text is required", index + 1));
                continue;
            }
            let value = option
                .option_value
                .as_deref()
                .unwrap_or(&option.option_text);
            if !values.insert(value) {
                messages.push(format!("Option value '{}' appears more than once", value));
            }
        }

        messages
    }
}

fn assemble_question(
    form_id: Uuid,
    position: usize,
    draft: &QuestionDraft,
    question_type: &QuestionType,
) -> Question {
    let question_id = draft.id.unwrap_or_else(Uuid::new_v4);

    let options = draft
        .options
        .iter()
        .enumerate()
        .map(|(index, option)| QuestionOption {
            id: option.id.unwrap_or_else(Uuid::new_v4),
            question_id,
            option_text: option.option_text.clone(),
            option_value: option.option_value.clone(),
            display_order: order_or_position(option.display_order, index + 1),
        })
        .collect();

    Question {
        id: question_id,
        form_id,
        question_type_id: question_type.id,
        question_text: draft.question_text.clone(),
        help_text: draft.help_text.clone(),
        is_required: draft.is_required,
        minimum_value: draft.minimum_value.clone(),
        maximum_value: draft.maximum_value.clone(),
        display_order: order_or_position(draft.display_order, position),
        options,
    }
}

/// A zero display order means "unspecified": use the 1-based position.
fn order_or_position(display_order: i32, position: usize) -> i32 {
    if display_order == 0 {
        i32::try_from(position).unwrap_or(i32::MAX)
    } else {
        display_order
    }
}
