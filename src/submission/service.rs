//! Response submission boundary
//!
//! For each submitted answer, in order:
//! 1. the question must belong to the target form (and be answered once)
//! 2. a non-blank answer must match the type's storage mode
//! 3. the constraint validator checks the value
//! 4. the answer is shaped into its storage mode
//!
//! Required questions left unanswered are violations too. Any failure
//! rejects the whole submission; nothing is stored.

use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use super::errors::{AnswerErrors, SubmissionError, SubmissionResult};
use super::request::SubmitResponseRequest;
use crate::constraint::{ConstraintValidator, ConstraintViolation};
use crate::definition::Form;
use crate::observability::{log_event, Event};
use crate::question_type::QuestionTypeRegistry;
use crate::response::{check_storage_mode, shape_answer, FormResponse};
use crate::store::{FormRepository, ResponseRepository};

/// Validates and records form responses.
pub struct SubmissionService<'a> {
    registry: &'a QuestionTypeRegistry,
    validator: &'a ConstraintValidator,
}

impl<'a> SubmissionService<'a> {
    pub fn new(registry: &'a QuestionTypeRegistry, validator: &'a ConstraintValidator) -> Self {
        Self {
            registry,
            validator,
        }
    }

    /// Checks every answer against `form` and builds the response to store.
    ///
    /// Pure: no lookups beyond `form` and the registry, no writes.
    pub fn evaluate(
        &self,
        form: &Form,
        request: &SubmitResponseRequest,
    ) -> Result<FormResponse, AnswerErrors> {
        let response_id = request.id.unwrap_or_else(Uuid::new_v4);
        let mut errors = AnswerErrors::new();
        let mut answered = HashSet::new();
        let mut answers = Vec::with_capacity(request.answers.len());

        for submission in &request.answers {
            let question_id = submission.question_id;

            let Some(question) = form.question(question_id) else {
                errors.push(question_id, "Question does not belong to this form");
                continue;
            };
            if !answered.insert(question_id) {
                errors.push(question_id, "Question is answered more than once");
                continue;
            }
            let Some(question_type) = self.registry.get(question.question_type_id) else {
                errors.push(
                    question_id,
                    format!("Question type {} is not registered", question.question_type_id),
                );
                continue;
            };

            // Blank answers fall through to the required check below
            if !submission.answer.is_blank() {
                if let Err(mismatch) = check_storage_mode(question_type, &submission.answer) {
                    errors.push(question_id, mismatch.to_string());
                    continue;
                }
            }

            let value = submission.answer.validation_value();
            if let Err(violation) = self.validator.check(question, question_type, &value) {
                errors.push(question_id, violation.to_string());
                continue;
            }

            // Optional and left blank: nothing to store
            if submission.answer.is_blank() {
                continue;
            }

            match shape_answer(response_id, question, question_type, &submission.answer) {
                Ok(stored) => answers.push(stored),
                Err(mismatch) => errors.push(question_id, mismatch.to_string()),
            }
        }

        for question in form.ordered_questions() {
            if question.is_required && !answered.contains(&question.id) {
                errors.push(question.id, ConstraintViolation::Required.to_string());
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(FormResponse {
            id: response_id,
            form_id: form.id,
            respondent_user_id: request.respondent_user_id,
            is_complete: request.is_complete,
            submitted_on: Utc::now(),
            deleted_on: None,
            answers,
        })
    }

    /// Loads the form, checks the answers and stores the response.
    pub fn submit(
        &self,
        request: &SubmitResponseRequest,
        forms: &dyn FormRepository,
        responses: &dyn ResponseRepository,
    ) -> SubmissionResult<FormResponse> {
        let form = forms
            .find_form(request.form_id)?
            .ok_or(SubmissionError::FormNotFound(request.form_id))?;

        if !form.is_active {
            return Err(SubmissionError::FormInactive(form.id));
        }

        let response = match self.evaluate(&form, request) {
            Ok(response) => response,
            Err(errors) => {
                log_event(
                    Event::ResponseRejected,
                    &[
                        ("form_id", &form.id.to_string()),
                        ("questions", &errors.question_count().to_string()),
                    ],
                );
                return Err(SubmissionError::Rejected(errors));
            }
        };

        responses.insert_response(&response)?;

        log_event(
            Event::ResponseAccepted,
            &[
                ("answers", &response.answers.len().to_string()),
                ("form_id", &form.id.to_string()),
                ("response_id", &response.id.to_string()),
            ],
        );
        Ok(response)
    }

    /// Soft-deletes a stored response with all of its answers.
    pub fn delete_response(
        &self,
        response_id: Uuid,
        responses: &dyn ResponseRepository,
    ) -> SubmissionResult<bool> {
        let deleted = responses.soft_delete_response(response_id)?;
        if deleted {
            log_event(
                Event::ResponseDeleted,
                &[("response_id", &response_id.to_string())],
            );
        }
        Ok(deleted)
    }
}
