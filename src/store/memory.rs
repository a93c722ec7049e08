//! In-memory store
//!
//! Backs the CLI and the tests. Each write takes one lock, so a response is
//! visible with all of its answers or not at all.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::repository::{FormRepository, ResponseRepository, TypeUsage};
use crate::definition::Form;
use crate::response::FormResponse;

#[derive(Debug, Default)]
struct ResponseTables {
    responses: Vec<FormResponse>,
    /// Unique (question_response_id, question_option_id) index
    selections: HashSet<(Uuid, Uuid)>,
}

/// In-memory implementation of every repository trait.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    forms: RwLock<HashMap<Uuid, Form>>,
    responses: RwLock<ResponseTables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored forms.
    pub fn form_count(&self) -> StoreResult<usize> {
        let forms = self.forms.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(forms.len())
    }

    /// Number of stored responses, deleted ones included.
    pub fn response_count(&self) -> StoreResult<usize> {
        let tables = self.responses.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.responses.len())
    }
}

impl FormRepository for InMemoryStore {
    fn insert_form(&self, form: &Form) -> StoreResult<()> {
        let mut forms = self.forms.write().map_err(|_| StoreError::LockPoisoned)?;

        if forms.contains_key(&form.id) {
            return Err(StoreError::DuplicateId {
                entity: "Form",
                id: form.id,
            });
        }

        let mut question_ids = HashSet::new();
        for question in &form.questions {
            let taken = !question_ids.insert(question.id)
                || forms
                    .values()
                    .any(|f| f.questions.iter().any(|q| q.id == question.id));
            if taken {
                return Err(StoreError::DuplicateId {
                    entity: "Question",
                    id: question.id,
                });
            }
        }

        forms.insert(form.id, form.clone());
        Ok(())
    }

    fn find_form(&self, id: Uuid) -> StoreResult<Option<Form>> {
        let forms = self.forms.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(forms.get(&id).cloned())
    }
}

impl ResponseRepository for InMemoryStore {
    fn insert_response(&self, response: &FormResponse) -> StoreResult<()> {
        let mut tables = self.responses.write().map_err(|_| StoreError::LockPoisoned)?;

        if tables.responses.iter().any(|r| r.id == response.id) {
            return Err(StoreError::DuplicateId {
                entity: "FormResponse",
                id: response.id,
            });
        }

        // Check every pair before writing any of them
        let mut pending = HashSet::new();
        for answer in &response.answers {
            for selection in &answer.selected_options {
                let key = (selection.question_response_id, selection.question_option_id);
                if tables.selections.contains(&key) || !pending.insert(key) {
                    return Err(StoreError::DuplicateSelection {
                        question_response_id: key.0,
                        question_option_id: key.1,
                    });
                }
            }
        }

        tables.selections.extend(pending);
        tables.responses.push(response.clone());
        Ok(())
    }

    fn find_response(&self, id: Uuid) -> StoreResult<Option<FormResponse>> {
        let tables = self.responses.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.responses.iter().find(|r| r.id == id).cloned())
    }

    fn responses_for_form(&self, form_id: Uuid) -> StoreResult<Vec<FormResponse>> {
        let tables = self.responses.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables
            .responses
            .iter()
            .filter(|r| r.form_id == form_id && !r.is_deleted())
            .cloned()
            .collect())
    }

    fn soft_delete_response(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.responses.write().map_err(|_| StoreError::LockPoisoned)?;
        let response = tables
            .responses
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound {
                entity: "FormResponse",
                id,
            })?;
        Ok(response.soft_delete(Utc::now()))
    }
}

impl TypeUsage for InMemoryStore {
    fn questions_using_type(&self, type_id: Uuid) -> StoreResult<usize> {
        let forms = self.forms.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(forms
            .values()
            .flat_map(|f| f.questions.iter())
            .filter(|q| q.question_type_id == type_id)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Question;
    use crate::response::{QuestionResponse, QuestionResponseOption};

    fn form_with_question(type_id: Uuid) -> Form {
        let form_id = Uuid::new_v4();
        Form {
            id: form_id,
            title: "F".into(),
            description: None,
            is_active: true,
            created_on: Utc::now(),
            questions: vec![Question {
                id: Uuid::new_v4(),
                form_id,
                question_type_id: type_id,
                question_text: "Q".into(),
                help_text: None,
                is_required: false,
                minimum_value: None,
                maximum_value: None,
                display_order: 1,
                options: Vec::new(),
            }],
        }
    }

    fn response_with_selection(form_id: Uuid, answer_id: Uuid, option_ids: &[Uuid]) -> FormResponse {
        let response_id = Uuid::new_v4();
        FormResponse {
            id: response_id,
            form_id,
            respondent_user_id: None,
            is_complete: true,
            submitted_on: Utc::now(),
            deleted_on: None,
            answers: vec![QuestionResponse {
                id: answer_id,
                form_response_id: response_id,
                question_id: Uuid::new_v4(),
                response_text: None,
                selected_options: option_ids
                    .iter()
                    .map(|&question_option_id| QuestionResponseOption {
                        id: Uuid::new_v4(),
                        question_response_id: answer_id,
                        question_option_id,
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn test_form_round_trip() {
        let store = InMemoryStore::new();
        let form = form_with_question(Uuid::new_v4());

        store.insert_form(&form).unwrap();
        assert_eq!(store.find_form(form.id).unwrap(), Some(form.clone()));
        assert!(matches!(
            store.insert_form(&form),
            Err(StoreError::DuplicateId { entity: "Form", .. })
        ));
    }

    #[test]
    fn test_type_usage_counts_questions() {
        let store = InMemoryStore::new();
        let type_id = Uuid::new_v4();
        store.insert_form(&form_with_question(type_id)).unwrap();
        store.insert_form(&form_with_question(type_id)).unwrap();

        assert_eq!(store.questions_using_type(type_id).unwrap(), 2);
        assert_eq!(store.questions_using_type(Uuid::new_v4()).unwrap(), 0);
    }

    #[test]
    fn test_duplicate_selection_rejected_atomically() {
        let store = InMemoryStore::new();
        let option = Uuid::new_v4();
        let response = response_with_selection(Uuid::new_v4(), Uuid::new_v4(), &[option, option]);

        let err = store.insert_response(&response).unwrap_err();
        assert_eq!(err.code(), "FORMS_STORE_DUPLICATE_SELECTION");
        assert_eq!(store.response_count().unwrap(), 0);
    }

    #[test]
    fn test_selection_pair_unique_across_writes() {
        let store = InMemoryStore::new();
        let answer_id = Uuid::new_v4();
        let option = Uuid::new_v4();
        let form_id = Uuid::new_v4();

        store
            .insert_response(&response_with_selection(form_id, answer_id, &[option]))
            .unwrap();
        // A retried write reusing the answer id must not duplicate the pair
        let retry = response_with_selection(form_id, answer_id, &[option]);
        assert!(matches!(
            store.insert_response(&retry),
            Err(StoreError::DuplicateSelection { .. })
        ));
    }

    #[test]
    fn test_soft_delete_hides_from_listing() {
        let store = InMemoryStore::new();
        let form_id = Uuid::new_v4();
        let response = response_with_selection(form_id, Uuid::new_v4(), &[Uuid::new_v4()]);
        store.insert_response(&response).unwrap();

        assert!(store.soft_delete_response(response.id).unwrap());
        assert!(!store.soft_delete_response(response.id).unwrap());
        assert!(store.responses_for_form(form_id).unwrap().is_empty());
        assert!(store.find_response(response.id).unwrap().unwrap().is_deleted());
    }

    #[test]
    fn test_soft_delete_unknown() {
        let store = InMemoryStore::new();
        assert!(matches!(
            store.soft_delete_response(Uuid::new_v4()),
            Err(StoreError::NotFound { .. })
        ));
    }
}
