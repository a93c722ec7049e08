//! Shaping answers into stored responses
//!
//! The question type's flags decide the storage mode:
//!
//! | has_options | allows_multiple_values | stored as                      |
//! |-------------|------------------------|--------------------------------|
//! | false       | -                      | `response_text`                |
//! | true        | false                  | exactly one selected option    |
//! | true        | true                   | one or more distinct options   |

use std::collections::HashSet;

use uuid::Uuid;

use super::errors::ShapeMismatch;
use super::types::{Answer, QuestionResponse, QuestionResponseOption};
use crate::definition::Question;
use crate::question_type::{QuestionType, StorageMode};

/// Builds the stored form of one answer.
///
/// `question_type` must be the type `question` references. Selected ids
/// must be options of `question`, each at most once.
pub fn shape_answer(
    form_response_id: Uuid,
    question: &Question,
    question_type: &QuestionType,
    answer: &Answer,
) -> Result<QuestionResponse, ShapeMismatch> {
    check_storage_mode(question_type, answer)?;
    let id = Uuid::new_v4();

    match (question_type.storage_mode(), answer) {
        (_, Answer::Scalar(value)) => Ok(QuestionResponse {
            id,
            form_response_id,
            question_id: question.id,
            response_text: Some(value.clone()),
            selected_options: Vec::new(),
        }),
        (mode, Answer::Selection(option_ids)) => {
            check_selection(question, mode, option_ids)?;

            let selected_options = option_ids
                .iter()
                .map(|&question_option_id| QuestionResponseOption {
                    id: Uuid::new_v4(),
                    question_response_id: id,
                    question_option_id,
                })
                .collect();

            Ok(QuestionResponse {
                id,
                form_response_id,
                question_id: question.id,
                response_text: None,
                selected_options,
            })
        }
    }
}

/// Checks that the answer variant matches the type's storage mode.
///
/// Runs before any value check, so a selection sent to a Number question is
/// reported as a shape problem rather than an unparsable number.
pub fn check_storage_mode(
    question_type: &QuestionType,
    answer: &Answer,
) -> Result<(), ShapeMismatch> {
    match (question_type.storage_mode(), answer) {
        (StorageMode::Scalar, Answer::Selection(_)) => Err(ShapeMismatch::SelectionForScalar),
        (StorageMode::SingleSelection | StorageMode::MultipleSelection, Answer::Scalar(_)) => {
            Err(ShapeMismatch::ScalarForChoice)
        }
        _ => Ok(()),
    }
}

/// Cardinality, uniqueness and membership of a selection.
fn check_selection(
    question: &Question,
    mode: StorageMode,
    option_ids: &[Uuid],
) -> Result<(), ShapeMismatch> {
    if option_ids.is_empty() {
        return Err(ShapeMismatch::EmptySelection);
    }

    let mut seen = HashSet::with_capacity(option_ids.len());
    for &option_id in option_ids {
        if !seen.insert(option_id) {
            return Err(ShapeMismatch::DuplicateSelection(option_id));
        }
    }

    if mode == StorageMode::SingleSelection && option_ids.len() > 1 {
        return Err(ShapeMismatch::TooManySelections {
            count: option_ids.len(),
        });
    }

    if let Some(&unknown) = option_ids.iter().find(|&&id| !question.has_option(id)) {
        return Err(ShapeMismatch::UnknownOption(unknown));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::QuestionOption;
    use crate::question_type::{codes, QuestionTypeRegistry};

    fn question_with_options(question_type: &QuestionType, count: usize) -> Question {
        let id = Uuid::new_v4();
        Question {
            id,
            form_id: Uuid::nil(),
            question_type_id: question_type.id,
            question_text: "Pick".into(),
            help_text: None,
            is_required: true,
            minimum_value: None,
            maximum_value: None,
            display_order: 1,
            options: (0..count)
                .map(|i| QuestionOption {
                    id: Uuid::new_v4(),
                    question_id: id,
                    option_text: format!("Option {}", i + 1),
                    option_value: None,
                    display_order: i as i32 + 1,
                })
                .collect(),
        }
    }

    #[test]
    fn test_scalar_round_trip() {
        let registry = QuestionTypeRegistry::with_builtin_types();
        for code in [codes::SHORT_TEXT, codes::NUMBER, codes::DATE, codes::BOOLEAN] {
            let t = registry.lookup(code).unwrap();
            let q = question_with_options(t, 0);
            for value in ["25", "  spaced  ", "2023-06-15", "true", "ünïcödé"] {
                let stored = shape_answer(Uuid::nil(), &q, t, &Answer::scalar(value)).unwrap();
                assert_eq!(stored.scalar_value(), Some(value));
                assert!(stored.selected_options.is_empty());
            }
        }
    }

    #[test]
    fn test_storage_mode_mismatch() {
        let registry = QuestionTypeRegistry::with_builtin_types();
        let number = registry.lookup(codes::NUMBER).unwrap();
        let dropdown = registry.lookup(codes::DROPDOWN).unwrap();
        let scalar_q = question_with_options(number, 0);
        let choice_q = question_with_options(dropdown, 2);

        assert_eq!(
            shape_answer(Uuid::nil(), &scalar_q, number, &Answer::selection([Uuid::new_v4()])),
            Err(ShapeMismatch::SelectionForScalar)
        );
        assert_eq!(
            shape_answer(Uuid::nil(), &choice_q, dropdown, &Answer::scalar("Option 1")),
            Err(ShapeMismatch::ScalarForChoice)
        );
    }

    #[test]
    fn test_single_select_rejects_two() {
        let registry = QuestionTypeRegistry::with_builtin_types();
        let single = registry.lookup(codes::SINGLE_CHOICE).unwrap();
        let q = question_with_options(single, 3);
        let answer = Answer::selection([q.options[0].id, q.options[1].id]);

        assert_eq!(
            shape_answer(Uuid::nil(), &q, single, &answer),
            Err(ShapeMismatch::TooManySelections { count: 2 })
        );
    }

    #[test]
    fn test_duplicate_rejected_for_every_choice_type() {
        let registry = QuestionTypeRegistry::with_builtin_types();
        for code in [codes::SINGLE_CHOICE, codes::MULTIPLE_CHOICE, codes::DROPDOWN] {
            let t = registry.lookup(code).unwrap();
            let q = question_with_options(t, 2);
            let dup = q.options[0].id;

            assert_eq!(
                shape_answer(Uuid::nil(), &q, t, &Answer::selection([dup, dup])),
                Err(ShapeMismatch::DuplicateSelection(dup)),
                "{}",
                code
            );
        }
    }

    #[test]
    fn test_multi_select_keeps_all() {
        let registry = QuestionTypeRegistry::with_builtin_types();
        let multi = registry.lookup(codes::MULTIPLE_CHOICE).unwrap();
        let q = question_with_options(multi, 3);
        let chosen = vec![q.options[2].id, q.options[0].id];
        let response_id = Uuid::new_v4();

        let stored =
            shape_answer(response_id, &q, multi, &Answer::Selection(chosen.clone())).unwrap();
        assert_eq!(stored.response_text, None);
        assert_eq!(stored.selected_option_ids(), chosen);
        assert!(stored
            .selected_options
            .iter()
            .all(|s| s.question_response_id == stored.id));
        assert_eq!(stored.form_response_id, response_id);
    }

    #[test]
    fn test_unknown_option_rejected() {
        let registry = QuestionTypeRegistry::with_builtin_types();
        let multi = registry.lookup(codes::MULTIPLE_CHOICE).unwrap();
        let q = question_with_options(multi, 2);
        let stranger = Uuid::new_v4();

        assert_eq!(
            shape_answer(Uuid::nil(), &q, multi, &Answer::selection([q.options[0].id, stranger])),
            Err(ShapeMismatch::UnknownOption(stranger))
        );
    }

    #[test]
    fn test_empty_selection_rejected() {
        let registry = QuestionTypeRegistry::with_builtin_types();
        let multi = registry.lookup(codes::MULTIPLE_CHOICE).unwrap();
        let q = question_with_options(multi, 2);

        assert_eq!(
            shape_answer(Uuid::nil(), &q, multi, &Answer::Selection(Vec::new())),
            Err(ShapeMismatch::EmptySelection)
        );
    }
}
