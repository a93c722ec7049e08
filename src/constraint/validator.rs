//! Constraint validator
//!
//! Decides pass/fail for one (question, answer value) pair:
//! 1. A blank value passes exactly when the question is optional.
//! 2. Otherwise the question type's code selects a strategy. Codes with no
//!    registered strategy fall through to the permissive one.
//!
//! The validator holds no per-call state and never mutates its inputs, so
//! one instance can serve any number of concurrent callers.

use std::collections::HashMap;
use std::sync::Arc;

use super::bounds::{BoundIssue, Bounds};
use super::errors::ConstraintViolation;
use super::strategy::{
    ConstraintStrategy, DateStrategy, NumberStrategy, PermissiveStrategy, TextLengthStrategy,
};
use crate::definition::Question;
use crate::question_type::{codes, QuestionType};

/// Strategy map from question type code to validation rules.
#[derive(Clone)]
pub struct ConstraintValidator {
    strategies: HashMap<String, Arc<dyn ConstraintStrategy>>,
    fallback: Arc<dyn ConstraintStrategy>,
}

impl Default for ConstraintValidator {
    fn default() -> Self {
        Self::with_builtin_strategies()
    }
}

impl std::fmt::Debug for ConstraintValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut entries: Vec<_> = self
            .strategies
            .iter()
            .map(|(code, s)| (code.as_str(), s.name()))
            .collect();
        entries.sort();
        f.debug_struct("ConstraintValidator")
            .field("strategies", &entries)
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

impl ConstraintValidator {
    /// Creates a validator where every code is unconstrained.
    pub fn permissive() -> Self {
        Self {
            strategies: HashMap::new(),
            fallback: Arc::new(PermissiveStrategy),
        }
    }

    /// Creates a validator with the Number, ShortText, LongText and Date rules.
    pub fn with_builtin_strategies() -> Self {
        let mut validator = Self::permissive();
        let text: Arc<dyn ConstraintStrategy> = Arc::new(TextLengthStrategy);

        validator.register(codes::NUMBER, Arc::new(NumberStrategy));
        validator.register(codes::SHORT_TEXT, Arc::clone(&text));
        validator.register(codes::LONG_TEXT, text);
        validator.register(codes::DATE, Arc::new(DateStrategy));
        validator
    }

    /// Registers (or replaces) the strategy for a type code.
    pub fn register(
        &mut self,
        code: impl Into<String>,
        strategy: Arc<dyn ConstraintStrategy>,
    ) -> Option<Arc<dyn ConstraintStrategy>> {
        self.strategies.insert(code.into(), strategy)
    }

    /// Resolves the strategy for a type code.
    pub fn strategy_for(&self, code: &str) -> &dyn ConstraintStrategy {
        &**self.strategies.get(code).unwrap_or(&self.fallback)
    }

    /// Returns true if `code` has its own strategy.
    pub fn is_constrained(&self, code: &str) -> bool {
        self.strategies.contains_key(code)
    }

    /// Checks an answer value, returning the reason on failure.
    ///
    /// `question_type` must be the type `question` references.
    pub fn check(
        &self,
        question: &Question,
        question_type: &QuestionType,
        value: &str,
    ) -> Result<(), ConstraintViolation> {
        if value.trim().is_empty() {
            return if question.is_required {
                Err(ConstraintViolation::Required)
            } else {
                Ok(())
            };
        }

        self.strategy_for(&question_type.code)
            .check(value, &Bounds::of(question))
    }

    /// Returns true if the answer value satisfies the question's constraints.
    pub fn validate(&self, question: &Question, question_type: &QuestionType, value: &str) -> bool {
        self.check(question, question_type, value).is_ok()
    }

    /// Authoring-time check of a question's bound strings.
    pub fn check_bounds(
        &self,
        question_type: &QuestionType,
        minimum: Option<&str>,
        maximum: Option<&str>,
    ) -> Vec<BoundIssue> {
        self.strategy_for(&question_type.code)
            .check_bounds(&Bounds::new(minimum, maximum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question_type::QuestionTypeRegistry;
    use uuid::Uuid;

    fn question(
        question_type: &QuestionType,
        required: bool,
        min: Option<&str>,
        max: Option<&str>,
    ) -> Question {
        Question {
            id: Uuid::new_v4(),
            form_id: Uuid::nil(),
            question_type_id: question_type.id,
            question_text: "Q".into(),
            help_text: None,
            is_required: required,
            minimum_value: min.map(Into::into),
            maximum_value: max.map(Into::into),
            display_order: 1,
            options: Vec::new(),
        }
    }

    #[test]
    fn test_blank_follows_required_flag() {
        let registry = QuestionTypeRegistry::with_builtin_types();
        let validator = ConstraintValidator::default();

        for t in registry.all() {
            let optional = question(t, false, Some("5"), Some("10"));
            let required = question(t, true, Some("5"), Some("10"));
            for blank in ["", "   ", "\t\n"] {
                assert!(validator.validate(&optional, t, blank), "{}", t.code);
                assert!(!validator.validate(&required, t, blank), "{}", t.code);
            }
        }
    }

    #[test]
    fn test_number_age_range() {
        let registry = QuestionTypeRegistry::with_builtin_types();
        let number = registry.lookup(codes::NUMBER).unwrap();
        let q = question(number, true, Some("18"), Some("120"));
        let validator = ConstraintValidator::default();

        assert!(validator.validate(&q, number, "25"));
        assert!(!validator.validate(&q, number, "10"));
        assert!(!validator.validate(&q, number, "150"));
        assert!(!validator.validate(&q, number, "abc"));
    }

    #[test]
    fn test_choice_codes_ignore_bounds() {
        let registry = QuestionTypeRegistry::with_builtin_types();
        let validator = ConstraintValidator::default();

        for code in [
            codes::BOOLEAN,
            codes::SINGLE_CHOICE,
            codes::MULTIPLE_CHOICE,
            codes::DROPDOWN,
        ] {
            let t = registry.lookup(code).unwrap();
            let q = question(t, true, Some("100"), Some("1"));
            assert!(validator.validate(&q, t, "x"), "{}", code);
        }
    }

    #[test]
    fn test_unknown_code_is_permissive() {
        let mut registry = QuestionTypeRegistry::new();
        let t = registry
            .create(crate::question_type::QuestionTypeDefinition::scalar(
                "Signature",
                "Signature",
                "canvas",
                1,
            ))
            .unwrap();
        let q = question(&t, true, Some("10"), Some("20"));
        let validator = ConstraintValidator::default();

        assert!(!validator.is_constrained("Signature"));
        assert!(validator.validate(&q, &t, "abc"));
    }

    #[test]
    fn test_registered_strategy_for_new_code() {
        struct UpperCase;
        impl ConstraintStrategy for UpperCase {
            fn name(&self) -> &'static str {
                "upper"
            }
            fn check(&self, value: &str, _: &Bounds<'_>) -> Result<(), ConstraintViolation> {
                if value.chars().all(|c| !c.is_lowercase()) {
                    Ok(())
                } else {
                    Err(ConstraintViolation::Other("Use capital letters".into()))
                }
            }
        }

        let mut registry = QuestionTypeRegistry::new();
        let t = registry
            .create(crate::question_type::QuestionTypeDefinition::scalar(
                "Code", "Code", "text", 1,
            ))
            .unwrap();
        let mut validator = ConstraintValidator::default();
        validator.register("Code", Arc::new(UpperCase));

        let q = question(&t, false, None, None);
        assert!(validator.validate(&q, &t, "ABC"));
        assert_eq!(
            validator.check(&q, &t, "abc").unwrap_err().to_string(),
            "Use capital letters"
        );
    }

    #[test]
    fn test_check_bounds_dispatches_by_code() {
        let registry = QuestionTypeRegistry::with_builtin_types();
        let validator = ConstraintValidator::default();

        let date = registry.lookup(codes::DATE).unwrap();
        assert_eq!(
            validator
                .check_bounds(date, Some("2024-01-01"), Some("2023-01-01"))
                .len(),
            1
        );

        let dropdown = registry.lookup(codes::DROPDOWN).unwrap();
        assert!(validator
            .check_bounds(dropdown, Some("garbage"), None)
            .is_empty());
    }
}
