//! Question type records
//!
//! A question type is data, not code: its `code` is the dispatch key for
//! constraint validation and its two capability flags decide how answers
//! are stored:
//! - `has_options = false`: scalar answer stored as text
//! - `has_options = true, allows_multiple_values = false`: exactly one selection
//! - `has_options = true, allows_multiple_values = true`: one or more selections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Codes of the question types shipped with the built-in catalog.
pub mod codes {
    pub const SHORT_TEXT: &str = "ShortText";
    pub const LONG_TEXT: &str = "LongText";
    pub const NUMBER: &str = "Number";
    pub const DATE: &str = "Date";
    pub const BOOLEAN: &str = "Boolean";
    pub const SINGLE_CHOICE: &str = "SingleChoice";
    pub const MULTIPLE_CHOICE: &str = "MultipleChoice";
    pub const DROPDOWN: &str = "Dropdown";
    pub const RANKING: &str = "Ranking";
}

/// How answers to questions of a type are physically stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// A single text value
    Scalar,
    /// Exactly one selected option
    SingleSelection,
    /// One or more selected options
    MultipleSelection,
}

/// A question type row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionType {
    pub id: Uuid,
    /// Stable dispatch key, unique across the catalog
    pub code: String,
    /// Human-readable name
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub has_options: bool,
    pub allows_multiple_values: bool,
    /// Rendering hint, never interpreted here
    pub input_type: String,
    pub display_order: i32,
    /// Consumer-defined payload, never interpreted here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_data: Option<serde_json::Value>,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

impl QuestionType {
    /// Builds a type record from a definition, assigning a fresh id.
    pub fn from_definition(def: QuestionTypeDefinition) -> Self {
        let now = Utc::now();
        Self {
            id: def.id.unwrap_or_else(Uuid::new_v4),
            code: def.code,
            name: def.name,
            description: def.description,
            has_options: def.has_options,
            allows_multiple_values: def.allows_multiple_values,
            input_type: def.input_type,
            display_order: def.display_order,
            application_data: def.application_data,
            created_on: now,
            updated_on: now,
        }
    }

    /// Storage mode dictated by the capability flags.
    pub fn storage_mode(&self) -> StorageMode {
        match (self.has_options, self.allows_multiple_values) {
            (false, _) => StorageMode::Scalar,
            (true, false) => StorageMode::SingleSelection,
            (true, true) => StorageMode::MultipleSelection,
        }
    }

    /// Returns true if answers are stored as option selections.
    pub fn is_choice(&self) -> bool {
        self.has_options
    }
}

/// Input for creating or replacing a question type.
///
/// Also the on-disk shape of a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionTypeDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub has_options: bool,
    #[serde(default)]
    pub allows_multiple_values: bool,
    #[serde(default = "default_input_type")]
    pub input_type: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_data: Option<serde_json::Value>,
}

fn default_input_type() -> String {
    "text".to_string()
}

impl QuestionTypeDefinition {
    /// Create a scalar type definition
    pub fn scalar(code: &str, name: &str, input_type: &str, display_order: i32) -> Self {
        Self {
            id: None,
            code: code.to_string(),
            name: name.to_string(),
            description: None,
            has_options: false,
            allows_multiple_values: false,
            input_type: input_type.to_string(),
            display_order,
            application_data: None,
        }
    }

    /// Create a choice type definition
    pub fn choice(
        code: &str,
        name: &str,
        input_type: &str,
        allows_multiple_values: bool,
        display_order: i32,
    ) -> Self {
        Self {
            has_options: true,
            allows_multiple_values,
            ..Self::scalar(code, name, input_type, display_order)
        }
    }

    /// Reverse of [`QuestionType::from_definition`], keeping the id.
    pub fn from_type(question_type: &QuestionType) -> Self {
        Self {
            id: Some(question_type.id),
            code: question_type.code.clone(),
            name: question_type.name.clone(),
            description: question_type.description.clone(),
            has_options: question_type.has_options,
            allows_multiple_values: question_type.allows_multiple_values,
            input_type: question_type.input_type.clone(),
            display_order: question_type.display_order,
            application_data: question_type.application_data.clone(),
        }
    }

    /// Checks the definition itself (not its use by questions).
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err("Question type code must not be empty".into());
        }
        if self.code.trim() != self.code {
            return Err(format!(
                "Question type code '{}' must not have surrounding whitespace",
                self.code
            ));
        }
        if self.name.trim().is_empty() {
            return Err(format!("Question type '{}' must have a name", self.code));
        }
        if self.allows_multiple_values && !self.has_options {
            return Err(format!(
                "Question type '{}' allows multiple values but has no options",
                self.code
            ));
        }
        Ok(())
    }
}

/// The catalog seeded into a fresh registry.
pub fn builtin_types() -> Vec<QuestionTypeDefinition> {
    vec![
        QuestionTypeDefinition::scalar(codes::SHORT_TEXT, "Short text", "text", 1),
        QuestionTypeDefinition::scalar(codes::LONG_TEXT, "Long text", "textarea", 2),
        QuestionTypeDefinition::scalar(codes::NUMBER, "Number", "number", 3),
        QuestionTypeDefinition::scalar(codes::DATE, "Date", "date", 4),
        QuestionTypeDefinition::scalar(codes::BOOLEAN, "Yes / No", "checkbox", 5),
        QuestionTypeDefinition::choice(codes::SINGLE_CHOICE, "Single choice", "radio", false, 6),
        QuestionTypeDefinition::choice(
            codes::MULTIPLE_CHOICE,
            "Multiple choice",
            "checkbox-group",
            true,
            7,
        ),
        QuestionTypeDefinition::choice(codes::DROPDOWN, "Dropdown", "select", false, 8),
        QuestionTypeDefinition::choice(codes::RANKING, "Ranking", "ranking", true, 9),
    ]
}
