//! In-memory question type catalog
//!
//! The registry is a read model: validation code receives it (or the
//! types it resolves) by reference and never mutates it. Administrative
//! changes go through `create`, `update` and `delete`, which guard the
//! referential rules against a [`TypeUsage`] collaborator.

use chrono::Utc;
use uuid::Uuid;

use super::errors::{RegistryError, RegistryResult};
use super::types::{builtin_types, QuestionType, QuestionTypeDefinition};
use crate::observability::{log_event, Event};
use crate::store::TypeUsage;

/// Catalog of question types, keyed by id and by code.
#[derive(Debug, Clone, Default)]
pub struct QuestionTypeRegistry {
    /// Types in insertion order (ties in display order keep this order)
    types: Vec<QuestionType>,
}

impl QuestionTypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with the built-in catalog.
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();
        for def in builtin_types() {
            // Built-in codes are distinct, so registration cannot conflict
            if let Err(e) = registry.register(def) {
                log_event(Event::TypeSeedFailed, &[("error", &e.to_string())]);
            }
        }
        registry
    }

    /// Registers a type without usage checks (catalog loading, seeding).
    pub fn register(&mut self, def: QuestionTypeDefinition) -> RegistryResult<&QuestionType> {
        def.validate_structure().map_err(RegistryError::Invalid)?;

        if self.find_by_code(&def.code).is_some() {
            return Err(RegistryError::CodeConflict(def.code));
        }
        if let Some(id) = def.id {
            if self.get(id).is_some() {
                return Err(RegistryError::Invalid(format!(
                    "Question type id {} already registered",
                    id
                )));
            }
        }

        self.types.push(QuestionType::from_definition(def));
        Ok(&self.types[self.types.len() - 1])
    }

    /// Creates a new type (administrative).
    pub fn create(&mut self, def: QuestionTypeDefinition) -> RegistryResult<QuestionType> {
        let created = self.register(def)?.clone();
        log_event(
            Event::TypeCreated,
            &[("code", &created.code), ("id", &created.id.to_string())],
        );
        Ok(created)
    }

    /// Replaces the attributes of an existing type (administrative).
    ///
    /// The code and the option flags may only change while no question
    /// references the type.
    pub fn update(
        &mut self,
        id: Uuid,
        def: QuestionTypeDefinition,
        usage: &dyn TypeUsage,
    ) -> RegistryResult<QuestionType> {
        def.validate_structure().map_err(RegistryError::Invalid)?;

        let index = self.index_of(id).ok_or(RegistryError::IdNotFound(id))?;
        let current = &self.types[index];
        let current_code = current.code.clone();
        let recoded = def.code != current_code;
        let remoded = def.has_options != current.has_options
            || def.allows_multiple_values != current.allows_multiple_values;

        if recoded && self.find_by_code(&def.code).is_some() {
            return Err(RegistryError::CodeConflict(def.code));
        }
        if (recoded || remoded) && Self::usage_count(usage, id)? > 0 {
            return Err(if recoded {
                RegistryError::CodeImmutable(current_code)
            } else {
                RegistryError::StorageModeImmutable(current_code)
            });
        }

        let existing = &mut self.types[index];
        existing.code = def.code;
        existing.name = def.name;
        existing.description = def.description;
        existing.has_options = def.has_options;
        existing.allows_multiple_values = def.allows_multiple_values;
        existing.input_type = def.input_type;
        existing.display_order = def.display_order;
        existing.application_data = def.application_data;
        existing.updated_on = Utc::now();

        log_event(
            Event::TypeUpdated,
            &[("code", &existing.code), ("id", &id.to_string())],
        );
        Ok(existing.clone())
    }

    /// Removes a type (administrative). Fails while questions reference it.
    pub fn delete(&mut self, id: Uuid, usage: &dyn TypeUsage) -> RegistryResult<QuestionType> {
        let index = self.index_of(id).ok_or(RegistryError::IdNotFound(id))?;

        let questions = Self::usage_count(usage, id)?;
        if questions > 0 {
            return Err(RegistryError::InUse {
                code: self.types[index].code.clone(),
                questions,
            });
        }

        let removed = self.types.remove(index);
        log_event(
            Event::TypeDeleted,
            &[("code", &removed.code), ("id", &id.to_string())],
        );
        Ok(removed)
    }

    /// Finds a type by its dispatch code.
    pub fn find_by_code(&self, code: &str) -> Option<&QuestionType> {
        self.types.iter().find(|t| t.code == code)
    }

    /// Finds a type by code, failing with a not-found error.
    pub fn lookup(&self, code: &str) -> RegistryResult<&QuestionType> {
        self.find_by_code(code)
            .ok_or_else(|| RegistryError::CodeNotFound(code.to_string()))
    }

    /// Gets a type by id.
    pub fn get(&self, id: Uuid) -> Option<&QuestionType> {
        self.types.iter().find(|t| t.id == id)
    }

    /// All types ordered by display order, ties in insertion order.
    pub fn all(&self) -> Vec<&QuestionType> {
        let mut all: Vec<_> = self.types.iter().collect();
        all.sort_by_key(|t| t.display_order);
        all
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn index_of(&self, id: Uuid) -> Option<usize> {
        self.types.iter().position(|t| t.id == id)
    }

    fn usage_count(usage: &dyn TypeUsage, id: Uuid) -> RegistryResult<usize> {
        usage
            .questions_using_type(id)
            .map_err(|e| RegistryError::Usage(e.to_string()))
    }
}
