//! Question type registry errors
//!
//! Error codes:
//! - FORMS_TYPE_NOT_FOUND (NOT FOUND)
//! - FORMS_TYPE_CODE_CONFLICT (CONFLICT)
//! - FORMS_TYPE_IN_USE (CONFLICT)
//! - FORMS_TYPE_CODE_IMMUTABLE (CONFLICT)
//! - FORMS_TYPE_STORAGE_MODE_IMMUTABLE (CONFLICT)
//! - FORMS_TYPE_INVALID (REJECT)
//! - FORMS_TYPE_CATALOG_MALFORMED (FATAL)

use thiserror::Error;
use uuid::Uuid;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// How an administrative boundary should classify a registry error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    NotFound,
    Conflict,
    Reject,
    Fatal,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    /// No type with this code
    #[error("Question type '{0}' not found")]
    CodeNotFound(String),

    /// No type with this id
    #[error("Question type {0} not found")]
    IdNotFound(Uuid),

    /// Code already taken by another type
    #[error("Question type code '{0}' already exists")]
    CodeConflict(String),

    /// Type still referenced by questions
    #[error("Question type '{code}' is referenced by {questions} question(s)")]
    InUse { code: String, questions: usize },

    /// Code change on a referenced type
    #[error("Question type code '{0}' cannot change while questions reference it")]
    CodeImmutable(String),

    /// Storage-mode change on a referenced type
    #[error("Question type '{0}' cannot change its option flags while questions reference it")]
    StorageModeImmutable(String),

    /// Definition failed its structural checks
    #[error("Invalid question type: {0}")]
    Invalid(String),

    /// Catalog file unreadable or not valid JSON
    #[error("Malformed question type catalog '{path}': {reason}")]
    CatalogMalformed { path: String, reason: String },

    /// Usage lookup failed in the persistence collaborator
    #[error("Question type usage lookup failed: {0}")]
    Usage(String),
}

impl RegistryError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::CodeNotFound(_) | RegistryError::IdNotFound(_) => "FORMS_TYPE_NOT_FOUND",
            RegistryError::CodeConflict(_) => "FORMS_TYPE_CODE_CONFLICT",
            RegistryError::InUse { .. } => "FORMS_TYPE_IN_USE",
            RegistryError::CodeImmutable(_) => "FORMS_TYPE_CODE_IMMUTABLE",
            RegistryError::StorageModeImmutable(_) => "FORMS_TYPE_STORAGE_MODE_IMMUTABLE",
            RegistryError::Invalid(_) => "FORMS_TYPE_INVALID",
            RegistryError::CatalogMalformed { .. } => "FORMS_TYPE_CATALOG_MALFORMED",
            RegistryError::Usage(_) => "FORMS_TYPE_USAGE_FAILED",
        }
    }

    /// Returns the classification for this error
    pub fn class(&self) -> ErrorClass {
        match self {
            RegistryError::CodeNotFound(_) | RegistryError::IdNotFound(_) => ErrorClass::NotFound,
            RegistryError::CodeConflict(_)
            | RegistryError::InUse { .. }
            | RegistryError::CodeImmutable(_)
            | RegistryError::StorageModeImmutable(_) => ErrorClass::Conflict,
            RegistryError::Invalid(_) => ErrorClass::Reject,
            RegistryError::CatalogMalformed { .. } | RegistryError::Usage(_) => ErrorClass::Fatal,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.class() == ErrorClass::Conflict
    }
}
