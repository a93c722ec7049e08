//! # Store Errors
//!
//! Failures of the persistence collaborator. Unlike validation outcomes,
//! these propagate to the caller.

use thiserror::Error;
use uuid::Uuid;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Entity not found
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// Entity with this id already stored
    #[error("{entity} {id} already exists")]
    DuplicateId { entity: &'static str, id: Uuid },

    /// (question_response_id, question_option_id) already stored
    #[error("Option {question_option_id} already selected in answer {question_response_id}")]
    DuplicateSelection {
        question_response_id: Uuid,
        question_option_id: Uuid,
    },

    /// Lock poisoned by a panicking writer
    #[error("Storage error: lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "FORMS_STORE_NOT_FOUND",
            StoreError::DuplicateId { .. } => "FORMS_STORE_DUPLICATE_ID",
            StoreError::DuplicateSelection { .. } => "FORMS_STORE_DUPLICATE_SELECTION",
            StoreError::LockPoisoned => "FORMS_STORE_UNAVAILABLE",
        }
    }
}
