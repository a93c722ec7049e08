//! Persistence collaborator traits
//!
//! The core never stores anything itself. Implementations must:
//! - load a form with all questions and options as one consistent read
//! - write a form response with all its answers and selections atomically
//! - reject a second (question_response_id, question_option_id) pair

use uuid::Uuid;

use super::errors::StoreResult;
use crate::definition::Form;
use crate::response::FormResponse;

/// Form storage.
pub trait FormRepository: Send + Sync {
    /// Store a new form with its questions and options
    fn insert_form(&self, form: &Form) -> StoreResult<()>;

    /// Load a form with its questions and options
    fn find_form(&self, id: Uuid) -> StoreResult<Option<Form>>;
}

/// Response storage.
pub trait ResponseRepository: Send + Sync {
    /// Store a response with all answers, or nothing
    fn insert_response(&self, response: &FormResponse) -> StoreResult<()>;

    /// Load a response, deleted or not
    fn find_response(&self, id: Uuid) -> StoreResult<Option<FormResponse>>;

    /// Responses to a form that are not soft-deleted
    fn responses_for_form(&self, form_id: Uuid) -> StoreResult<Vec<FormResponse>>;

    /// Soft-delete a response with its answers. Returns false if already deleted.
    fn soft_delete_response(&self, id: Uuid) -> StoreResult<bool>;
}

/// Reference counting used by the type registry's delete guard.
pub trait TypeUsage {
    /// Number of questions referencing the type
    fn questions_using_type(&self, type_id: Uuid) -> StoreResult<usize>;
}
