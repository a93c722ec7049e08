//! Form definitions
//!
//! Form -> Question -> QuestionOption, authored by administrators and
//! long-lived. Authoring reports structural problems per question instead
//! of failing on the first one.

mod authoring;
mod errors;
mod types;

pub use authoring::{CreateFormRequest, FormAuthoring, OptionDraft, QuestionDraft};
pub use errors::{AuthoringError, AuthoringResult, StructuralErrors};
pub use types::{Form, Question, QuestionOption};
