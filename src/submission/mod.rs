//! Response submission
//!
//! Validates a respondent's answers against a stored form and records
//! them, or rejects the submission with messages keyed by question id.

mod errors;
mod request;
mod service;

pub use errors::{AnswerErrors, SubmissionError, SubmissionResult};
pub use request::{AnswerSubmission, SubmitResponseRequest};
pub use service::SubmissionService;
