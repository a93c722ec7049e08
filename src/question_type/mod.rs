//! Question type catalog
//!
//! Question types are rows, not variants: adding a type means registering
//! a definition, and everything downstream dispatches on its `code` and its
//! `has_options` / `allows_multiple_values` flags.

mod errors;
mod loader;
mod registry;
mod types;

pub use errors::{ErrorClass, RegistryError, RegistryResult};
pub use loader::QuestionTypeLoader;
pub use registry::QuestionTypeRegistry;
pub use types::{builtin_types, codes, QuestionType, QuestionTypeDefinition, StorageMode};
