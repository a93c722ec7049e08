//! Persistence collaborator
//!
//! Repository traits the core writes through, plus an in-memory
//! implementation.

mod errors;
mod memory;
mod repository;

pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use repository::{FormRepository, ResponseRepository, TypeUsage};
