//! Observable events of the forms engine
//!
//! Every log line names one of these. Rejections are warnings; a
//! builtin catalog that fails to seed is an error.

use std::fmt;

use super::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Question types
    /// Type catalog file read into the registry
    TypeCatalogLoaded,
    /// A builtin type could not be registered
    TypeSeedFailed,
    TypeCreated,
    TypeUpdated,
    TypeDeleted,

    // Forms
    /// Form passed authoring checks and was stored
    FormCreated,
    /// Form definition failed authoring checks
    FormRejected,

    // Responses
    ResponseAccepted,
    /// One or more answers failed; nothing stored
    ResponseRejected,
    ResponseDeleted,
}

impl Event {
    /// Returns the string representation used in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::TypeCatalogLoaded => "TYPE_CATALOG_LOADED",
            Event::TypeSeedFailed => "TYPE_SEED_FAILED",
            Event::TypeCreated => "TYPE_CREATED",
            Event::TypeUpdated => "TYPE_UPDATED",
            Event::TypeDeleted => "TYPE_DELETED",
            Event::FormCreated => "FORM_CREATED",
            Event::FormRejected => "FORM_REJECTED",
            Event::ResponseAccepted => "RESPONSE_ACCEPTED",
            Event::ResponseRejected => "RESPONSE_REJECTED",
            Event::ResponseDeleted => "RESPONSE_DELETED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::TypeSeedFailed => Severity::Error,
            Event::FormRejected | Event::ResponseRejected => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
