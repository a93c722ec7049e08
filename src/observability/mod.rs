//! Observability
//!
//! Structured JSON logging of lifecycle events. Logging is read-only:
//! it never changes the outcome of the operation being logged.
//!
//! ```ignore
//! use formcore::observability::{log_event, Event};
//!
//! log_event(Event::FormCreated, &[("form_id", "...")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an event at its own severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
