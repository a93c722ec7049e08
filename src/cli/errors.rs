//! CLI-specific error types
//!
//! These end the process: they print to stderr and exit non-zero.
//! Rejected forms and responses are not CLI errors; they are reported
//! as JSON on stdout.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::question_type::RegistryError;
use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// Question type catalog could not be loaded
    CatalogError,
    /// I/O error (files, stdin/stdout)
    IoError,
    /// Input file is not the expected JSON
    InputError,
    /// Store failure
    StoreError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "FORMS_CLI_CONFIG_ERROR",
            Self::CatalogError => "FORMS_CLI_CATALOG_ERROR",
            Self::IoError => "FORMS_CLI_IO_ERROR",
            Self::InputError => "FORMS_CLI_INPUT_ERROR",
            Self::StoreError => "FORMS_CLI_STORE_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn input_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InputError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::input_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(CliErrorCode::ConfigError, format!("{} ({})", e, e.code()))
    }
}

impl From<RegistryError> for CliError {
    fn from(e: RegistryError) -> Self {
        Self::new(CliErrorCode::CatalogError, format!("{} ({})", e, e.code()))
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::new(CliErrorCode::StoreError, format!("{} ({})", e, e.code()))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_code() {
        let err = CliError::input_error("bad form");
        assert_eq!(err.to_string(), "FORMS_CLI_INPUT_ERROR: bad form");
        assert_eq!(err.code(), &CliErrorCode::InputError);
    }

    #[test]
    fn test_from_config_error() {
        let err: CliError = ConfigError::LogLevel("LOUD".into()).into();
        assert_eq!(err.code_str(), "FORMS_CLI_CONFIG_ERROR");
        assert!(err.message().contains("FORMS_CONFIG_INVALID"));
    }
}
