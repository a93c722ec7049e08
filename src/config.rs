//! Engine configuration
//!
//! A single JSON file, every field optional:
//!
//! ```json
//! { "type_catalog": "types.json", "seed_builtin_types": true, "log_level": "INFO" }
//! ```
//!
//! A relative `type_catalog` is resolved against the config file's directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event, Event, Severity};
use crate::question_type::{QuestionTypeLoader, QuestionTypeRegistry, RegistryResult};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config JSON in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid log_level: {0}")]
    LogLevel(String),
}

impl ConfigError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "FORMS_CONFIG_UNREADABLE",
            ConfigError::Malformed { .. } | ConfigError::LogLevel(_) => "FORMS_CONFIG_INVALID",
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormsConfig {
    /// Extra question types to load on top of (or instead of) the builtins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_catalog: Option<PathBuf>,

    /// Register the builtin catalog first (default: true)
    #[serde(default = "default_seed_builtin_types")]
    pub seed_builtin_types: bool,

    /// Lowest severity written to the log (default: "INFO")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_seed_builtin_types() -> bool {
    true
}

fn default_log_level() -> String {
    "INFO".to_string()
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            type_catalog: None,
            seed_builtin_types: default_seed_builtin_types(),
            log_level: default_log_level(),
        }
    }
}

impl FormsConfig {
    /// Loads configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut config: FormsConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        config.severity()?;

        if let (Some(catalog), Some(dir)) = (config.type_catalog.as_ref(), path.parent()) {
            if catalog.is_relative() {
                config.type_catalog = Some(dir.join(catalog));
            }
        }

        log_event(
            Event::ConfigLoaded,
            &[("path", &path.display().to_string())],
        );
        Ok(config)
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> ConfigResult<Severity> {
        self.log_level.parse().map_err(ConfigError::LogLevel)
    }

    /// Builds the question type registry this configuration describes.
    pub fn registry(&self) -> RegistryResult<QuestionTypeRegistry> {
        let mut registry = if self.seed_builtin_types {
            QuestionTypeRegistry::with_builtin_types()
        } else {
            QuestionTypeRegistry::new()
        };
        if let Some(catalog) = &self.type_catalog {
            QuestionTypeLoader::new(catalog).load_into(&mut registry)?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question_type::codes;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = FormsConfig::load(&dir.path().join("forms.json")).unwrap();
        assert_eq!(config, FormsConfig::default());
        assert!(config.seed_builtin_types);
        assert_eq!(config.severity().unwrap(), Severity::Info);
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("forms.json");
        fs::write(&path, json!({ "log_level": "warn" }).to_string()).unwrap();

        let config = FormsConfig::load(&path).unwrap();
        assert!(config.seed_builtin_types);
        assert_eq!(config.severity().unwrap(), Severity::Warn);
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("forms.json");
        fs::write(&path, "{ not json").unwrap();

        let err = FormsConfig::load(&path).unwrap_err();
        assert_eq!(err.code(), "FORMS_CONFIG_INVALID");
    }

    #[test]
    fn test_bad_log_level() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("forms.json");
        fs::write(&path, json!({ "log_level": "LOUD" }).to_string()).unwrap();

        assert!(matches!(
            FormsConfig::load(&path),
            Err(ConfigError::LogLevel(_))
        ));
    }

    #[test]
    fn test_relative_catalog_resolved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("forms.json");
        fs::write(&path, json!({ "type_catalog": "types.json" }).to_string()).unwrap();

        let config = FormsConfig::load(&path).unwrap();
        assert_eq!(config.type_catalog, Some(dir.path().join("types.json")));
    }

    #[test]
    fn test_registry_from_catalog_only() {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("types.json");
        fs::write(
            &catalog,
            json!([{ "code": "rating", "name": "Rating", "input_type": "range" }]).to_string(),
        )
        .unwrap();

        let config = FormsConfig {
            type_catalog: Some(catalog),
            seed_builtin_types: false,
            ..Default::default()
        };
        let registry = config.registry().unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.find_by_code("rating").is_some());
        assert!(registry.find_by_code(codes::NUMBER).is_none());
    }
}
