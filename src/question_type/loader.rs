//! Question type catalog file
//!
//! A catalog is a JSON array of type definitions:
//!
//! ```json
//! [{ "code": "Number", "name": "Number", "input_type": "number", "display_order": 3 }]
//! ```
//!
//! A missing file is an empty catalog. Unreadable or malformed files are errors.

use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{RegistryError, RegistryResult};
use super::registry::QuestionTypeRegistry;
use super::types::QuestionTypeDefinition;
use crate::observability::{log_event, Event};

/// Reads and writes a question type catalog file.
pub struct QuestionTypeLoader {
    path: PathBuf,
}

impl QuestionTypeLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the catalog path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all definitions from the catalog file.
    pub fn read(&self) -> RegistryResult<Vec<QuestionTypeDefinition>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| self.malformed(format!("Failed to read file: {}", e)))?;

        serde_json::from_str(&content).map_err(|e| self.malformed(format!("Invalid JSON: {}", e)))
    }

    /// Loads the catalog into `registry`.
    ///
    /// Entries whose code is already registered are a conflict.
    pub fn load_into(&self, registry: &mut QuestionTypeRegistry) -> RegistryResult<usize> {
        let definitions = self.read()?;
        let count = definitions.len();

        for def in definitions {
            registry.register(def).map_err(|e| match e {
                RegistryError::CodeConflict(_) => e,
                other => self.malformed(other.to_string()),
            })?;
        }

        log_event(
            Event::TypeCatalogLoaded,
            &[
                ("count", &count.to_string()),
                ("path", &self.path.display().to_string()),
            ],
        );
        Ok(count)
    }

    /// Writes every type in `registry` to the catalog file, display order first.
    pub fn save(&self, registry: &QuestionTypeRegistry) -> RegistryResult<()> {
        let definitions: Vec<_> = registry
            .all()
            .into_iter()
            .map(QuestionTypeDefinition::from_type)
            .collect();

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    self.malformed(format!("Failed to create catalog directory: {}", e))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(&definitions)
            .map_err(|e| self.malformed(format!("Failed to serialize catalog: {}", e)))?;

        fs::write(&self.path, content)
            .map_err(|e| self.malformed(format!("Failed to write file: {}", e)))
    }

    fn malformed(&self, reason: String) -> RegistryError {
        RegistryError::CatalogMalformed {
            path: self.path.display().to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question_type::types::codes;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let loader = QuestionTypeLoader::new(temp_dir.path().join("types.json"));
        let mut registry = QuestionTypeRegistry::new();

        assert_eq!(loader.load_into(&mut registry).unwrap(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let loader = QuestionTypeLoader::new(temp_dir.path().join("catalog").join("types.json"));
        let original = QuestionTypeRegistry::with_builtin_types();

        loader.save(&original).unwrap();

        let mut reloaded = QuestionTypeRegistry::new();
        loader.load_into(&mut reloaded).unwrap();

        assert_eq!(reloaded.len(), original.len());
        let number = reloaded.lookup(codes::NUMBER).unwrap();
        assert_eq!(number.id, original.lookup(codes::NUMBER).unwrap().id);
    }

    #[test]
    fn test_malformed_json_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("types.json");
        fs::write(&path, "{ not json").unwrap();

        let loader = QuestionTypeLoader::new(&path);
        let err = loader.load_into(&mut QuestionTypeRegistry::new()).unwrap_err();
        assert_eq!(err.code(), "FORMS_TYPE_CATALOG_MALFORMED");
    }

    #[test]
    fn test_custom_type_from_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("types.json");
        fs::write(
            &path,
            r#"[{"code":"Slider","name":"Slider","input_type":"range","display_order":20,
                "application_data":{"step":5}}]"#,
        )
        .unwrap();

        let mut registry = QuestionTypeRegistry::with_builtin_types();
        QuestionTypeLoader::new(&path).load_into(&mut registry).unwrap();

        let slider = registry.lookup("Slider").unwrap();
        assert_eq!(slider.input_type, "range");
        assert_eq!(slider.application_data.as_ref().unwrap()["step"], 5);
    }

    #[test]
    fn test_duplicate_code_in_catalog_conflicts() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("types.json");
        fs::write(&path, r#"[{"code":"Number","name":"Number"}]"#).unwrap();

        let mut registry = QuestionTypeRegistry::with_builtin_types();
        let err = QuestionTypeLoader::new(&path)
            .load_into(&mut registry)
            .unwrap_err();
        assert!(err.is_conflict());
    }
}
