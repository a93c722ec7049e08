//! JSON I/O handling for CLI
//!
//! - Input: one JSON document per file, or stdin for `-`
//! - Output: one JSON object per command, `status` plus `data` or
//!   `code`/`message`/`errors` (keys in serde_json's sorted order)
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::errors::{CliError, CliResult};

/// Read and deserialize a JSON document from `path` (`-` for stdin)
pub fn read_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().lock().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(path)
            .map_err(|e| CliError::io_error(format!("{}: {}", path.display(), e)))?
    };

    if content.trim().is_empty() {
        return Err(CliError::input_error(format!(
            "{}: empty input",
            path.display()
        )));
    }

    serde_json::from_str(&content)
        .map_err(|e| CliError::input_error(format!("{}: {}", path.display(), e)))
}

/// Write a success response
pub fn write_response(out: &mut dyn Write, data: Value) -> CliResult<()> {
    write_value(
        out,
        &json!({
            "status": "ok",
            "data": data
        }),
    )
}

/// Write a rejection, with its per-field messages
pub fn write_rejection(
    out: &mut dyn Write,
    code: &str,
    message: &str,
    errors: Value,
) -> CliResult<()> {
    write_value(
        out,
        &json!({
            "status": "error",
            "code": code,
            "message": message,
            "errors": errors
        }),
    )
}

fn write_value(out: &mut dyn Write, value: &Value) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::CreateFormRequest;
    use tempfile::TempDir;

    #[test]
    fn test_read_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("form.json");
        fs::write(&path, json!({ "title": "Intake" }).to_string()).unwrap();

        let request: CreateFormRequest = read_json(&path).unwrap();
        assert_eq!(request.title, "Intake");
        assert!(request.is_active);
    }

    #[test]
    fn test_read_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("form.json");
        fs::write(&path, "  \n").unwrap();

        let err = read_json::<Value>(&path).unwrap_err();
        assert_eq!(err.code_str(), "FORMS_CLI_INPUT_ERROR");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_json::<Value>(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code_str(), "FORMS_CLI_IO_ERROR");
    }

    #[test]
    fn test_rejection_envelope() {
        let mut out = Vec::new();
        write_rejection(&mut out, "FORMS_FORM_INVALID", "rejected", json!({ "1": ["bad"] }))
            .unwrap();

        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], "FORMS_FORM_INVALID");
        assert_eq!(value["errors"]["1"][0], "bad");
        assert_eq!(
            value.as_object().unwrap().keys().collect::<Vec<_>>(),
            ["code", "errors", "message", "status"]
        );
    }
}
