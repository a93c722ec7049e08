//! CLI command implementations
//!
//! Every command boots the same way: load the config, apply its log
//! level, build the question type registry. Forms and responses live in
//! an in-memory store for the duration of one command.
//!
//! Stdout carries exactly one JSON document per command; log lines go to
//! stderr.

use std::io::{self, Write};
use std::path::Path;

use serde_json::{json, Value};

use crate::config::FormsConfig;
use crate::constraint::ConstraintValidator;
use crate::definition::{AuthoringError, CreateFormRequest, Form, FormAuthoring};
use crate::observability::Logger;
use crate::question_type::QuestionTypeRegistry;
use crate::store::InMemoryStore;
use crate::submission::{SubmissionError, SubmissionService, SubmitResponseRequest};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_json, write_rejection, write_response};

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cmd {
        Command::Types { config } => types(&config, &mut out),
        Command::CheckForm { config, form } => check_form(&config, &form, &mut out),
        Command::CheckResponse {
            config,
            form,
            response,
        } => check_response(&config, &form, &response, &mut out),
    }
}

/// Loads the config and builds the registry it describes.
pub fn boot(config_path: &Path) -> CliResult<QuestionTypeRegistry> {
    Logger::set_stderr_only(true);
    let config = FormsConfig::load(config_path)?;
    Logger::set_min_severity(config.severity()?);
    Ok(config.registry()?)
}

/// Print the registered question types in display order
pub fn types(config_path: &Path, out: &mut dyn Write) -> CliResult<()> {
    let registry = boot(config_path)?;
    write_response(out, serde_json::to_value(registry.all())?)
}

/// Check a form definition and print the form it produces
pub fn check_form(config_path: &Path, form_path: &Path, out: &mut dyn Write) -> CliResult<()> {
    let registry = boot(config_path)?;
    let validator = ConstraintValidator::default();
    let store = InMemoryStore::new();

    let request: CreateFormRequest = read_json(form_path)?;
    if let Some(form) = author(&registry, &validator, &store, &request, out)? {
        write_response(out, serde_json::to_value(&form)?)?;
    }
    Ok(())
}

/// Author a form, then submit a response against it
///
/// A response without `form_id` targets the authored form.
pub fn check_response(
    config_path: &Path,
    form_path: &Path,
    response_path: &Path,
    out: &mut dyn Write,
) -> CliResult<()> {
    let registry = boot(config_path)?;
    let validator = ConstraintValidator::default();
    let store = InMemoryStore::new();

    let form_request: CreateFormRequest = read_json(form_path)?;
    let Some(form) = author(&registry, &validator, &store, &form_request, out)? else {
        return Ok(());
    };

    let mut response_value: Value = read_json(response_path)?;
    match response_value.as_object_mut() {
        Some(obj) => {
            obj.entry("form_id").or_insert_with(|| json!(form.id));
        }
        None => return Err(CliError::input_error("Response must be a JSON object")),
    }
    let request: SubmitResponseRequest = serde_json::from_value(response_value)?;

    let service = SubmissionService::new(&registry, &validator);
    match service.submit(&request, &store, &store) {
        Ok(response) => write_response(out, serde_json::to_value(&response)?),
        Err(SubmissionError::Store(e)) => Err(e.into()),
        Err(SubmissionError::Rejected(errors)) => write_rejection(
            out,
            "FORMS_RESPONSE_REJECTED",
            "Response rejected",
            serde_json::to_value(&errors)?,
        ),
        Err(e) => write_rejection(out, e.code(), &e.to_string(), json!({})),
    }
}

/// Runs authoring. A rejected definition is printed and yields `None`.
fn author(
    registry: &QuestionTypeRegistry,
    validator: &ConstraintValidator,
    store: &InMemoryStore,
    request: &CreateFormRequest,
    out: &mut dyn Write,
) -> CliResult<Option<Form>> {
    match FormAuthoring::new(registry, validator).create_form(request, store) {
        Ok(form) => Ok(Some(form)),
        Err(AuthoringError::Invalid(errors)) => {
            write_rejection(
                out,
                "FORMS_FORM_INVALID",
                "Form definition rejected",
                serde_json::to_value(&errors)?,
            )?;
            Ok(None)
        }
        Err(AuthoringError::Store(e)) => Err(e.into()),
    }
}
