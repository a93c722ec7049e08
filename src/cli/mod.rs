//! CLI module for formcore
//!
//! Provides command-line access to:
//! - types: list the question type catalog
//! - check-form: author a form from a JSON definition
//! - check-response: validate a response against a form definition

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{boot, check_form, check_response, run, run_command, types};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_json, write_rejection, write_response};
