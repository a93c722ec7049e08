//! CLI argument definitions using clap
//!
//! Commands:
//! - formcore types --config <path>
//! - formcore check-form --config <path> --form <path>
//! - formcore check-response --config <path> --form <path> --response <path>
//!
//! A file argument of `-` reads from stdin.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// formcore - dynamic form definitions and response validation
#[derive(Parser, Debug)]
#[command(name = "formcore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the registered question types
    Types {
        /// Path to configuration file
        #[arg(long, default_value = "./formcore.json")]
        config: PathBuf,
    },

    /// Check a form definition and print the resulting form
    CheckForm {
        /// Path to configuration file
        #[arg(long, default_value = "./formcore.json")]
        config: PathBuf,

        /// Form definition (CreateFormRequest JSON)
        #[arg(long)]
        form: PathBuf,
    },

    /// Check a response against a form definition
    CheckResponse {
        /// Path to configuration file
        #[arg(long, default_value = "./formcore.json")]
        config: PathBuf,

        /// Form definition (CreateFormRequest JSON)
        #[arg(long)]
        form: PathBuf,

        /// Response (SubmitResponseRequest JSON)
        #[arg(long)]
        response: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
