//! Error handling for the IBDx CLI

use ibdx_core::{EntityKind, IbdxError};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for IBDx CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    /// The output location for a chart does not exist
    #[error("Chart container missing: {path}")]
    EmptyContainer { path: PathBuf },

    #[error("{kind} {name} not found in dataset")]
    NotFound {
        kind: EntityKind,
        name: String,
        suggestions: Vec<String>,
    },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn empty_container(path: PathBuf) -> Self {
        Self::EmptyContainer { path }
    }

    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument { message: message.into() }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        Self::config(format!("TOML serialization error: {}", err))
    }
}

impl From<IbdxError> for CliError {
    fn from(err: IbdxError) -> Self {
        match err {
            IbdxError::LookupMiss { kind, name, suggestions } => Self::NotFound { kind, name, suggestions },
            IbdxError::InvalidSchema(message) => Self::config(message),
            other => Self::invalid_argument(other.to_string()),
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::NotFound { kind, suggestions, .. } => {
            if suggestions.is_empty() {
                message.push_str(&format!(
                    "\n\nSuggestions:\n\
                     • Check the spelling of the {} name\n\
                     • Use 'ibdx search <TERM>' to list known genes",
                    kind.noun()
                ));
            } else {
                message.push_str(&format!("\n\nDid you mean: {}?", suggestions.join(", ")));
            }
        }

        CliError::EmptyContainer { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Create the output directory first: {}\n\
                 • Pass a different --out location",
                path.parent().map(|p| p.display().to_string()).unwrap_or_default()
            ));
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your ibdx.toml configuration file\n\
                 • Use 'ibdx config --example' to generate a sample configuration\n\
                 • Verify that all configuration values are valid",
            );
        }

        CliError::InvalidArgument { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Model ids are cd45rb, acute_dss, chronic_dss, il10ko, human_uc and human_cd\n\
                 • Run 'ibdx --help' for the list of commands",
            );
        }

        _ => {}
    }

    message
}
