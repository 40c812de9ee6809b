//! CLI error handling.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use glossa_config::ConfigError;
use glossa_i18n::I18nError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    I18n(#[from] I18nError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{message}")]
    Validation { message: String },

    #[error("{problems} problem(s) found in catalogs")]
    CheckFailed { problems: usize },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "E001",
            Self::Io { .. } => "E002",
            Self::I18n(_) => "E003",
            Self::Validation { .. } => "E004",
            Self::CheckFailed { .. } => "E005",
            Self::Other(_) => "E999",
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        let code = match self {
            Self::Config(_) => 2,
            Self::Io { .. } => 3,
            Self::I18n(_) => 4,
            Self::Validation { .. } => 5,
            Self::CheckFailed { .. } => 6,
            Self::Other(_) => 1,
        };
        ExitCode::from(code)
    }
}
