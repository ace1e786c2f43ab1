//! Error types for configuration loading and command execution.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Document is empty
    #[error("configuration document is empty")]
    Empty,

    /// Document is not valid YAML for the configuration schema
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Errors resolving or executing the target command.
#[derive(Error, Debug)]
pub enum ExecError {
    /// Neither the configuration nor the command line named a command
    #[error("no command provided, specify one in the configuration or as arguments")]
    NoCommand,

    /// Program could not be found or is not executable
    #[error("command not found: {0}")]
    NotFound(String),

    /// `execve` failed
    #[error("failed to execute {program}: {source}")]
    Exec {
        /// Program as given by the user
        program: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
