//! Run a command with secrets from Vault in its environment.
//!
//! vaulter logs in to Vault with an AppRole, reads every secret stored under
//! the role's path, exports each field as an environment variable and then
//! replaces itself with the configured command.
//!
//! Process replacement uses `execve`, so the crate targets Unix only.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod exec;
pub mod runner;

pub use config::Config;
pub use environment::{Environment, build_environment};
pub use error::{ConfigError, ExecError};
pub use runner::{Launch, prepare};
