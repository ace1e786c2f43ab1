//! Command line interface.

use clap::Parser;
use std::path::PathBuf;
use vaulter_common::TracingConfig;

/// Run a command with secrets from Vault exported into its environment.
#[derive(Debug, Parser)]
#[command(name = "vaulter", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE", default_value = "vaulter.yaml")]
    pub config: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "VAULTER_LOG", default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Command to run instead of the configured one
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// Tracing settings requested on the command line.
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        let config = TracingConfig::default().with_log_level(&self.log_level);
        if self.json_logs {
            config.with_json_output()
        } else {
            config
        }
    }
}
