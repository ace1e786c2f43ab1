//! The fetch-then-exec pipeline.

use crate::config::Config;
use crate::environment::{Environment, build_environment};
use crate::error::ExecError;
use crate::exec::{replace_process, resolve_command, resolve_executable};
use anyhow::Context;
use secrecy::ExposeSecret;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::info;
use vaulter_vault::VaultClient;

/// Everything needed to replace the current process.
#[derive(Debug)]
pub struct Launch {
    /// Resolved program path
    pub executable: PathBuf,
    /// Full argument vector, `argv[0]` included
    pub argv: Vec<String>,
    /// Environment for the new process
    pub environment: Environment,
}

impl Launch {
    /// Replace the current process. Only returns on failure.
    #[must_use]
    pub fn exec(&self) -> ExecError {
        replace_process(&self.executable, &self.argv, &self.environment)
    }
}

/// Log in, read every secret and prepare the command.
///
/// `cli_command` overrides the configured command when non-empty. `base` is
/// the environment the secrets are added to, `path_var` the search path for
/// the program.
pub async fn prepare(
    config: &Config,
    cli_command: &[String],
    base: Environment,
    path_var: Option<OsString>,
) -> anyhow::Result<Launch> {
    let argv = resolve_command(&config.command, cli_command)?;

    let mut client = VaultClient::new(config.vault_config(), config.approle())
        .context("could not create Vault client")?;
    if !config.token.expose_secret().is_empty() {
        client = client.with_token(config.token.clone());
    }

    client.login().await.context("authentication error")?;

    let names = client.list_secrets().await.context("error listing secrets")?;

    let mut secrets = vaulter_vault::Secrets::new();
    for name in names {
        let data = client
            .get_secret(&name)
            .await
            .with_context(|| format!("error getting secret {name}"))?;
        secrets.insert(name, data);
    }
    info!(count = secrets.len(), "Fetched secrets");

    let environment = build_environment(base, &secrets, config);

    let program = argv.first().ok_or(ExecError::NoCommand)?;
    let executable = resolve_executable(program, path_var.as_deref())?;

    Ok(Launch {
        executable,
        argv,
        environment,
    })
}
