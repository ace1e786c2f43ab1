use anyhow::Context;
use clap::Parser;
use tracing::info;
use vaulter::{Config, Environment, cli::Cli};
use vaulter_common::init_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.tracing_config());

    let config = Config::load(&cli.config).context("could not load config")?;

    let launch = vaulter::prepare(
        &config,
        &cli.command,
        Environment::inherit(),
        std::env::var_os("PATH"),
    )
    .await?;

    info!(executable = %launch.executable.display(), "Executing command");

    Err(anyhow::Error::new(launch.exec()))
}
