use anyhow::Context;
use clap::Parser;

use lawgenie::infrastructure::observability::{TracingConfig, init_tracing};
use lawgenie::presentation::{Cli, Environment, Settings, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));

    run(cli.command, &settings).await
}
