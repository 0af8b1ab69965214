use anyhow::Context;
use clap::Parser;
use folio::kernel::config::load_folio_config;
use folio_logger::Logger;
use folio_shell::{Cli, SessionOptions};
use std::time::Duration;
use tracing::info;

/// Latency of every simulated module fetch.
const FETCH_LATENCY: Duration = Duration::from_millis(120);

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        load_folio_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    if let Some(directory) = &cli.log_dir {
        config.logging.directory = Some(directory.clone());
    }
    if cli.json_logs {
        config.logging.json = true;
    }

    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).with_config(&config.logging)?.init()?;

    config.environment = cli.environment(&config.environment);
    let projects = cli
        .projects
        .as_deref()
        .map(std::fs::read_to_string)
        .transpose()
        .context("Failed to read the project catalog")?;

    let report = folio_shell::run(
        config,
        SessionOptions {
            failing: cli.fail.clone(),
            latency: FETCH_LATENCY,
            resize_to: cli.resize_to,
            projects,
        },
    )
    .await?;

    info!(?report, "Session finished");
    Ok(())
}
