//! msglog CLI: record and query log messages. Config from env and optional CLI args.

use anyhow::{Context, Result};
use clap::Parser;
use msglog_cli::{execute, Cli, Repositories};
use msglog_core::{init_tracing, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.database_url.clone())?;
    init_tracing(&config.log_file).context("Initialize logging (check LOG_FILE)")?;

    let repos = Repositories::open(&config.database_url)
        .await
        .with_context(|| format!("Open database {}", config.database_url))?;

    let mut stdout = std::io::stdout().lock();
    execute(cli.command, &repos, config.page_size, &mut stdout).await
}
