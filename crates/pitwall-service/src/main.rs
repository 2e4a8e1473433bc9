//! Pitwall league service daemon (pitwalld)

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use pitwall_service::{ServiceConfig, init_tracing, serve};
use tracing::info;

/// Racing league standings and results service
#[derive(Debug, Parser)]
#[command(name = "pitwalld", version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ServiceConfig::load(cli.config.as_deref()).await?;
    init_tracing(&config.log_filter)?;
    config.validate();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %config.store.data_dir.display(),
        editors = config.editors.len(),
        "Starting pitwalld"
    );

    serve(config).await
}
