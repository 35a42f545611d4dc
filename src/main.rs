use anyhow::Result;
use clap::Parser;
use pocket_nodes::{cli, config};

use tracing_subscriber::{fmt, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // stdout carries the node's reply
        .with_target(true)
        .with_line_number(true)
        .compact()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();

    tracing::debug!("logger initialized");

    let cli = cli::Cli::parse();
    let config = config::Config::load(cli.config_path.as_deref())?;
    cli.run(config).await
}
