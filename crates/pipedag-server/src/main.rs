//! pipedag server
//!
//! Entry point for the pipeline validation HTTP server.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// pipedag - pipeline DAG validation server
#[derive(Parser)]
#[command(name = "pipedag-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: pipedag.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind (overrides config and PIPEDAG_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides config and PIPEDAG_PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing for logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = pipedag_server::load_config(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    tracing::info!("Starting pipedag server");

    pipedag_server::serve(config).await?;

    Ok(())
}
