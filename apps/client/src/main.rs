mod api_client;
mod cli;
mod components;
mod config;
mod errors;
mod models;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Args;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Environment first, then command-line overrides
    let config = cli::apply_overrides(Config::from_env()?, &args)?;

    // Structured logging on stderr; stdout carries the rendered views
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting ATS resume compiler client v{}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = cli::dispatch(args, config).await {
        error!("{err:#}");
        std::process::exit(1);
    }

    Ok(())
}
