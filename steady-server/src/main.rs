//! Server entry point for steady

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;

use steady_core::config::ConfigLoader;
use steady_core::logging::init_logging;
use steady_core::persona::{ChatParams, SessionRegistry};
use steady_providers::OpenAiClient;
use steady_server::{run_server, AppState};

#[derive(Parser)]
#[command(name = "steady-server")]
#[command(about = "Persona-scoped recovery companion chat backend")]
#[command(version)]
struct Cli {
    /// Configuration directory
    #[arg(short, long)]
    config_dir: Option<PathBuf>,

    /// Override the configured listen port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loader = match cli.config_dir {
        Some(dir) => ConfigLoader::with_dir(dir),
        None => ConfigLoader::new(),
    };
    let config = loader.load().context("failed to load configuration")?;

    let _guard = init_logging(&config.logging);
    info!("Configuration loaded from {:?}", loader.config_dir());

    let api_key = if config.provider.api_key.trim().is_empty() {
        None
    } else {
        Some(config.provider.api_key.clone())
    };
    let provider = Arc::new(OpenAiClient::new(
        api_key,
        config.provider.api_base.clone(),
        config.provider.model.clone(),
        config.provider.extra_headers.clone(),
    ));

    let registry = Arc::new(SessionRegistry::new(
        config.personas.workspace_path(),
        provider,
        ChatParams::from(&config.provider),
    ));
    let state = AppState { registry };

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, shutting down");
            let _ = shutdown_tx.send(());
        }
    });

    let port = cli.port.unwrap_or(config.server.port);
    run_server(state, &config.server.host, port, shutdown_rx).await
}
