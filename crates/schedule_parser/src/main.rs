use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use schedule_parser::config::ServerConfig;
use schedule_parser::server::create_router;
use schedule_parser::types::AppState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Environment variable consulted when no config path is passed on the command line
const CONFIG_ENV_VAR: &str = "SCHEDULE_PARSER_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match config_path() {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ServerConfig::load_from_file(&path)
                .with_context(|| format!("failed to load config from {}", path.display()))?
        }
        None => {
            info!("No configuration file given, using defaults");
            ServerConfig::default()
        }
    };

    let address = config.socket_addr();
    let state = Arc::new(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!("Schedule parser listening on http://{address}");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

/// Config path from the first argument, else from the environment.
fn config_path() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, run until the process is killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
