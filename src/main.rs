//! Recipe server built on the `handle` response adapter.
//!
//! ```text
//!   request ─▶ axum Router ─▶ handle::with ─▶ pure handler ─▶ Response value
//!                                                                  │
//!   client ◀── headers, status, body ◀── IntoResponse ◀────────────┘
//!                                             │
//!                                             └─▶ hooks (bytes sent, error)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use handle::config::{load_config, ServerConfig};
use handle::lifecycle::{trigger_on_ctrl_c, Shutdown};
use handle::observability::logging::init_logging;
use handle::HttpServer;

#[derive(Parser)]
#[command(name = "bread-recipes")]
#[command(about = "Save and look up bread dough recipes", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overriding the config file
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    if !init_logging(&config.logging) {
        tracing::warn!("Tracing subscriber already installed, keeping it");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    trigger_on_ctrl_c(shutdown.clone());

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
