//! author-gate
//!
//! A small filtering gateway built with Tokio and Axum that disables the
//! author archive pages of the site behind it.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 AUTHOR GATE                   │
//!                      │                                               │
//!   Client Request     │  ┌─────────┐   ┌───────────┐   ┌──────────┐  │
//!   ──────────────────▶│  │  http   │──▶│   gate    │──▶│ upstream │──┼──▶ Origin
//!                      │  │ server  │   │ responder │   │ forward  │  │    Server
//!                      │  └─────────┘   └─────┬─────┘   └────┬─────┘  │
//!                      │                      │ short-       │        │
//!                      │                      │ circuit      ▼        │
//!   Client Response    │  ┌───────────────┐   │        ┌──────────┐   │
//!   ◀──────────────────┼──│ canonical /   │◀──┴────────│ response │   │
//!                      │  │ admin rewrite │            │          │   │
//!                      │  └───────────────┘            └──────────┘   │
//!                      │                                               │
//!                      │  config · observability · lifecycle           │
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! Requests matching an author archive (and not an admin/async/cron/API
//! context) never reach the origin; the gate responds directly and request
//! processing stops there.

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use author_gate::config::loader::load_config;
use author_gate::config::GatewayConfig;
use author_gate::lifecycle::Shutdown;
use author_gate::observability::logging;
use author_gate::HttpServer;

#[derive(Parser)]
#[command(name = "author-gate")]
#[command(about = "Filtering gateway that disables author archive pages", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address from the config file.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_level);

    tracing::info!("author-gate v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        gate_enabled = config.gate.enabled,
        status_code = config.gate.status_code,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
