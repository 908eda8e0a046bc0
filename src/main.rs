//! Caddyfile Manager
//!
//! Administrative HTTP service for one Caddyfile: view, edit,
//! snapshot-backed save and restore, and live reload through the Caddy
//! admin API.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌────────────────────────────────────────────────┐
//!                  │               CADDYFILE MANAGER                 │
//!                  │                                                 │
//!   API request    │  ┌────────┐    ┌────────────┐    ┌──────────┐  │
//!   ───────────────┼─▶│  http  │───▶│ lifecycle  │───▶│ storage  │  │
//!                  │  │ server │    │  manager   │    │ doc+snap │  │
//!                  │  └───┬────┘    └────────────┘    └──────────┘  │
//!                  │      │                                          │
//!                  │      ▼                                          │
//!                  │  ┌─────────┐                                    │     Caddy
//!                  │  │ gateway │────────────────────────────────────┼──▶  admin API
//!                  │  └─────────┘       POST /load, GET /config/     │
//!                  └────────────────────────────────────────────────┘
//! ```
//!
//! Every save or restore snapshots the current document before touching
//! it; a snapshot failure aborts the mutation.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use caddyfile_manager::config::loader::load_config;
use caddyfile_manager::http::HttpServer;
use caddyfile_manager::lifecycle::{signals, Shutdown};
use caddyfile_manager::observability::logging;

#[derive(Parser)]
#[command(name = "caddyfile-manager")]
#[command(about = "Snapshot-backed editor service for a Caddyfile", long_about = None)]
struct Args {
    /// Optional TOML configuration file; environment variables override it.
    #[arg(short, long, env = "CONFIG_PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        document_path = %config.document.path,
        admin_endpoint = %config.control_plane.admin_endpoint,
        timezone = %config.document.timezone,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        signals::wait_for_signal().await;
        tracing::info!("Shutdown signal received");
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
