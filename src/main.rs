//! Edge router binary.
//!
//! ```text
//!                        ┌──────────────────────── edge-router ────────────────────────┐
//!   Client Request       │  ┌────────────┐   ┌─────────┐   ┌──────────────┐            │
//!   ─────────────────────┼─▶│ request-id │──▶│  trace  │──▶│  EdgeRouter  │            │
//!                        │  └────────────┘   └─────────┘   └──────┬───────┘            │
//!                        │                                        │ classify           │
//!                        │         ┌──────────────┬───────────────┼──────────────┐     │
//!                        │         ▼              ▼               ▼              ▼     │
//!                        │    preflight 204   health 200     api proxy     static / 404│
//!                        │                                        │                    │
//!                        └────────────────────────────────────────┼────────────────────┘
//!                                                                 ▼
//!                                                           backend origin
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use edge_router::config::load_config;
use edge_router::lifecycle::signals::wait_for_signal;
use edge_router::observability::{logging, metrics};
use edge_router::{EdgeServer, Shutdown};

#[derive(Parser)]
#[command(name = "edge-router")]
#[command(about = "CORS-aware edge router in front of an API backend and static assets", long_about = None)]
struct Args {
    /// TOML configuration file. Without it, defaults plus EDGE_ROUTER_* variables apply.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability);
    tracing::info!("edge-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend = %config.backend.origin,
        allow_origin = %config.cors.allow_origin,
        mode = ?config.fallback.mode,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = EdgeServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
