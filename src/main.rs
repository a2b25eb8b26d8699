//! Stream Gateway
//!
//! Resolves stable channel codes into tokenized CDN manifest locations and
//! proxies the manifest and its media segments back to clients.
//!
//! # Architecture Overview
//!
//! ```text
//!   GET /live/manifest/{channel}.mpd
//!        │
//!        ▼
//!   ┌──────────┐   ┌───────────┐   probe (no redirect follow)   ┌─────┐
//!   │ handlers │──▶│ resolver  │───────────────────────────────▶│ CDN │
//!   └──────────┘   └───────────┘◀── 302 Location: host/token ───└─────┘
//!        │               │
//!        │               ▼
//!        │          codec: encode host
//!        ▼
//!   302 → /live/{host}/{token}/{channel}.mpd
//!
//!   GET /live/{host}/{token}/{file}
//!        │
//!        ▼
//!   ┌──────────┐   ┌───────────┐   GET {host}/{token}{prefix}{file}   ┌─────┐
//!   │ handlers │──▶│  proxy    │─────────────────────────────────────▶│ CDN │
//!   └──────────┘   └───────────┘◀──────── streamed body ──────────────└─────┘
//!                        │
//!                        ▼
//!                 filtered headers + streamed body → client
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use stream_gateway::config::{load_config, GatewayConfig};
use stream_gateway::http::HttpServer;
use stream_gateway::lifecycle::{signals, startup, Shutdown};
use stream_gateway::net::tls::load_tls_config;
use stream_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "stream-gateway")]
#[command(about = "Redirect-and-proxy gateway for live DASH channels", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "STREAM_GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "stream-gateway starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_scheme = %config.upstream.scheme,
        directory = ?config.directory.backend,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let directory = startup::open_directory(&config.directory)?;
    let bind_address: SocketAddr = config.listener.bind_address.parse()?;
    let tls = config.listener.tls.clone();
    let server = HttpServer::new(config, directory)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        signal_shutdown.trigger();
    });

    match tls {
        Some(tls) => {
            let tls = load_tls_config(&tls).await?;
            server.run_tls(bind_address, tls, server_shutdown).await?;
        }
        None => {
            let listener = tokio::net::TcpListener::bind(bind_address).await?;
            server.run(listener, server_shutdown).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
