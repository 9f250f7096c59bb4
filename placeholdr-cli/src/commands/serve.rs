//! Serve command: run the placeholdr HTTP server in the foreground
//!
//! The server provides:
//! - `/img/:width/:height` placeholder images
//! - `/stats/*` usage reporting and reset
//! - `/api/health` and the embedded landing page

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use placeholdr_core::{HitBuckets, PlaceholderRenderer, StatsAggregator};
use placeholdr_server::{AppState, PlaceholdrServer, ServerConfig};
use tracing::info;

use crate::config::{ConfigLoader, PlaceholdrConfig};

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let (server_config, state) = build(&args, &config);

    info!(
        "Starting placeholdr server on {}:{}",
        server_config.host, server_config.port
    );

    let server = PlaceholdrServer::with_state(server_config, Arc::new(state));
    server.run().await.map_err(Into::into)
}

/// Resolve CLI flags over the loaded config into server config and state
fn build(args: &ServeArgs, config: &PlaceholdrConfig) -> (ServerConfig, AppState) {
    let server_config = ServerConfig::new(
        args.host.clone().unwrap_or_else(|| config.server.host.clone()),
        args.port.unwrap_or(config.server.port),
    );

    let buckets = HitBuckets::new(config.stats.hit_buckets_ms.iter().copied());
    let stats = Arc::new(StatsAggregator::with_buckets(buckets));
    let state = AppState::with_components(stats, Arc::new(PlaceholderRenderer::new()))
        .with_default_limit(config.stats.default_limit);

    (server_config, state)
}
