//! `mailcraft serve`: run the HTTP API in the foreground.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use mailcraft_core::catalog::CatalogStore;
use mailcraft_core::config::load_config;
use mailcraft_web::{build_router, serve, AppState};

use crate::helpers;

pub async fn run(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = load_config(None);
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let generator = helpers::build_generator(&config)?;
    let default_provider = config.generation.default_provider.clone();
    if generator.registry().resolve(&default_provider).is_err() {
        warn!(
            provider = %default_provider,
            "Default provider is not registered; requests must name one"
        );
    }

    let catalog_path = helpers::catalog_path(&config);
    let catalog = CatalogStore::open(&catalog_path)
        .with_context(|| format!("failed to open catalog {}", catalog_path.display()))?;

    let state = AppState {
        generator,
        catalog: Arc::new(catalog),
        default_provider,
    };

    let addr = resolve_bind_addr(&config.server.host, config.server.port).await?;

    info!(
        catalog = %catalog_path.display(),
        default_provider = %state.default_provider,
        "Mailcraft server starting"
    );
    serve(build_router(state), addr)
        .await
        .context("HTTP server failed")
}

/// Resolve `host:port` to the first matching socket address. Accepts IP
/// literals and hostnames.
async fn resolve_bind_addr(host: &str, port: u16) -> Result<SocketAddr> {
    tokio::net::lookup_host((host, port))
        .await
        .with_context(|| format!("cannot resolve bind address {host}:{port}"))?
        .next()
        .with_context(|| format!("no address found for {host}:{port}"))
}
