//! cinedash-web - Movie dashboard service
//!
//! Serves a single-page dashboard over the `movies` table of a read-only
//! SQLite store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cinedash_common::config::{ConfigOverrides, DashboardConfig};
use cinedash_web::{build_router, db, AppState};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for cinedash-web
#[derive(Parser, Debug)]
#[command(name = "cinedash-web")]
#[command(about = "Interactive movie dashboard")]
#[command(version)]
struct Args {
    /// Store connection string, e.g. sqlite://movies.db
    #[arg(short, long)]
    database_url: Option<String>,

    /// Host to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// TOML config file
    #[arg(short, long, env = "CINEDASH_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = DashboardConfig::resolve(ConfigOverrides {
        database_url: args.database_url,
        host: args.host,
        port: args.port,
        config_path: args.config,
    })
    .context("Failed to resolve configuration")?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{},tower_http={}", config.log_level, config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CineDash v{}", env!("CARGO_PKG_VERSION"));
    info!("Database: {}", config.database_url);

    let pool = match db::connect_readonly(&config.database_url).await {
        Ok(pool) => {
            info!("✓ Connected to movie store (read-only)");
            pool
        }
        Err(e) => {
            error!("Failed to connect to movie store: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(pool);

    // Warm the cache so the first page load does not wait on the query
    if let Err(e) = state.cache.get_or_load().await {
        warn!("Initial movie load failed, will retry on first request: {}", e);
    }

    let app = build_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("cinedash-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
