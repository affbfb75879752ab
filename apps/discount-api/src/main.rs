//! # Discount API Server
//!
//! Loads configuration, opens the catalog, and serves HTTP until Ctrl+C or
//! SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use discount_api::config::ApiConfig;
use discount_api::{build_router, AppState};
use discount_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration first: it carries the fallback log filter
    let config = ApiConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_target(true)
        .init();

    info!("Starting Discount API server...");
    info!(
        port = config.port,
        database_path = %config.database_path,
        max_connections = config.max_connections,
        cors_permissive = config.cors_permissive,
        "Configuration loaded"
    );

    let db_config = DbConfig::new(&config.database_path).max_connections(config.max_connections);
    let db = Database::new(db_config)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database_path))?;

    let rule_count = db.discounts().count().await?;
    info!(rules = rule_count, "Catalog ready");

    let addr = config.listen_addr();
    let state = Arc::new(AppState::new(db.clone(), config));
    let app = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
