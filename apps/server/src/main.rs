//! InventoryPro server entry point.

use anyhow::Context;
use inventory_db::{Database, DbConfig};
use inventory_server::{build_router, AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting InventoryPro server...");

    let config = ServerConfig::load().context("loading configuration")?;
    let addr = config.socket_addr()?;
    info!(
        %addr,
        database = %config.database_path.display(),
        storage = %config.storage_root.display(),
        "Configuration loaded"
    );

    if let Some(parent) = config.database_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    tokio::fs::create_dir_all(&config.storage_root)
        .await
        .with_context(|| format!("creating {}", config.storage_root.display()))?;

    let db = Database::new(DbConfig::new(&config.database_path))
        .await
        .context("opening database")?;
    info!("Database ready");

    let state = AppState::new(config, db.clone()).await;
    let app = build_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// `RUST_LOG` wins; otherwise info, with debug for the inventory crates.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,inventory=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
