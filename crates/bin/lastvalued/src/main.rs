//! # lastvalued — last-value dashboard daemon
//!
//! Composition root that wires the `SQLite` store to the HTTP adapter and
//! starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Locate the `last_value` store and configure read-only sessions
//! - Build the machine/element registry
//! - Construct the application service, injecting the store via port traits
//! - Build the axum router, injecting the service
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use lastvalue_adapter_http_axum::state::{AppState, DashboardSettings};
use lastvalue_adapter_storage_sqlite_sqlx::Config as StoreConfig;
use lastvalue_app::services::last_value_service::LastValueService;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Registry
    let registry = Arc::new(config.registry.build()?);

    // Store
    let cwd = std::env::current_dir()?;
    let store = StoreConfig {
        path: config.store_path(&cwd),
        busy_timeout: config.busy_timeout(),
        zone: config.display.timezone,
    }
    .build();
    if store.path().is_file() {
        tracing::info!(path = %store.path().display(), "using store");
    } else {
        tracing::warn!(path = %store.path().display(), "store not found, requests will fail until it appears");
    }

    // Service
    let service = LastValueService::new(registry, store);

    // HTTP
    let settings = DashboardSettings {
        refresh_seconds: config.dashboard.refresh_seconds,
        static_dir: Some(cwd.join(&config.dashboard.static_dir)),
    };
    let app = lastvalue_adapter_http_axum::router::build(AppState::new(service, settings));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "lastvalued listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("lastvalued stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
