//! # devhubd — devhub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise logging
//! - Open the `SQLite` registry and run migrations
//! - Build the upstream HTTP clients
//! - Construct application services, injecting adapters via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT), then close the registry
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use devhub_adapter_http_axum::state::AppState;
use devhub_adapter_storage_sqlite_sqlx::Config as StorageConfig;
use devhub_adapter_upstream_reqwest::Upstream;
use devhub_app::command_adapter::AdapterSet;
use devhub_app::services::{CommandRouter, DeviceService, Enricher, TelemetryEmitter};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Registry
    let db = StorageConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let device_repo = db.device_repository();

    // Upstream clients
    let Upstream {
        light,
        temperature,
        telemetry,
    } = config.upstream.build()?;

    // Services
    let device_service = DeviceService::new(
        device_repo.clone(),
        Enricher::new(light.clone(), temperature.clone()),
        TelemetryEmitter::new(telemetry.clone()),
    );
    let command_router = CommandRouter::new(
        device_repo,
        AdapterSet::new(light, temperature),
        TelemetryEmitter::new(telemetry),
    );

    // HTTP
    let state = AppState::new(device_service, command_router);
    let app = devhub_adapter_http_axum::router::build(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "devhubd listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    db.close().await;
    tracing::info!("registry closed, bye");

    served?;
    Ok(())
}

/// Resolve once SIGINT or SIGTERM is received.
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
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown requested");
}
