//! To-do List Server
//!
//! Serves the `/todo` API over a JSON file.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: `localhost`)
//! - `PORT`: Server port (default: `8080`)
//! - `TODO_FILE`: to-do JSON file (default: `todoServer.json`)
//! - `REQUEST_TIMEOUT_SECS`: deadline for receiving a request body (default: `10`)
//! - `LOG_FORMAT`: `pretty` (default) | `json`
//! - `RUST_LOG`: Logging level (e.g., `debug`, `todo_server=debug`)

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use todo_server::api::{AppState, create_router, with_middleware};
use todo_server::infrastructure::{FileTodoStore, LogFormat, ServerConfig, SharedTodoList};

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env();
    init_tracing(
        config
            .as_ref()
            .map_or_else(|_| LogFormat::default(), |config| config.log_format),
    );

    let config = match config {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "Configuration error");
            std::process::exit(1);
        }
    };

    tracing::info!(
        todo_file = %config.todo_file.display(),
        request_timeout = ?config.request_timeout,
        "Starting to-do server"
    );

    let store = Arc::new(FileTodoStore::new(config.todo_file.clone()));
    let state = AppState::new(SharedTodoList::new(store));
    let application = with_middleware(create_router(state), config.request_timeout);

    let address = config.bind_address();
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, "Failed to bind to address {}", address);
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(address) => tracing::info!("Listening on {}", address),
        Err(error) => tracing::warn!(%error, "Could not determine local address"),
    }

    if let Err(error) = axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%error, "Server error");
        std::process::exit(1);
    }

    tracing::info!("Server shutdown complete");
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "todo_server=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Completes on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
