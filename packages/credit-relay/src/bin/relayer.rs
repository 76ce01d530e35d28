//! Credit relay binary.

use credit_relay::{create_router, AppState, Config};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting credit relay");

    let config = match Config::load().and_then(|c| c.validate().map(|()| c)) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "FATAL: Config error, fix env vars or credit-relay.toml");
            std::process::exit(1);
        }
    };

    info!(upstream = %config.upstream_base_url, timeout_ms = config.upstream_timeout_ms, "Configuration loaded");

    let bind_address = config.bind_address.clone();
    let state = Arc::new(AppState::new(config)?);
    let shutdown = state.shutdown.clone();

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, "Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // Abort upstream calls still in flight.
            shutdown.cancel();
        })
        .await?;

    info!("Credit relay shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
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
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
