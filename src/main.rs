use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use http_exceptions::api::{create_router, AppStateInner};
use http_exceptions::config::Config;
use http_exceptions::downstream::DownstreamClient;
use http_exceptions::errors::{Dispatcher, TracingSink};
use http_exceptions::metrics;
use http_exceptions::operation::ForwardingOperation;

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Starting graceful shutdown...");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,http_exceptions=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting HTTP exceptions service v{}",
        env!("CARGO_PKG_VERSION")
    );

    metrics::registry::init_metrics();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded successfully");

    let downstream = DownstreamClient::new(&config.downstream)
        .context("Failed to initialize downstream client")?;

    let state = Arc::new(AppStateInner {
        operation: Arc::new(ForwardingOperation::new(downstream)),
        dispatcher: Dispatcher::new(Arc::new(TracingSink)),
    });

    let app = create_router(state);

    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind server")?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");

    Ok(())
}
