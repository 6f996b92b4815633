//! Chat Relay Backend
//!
//! A small HTTP relay between a front-end chat widget and a third-party
//! completion API. Prepends an experiment-variant system prompt to each
//! conversation and returns the model's reply.

use chat_relay_backend::config::Config;
use chat_relay_backend::startup::build_router;
use chat_relay_backend::state::AppState;
use chat_relay_backend::upstream::UpstreamClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Read .env before anything touches the environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!(
        host = %config.server.host,
        port = config.server.port,
        "Configuration loaded"
    );

    // The upstream client is built exactly once; an unset API key is
    // reported per request, not here
    if config.upstream.api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set; chat requests will fail");
    }
    let upstream = UpstreamClient::new(config.upstream.api_key.clone());
    let app_state = Arc::new(AppState::new(upstream));

    let app = build_router(app_state);

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Chat backend listening on http://{}", addr);

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
