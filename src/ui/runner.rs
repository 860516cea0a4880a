//! Server execution logic: composition root and router setup.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::common::time::SystemClock;
use crate::infrastructure::broadcaster::WebSocketBroadcaster;
use crate::infrastructure::registry::InMemorySessionRegistry;
use crate::usecase::ChatCoordinator;

use super::handler::{health_check, list_users, websocket_handler};
use super::signal::shutdown_signal;
use super::state::AppState;

/// Run the chat relay server.
///
/// # Arguments
///
/// * `host` - The host address to bind to (e.g., "127.0.0.1")
/// * `port` - The port number to bind to (e.g., 8080)
pub async fn run_server(host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    // Composition root: the registry and broadcaster are constructed once
    // and injected everywhere they are needed.
    let registry = Arc::new(InMemorySessionRegistry::new());
    let broadcaster = Arc::new(WebSocketBroadcaster::new());
    let coordinator = ChatCoordinator::new(
        registry.clone(),
        broadcaster.clone(),
        Arc::new(SystemClock),
    );

    let app_state = Arc::new(AppState {
        coordinator,
        registry,
        broadcaster,
    });

    let app = Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/users", get(list_users))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Chat relay server listening on {}", listener.local_addr()?);
    tracing::info!("Connect to: ws://{}/ws", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
