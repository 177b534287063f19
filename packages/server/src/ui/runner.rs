//! Router assembly and the server loop.

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::ServerConfig,
    error::{ConfigError, ServerError},
};

use super::{handler, signal::shutdown_signal, state::AppState};

/// CORS rules: only the configured site may call the API, with credentials
fn cors_layer(config: &ServerConfig) -> Result<CorsLayer, ConfigError> {
    let cors = CorsLayer::new()
        .allow_methods([Method::PUT, Method::PATCH, Method::DELETE, Method::GET])
        .allow_headers([header::ORIGIN])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true);

    Ok(match config.cors_origin()? {
        Some(origin) => cors.allow_origin(origin),
        None => cors,
    })
}

/// Build the application router over `state`
pub fn build_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        // Student records
        .route("/all", get(handler::list_students))
        .route("/new", post(handler::create_student))
        .route("/delete/{time}", delete(handler::delete_student))
        .route("/update/{time}", put(handler::update_student))
        // Operational endpoints
        .route("/api/health", get(handler::health_check))
        .route("/api/rooms", get(handler::get_rooms))
        // Relay
        .route("/ws", get(handler::websocket_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the application with fresh in-memory state
pub fn build_app(config: &ServerConfig) -> Result<Router, ConfigError> {
    let state = Arc::new(AppState::in_memory(config.send_queue_capacity));
    Ok(build_router(state, cors_layer(config)?))
}

/// Bind, serve and wait for a shutdown signal
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let app = build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    match &config.site_url {
        Some(site) => tracing::info!("CORS origin: {}", site),
        None => tracing::warn!("SITE_URL is not set; cross-origin requests will be refused"),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
