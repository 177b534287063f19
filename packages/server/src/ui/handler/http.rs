//! Operational HTTP endpoints.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::RoomOccupancyDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Live relay rooms and their member counts
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomOccupancyDto>> {
    let rooms = state.registry.rooms().await;
    Json(rooms.into_iter().map(RoomOccupancyDto::from).collect())
}
