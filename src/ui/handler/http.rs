//! HTTP API handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::infrastructure::dto::http::{HealthResponse, UserInfo, UsersResponse};
use crate::ui::state::AppState;

/// `GET /api/health` - liveness probe.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// `GET /api/users` - snapshot of the currently connected users.
pub async fn list_users(State(state): State<Arc<AppState>>) -> Json<UsersResponse> {
    let users: Vec<UserInfo> = state.registry.all().await.iter().map(UserInfo::from).collect();
    Json(UsersResponse {
        total_users: users.len(),
        users,
    })
}
