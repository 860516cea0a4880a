//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response for `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// One connected user in the `GET /api/users` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub display_name: String,
    pub connection_id: String,
    pub connected_at: String,
    pub online: bool,
}

/// Response for `GET /api/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersResponse {
    pub total_users: usize,
    pub users: Vec<UserInfo>,
}
