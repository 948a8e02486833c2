//! Authentication Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::User;

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// POST /api/auth/login - authenticate and issue a JWT
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state.users.authenticate(&req.email, &req.password).await?;

    let token = state.jwt.generate_token(user.id, user.role)?;

    tracing::info!(user_id = user.id, role = ?user.role, "User logged in");

    Ok(Json(LoginResponse { token, user }))
}
