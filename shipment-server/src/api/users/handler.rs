//! User API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok};
use shared::models::{User, UserCreate};

/// POST /api/users - register a new account (public)
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    let user = state.users.register(payload).await?;
    Ok(Json(user))
}

/// DELETE /api/users/:id - delete an account (admin or the owner)
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    if !current_user.is_admin() && current_user.id != id {
        return Err(AppError::forbidden("cannot delete another user's account"));
    }
    state.users.delete(id).await?;
    Ok(ok(()))
}
