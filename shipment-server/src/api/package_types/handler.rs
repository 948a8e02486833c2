//! Package Type API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};
use shared::models::PackageType;

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub all: Option<String>,
}

#[derive(Deserialize)]
pub struct ActivePayload {
    pub active: bool,
}

/// GET /api/package-types - list classifications
///
/// Admins may pass `?all=1` to include inactive types.
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<PackageType>>> {
    let include_inactive = current_user.is_admin() && query.all.as_deref() == Some("1");
    let types = state.package_types.list(include_inactive).await?;
    Ok(Json(types))
}

/// PATCH /api/package-types/:id/active - toggle the active flag
///
/// Invalidates the weight-limit cache on this instance.
pub async fn set_active(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ActivePayload>,
) -> AppResult<Json<AppResponse<()>>> {
    state.package_types.toggle_active(id, payload.active).await?;
    Ok(ok(()))
}
