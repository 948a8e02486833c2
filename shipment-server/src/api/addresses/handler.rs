//! Address API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};
use shared::models::{Address, AddressRequest, Coordinates};

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub all: Option<String>,
    #[serde(default)]
    pub include_inactive: Option<String>,
}

#[derive(Deserialize)]
pub struct ActivePayload {
    pub active: bool,
}

/// Address response with the coordinate row it owns (when any)
#[derive(Serialize)]
pub struct AddressResponse {
    #[serde(flatten)]
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// POST /api/addresses - create an address for the authenticated customer
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<AddressRequest>,
) -> AppResult<Json<AddressResponse>> {
    let (address, coordinates) = state.addresses.create(current_user.id, payload).await?;
    Ok(Json(AddressResponse {
        address,
        coordinates,
    }))
}

/// GET /api/addresses - scoped listing
///
/// Admins may pass `?all=1` for every customer's addresses and
/// `?include_inactive=1` to include deactivated rows.
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Address>>> {
    let all = query.all.as_deref() == Some("1");
    let include_inactive = query.include_inactive.as_deref() == Some("1");
    let list = state
        .addresses
        .list(current_user.id, current_user.role, include_inactive, all)
        .await?;
    Ok(Json(list))
}

/// GET /api/addresses/:id - scoped single read
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Address>> {
    let address = state
        .addresses
        .get(current_user.id, current_user.is_admin(), id)
        .await?;
    Ok(Json(address))
}

/// PUT /api/addresses/:id - update an address and its coordinate
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<AddressRequest>,
) -> AppResult<Json<AddressResponse>> {
    let (address, coordinates) = state
        .addresses
        .update(current_user.id, current_user.is_admin(), id, payload)
        .await?;
    Ok(Json(AddressResponse {
        address,
        coordinates,
    }))
}

/// DELETE /api/addresses/:id - delete when no order references it
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<()>>> {
    state
        .addresses
        .delete(current_user.id, current_user.is_admin(), id)
        .await?;
    Ok(ok(()))
}

/// PATCH /api/addresses/:id/active - toggle the active flag
pub async fn set_active(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<ActivePayload>,
) -> AppResult<Json<AppResponse<()>>> {
    state
        .addresses
        .toggle_active(current_user.id, current_user.is_admin(), id, payload.active)
        .await?;
    Ok(ok(()))
}
