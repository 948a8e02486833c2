//! Order API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};
use shared::models::{Order, OrderCreate, OrderDetail, OrderListItem, OrderStatus, OrderStatusHistory};

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub all: Option<String>,
}

#[derive(Deserialize)]
pub struct StatusPayload {
    pub status: OrderStatus,
}

/// POST /api/orders - create an order for the authenticated customer
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders
        .create(current_user.id, current_user.id, payload)
        .await?;
    Ok(Json(order))
}

/// GET /api/orders - own orders; admins may pass `?all=1` for every order
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = if current_user.is_admin() && query.all.as_deref() == Some("1") {
        state.orders.find_all().await?
    } else {
        state.orders.find_by_customer(current_user.id).await?
    };
    Ok(Json(orders))
}

/// GET /api/orders/summary - joined listing with addresses and customer name
pub async fn summary(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderListItem>>> {
    let items = state
        .orders
        .list_items(
            current_user.id,
            current_user.is_admin(),
            query.all.as_deref() == Some("1"),
        )
        .await?;
    Ok(Json(items))
}

/// GET /api/orders/:id - joined detail view
pub async fn detail(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state
        .orders
        .detail(current_user.id, current_user.is_admin(), id)
        .await?;
    Ok(Json(detail))
}

/// GET /api/orders/:id/history - status ledger rows for one order
pub async fn history(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<OrderStatusHistory>>> {
    let rows = state
        .orders
        .history(current_user.id, current_user.is_admin(), id)
        .await?;
    Ok(Json(rows))
}

/// PATCH /api/orders/:id/status - transition an order (admin only)
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<StatusPayload>,
) -> AppResult<Json<AppResponse<()>>> {
    state
        .orders
        .update_status(id, payload.status, current_user.id)
        .await?;
    Ok(ok(()))
}
