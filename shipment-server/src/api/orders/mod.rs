//! Order API module

mod handler;

use axum::{Router, middleware, routing::{get, patch, post}};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let user_routes = Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/summary", get(handler::summary))
        .route("/{id}", get(handler::detail))
        .route("/{id}/history", get(handler::history));

    // status transitions are staff operations
    let admin_routes = Router::new()
        .route("/{id}/status", patch(handler::update_status))
        .layer(middleware::from_fn(require_admin));

    user_routes.merge(admin_routes)
}
