//! Package Type API module

mod handler;

use axum::{Router, middleware, routing::{get, patch}};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/package-types", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new().route("/", get(handler::list));

    // toggling a classification is admin-only
    let manage_routes = Router::new()
        .route("/{id}/active", patch(handler::set_active))
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(manage_routes)
}
