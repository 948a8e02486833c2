//! User API module

mod handler;

use axum::{Router, routing::{delete, post}};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::register))
        .route("/{id}", delete(handler::delete))
}
