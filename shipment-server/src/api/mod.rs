//! API routing module
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`auth`] - login
//! - [`users`] - registration and account management
//! - [`package_types`] - package classification listing and toggles
//! - [`addresses`] - address management
//! - [`orders`] - order creation, listing and status transitions

pub mod addresses;
pub mod auth;
pub mod health;
pub mod orders;
pub mod package_types;
pub mod users;

use axum::{Router, middleware};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Build the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(users::router())
        .merge(package_types::router())
        .merge(addresses::router())
        .merge(orders::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
