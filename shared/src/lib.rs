//! Shared types for the shipment platform
//!
//! Domain models and utility types used by the server and by API clients.
//! DB row types derive `sqlx::FromRow` behind the `db` feature so frontend
//! consumers can depend on this crate without pulling in sqlx.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
