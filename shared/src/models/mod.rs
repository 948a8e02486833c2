//! Data models
//!
//! Shared between shipment-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod address;
pub mod order;
pub mod package_type;
pub mod user;

// Re-exports
pub use address::*;
pub use order::*;
pub use package_type::*;
pub use user::*;
