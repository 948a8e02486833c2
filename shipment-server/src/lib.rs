//! Shipment Server - order lifecycle backend for a logistics operation
//!
//! # Module structure
//!
//! ```text
//! shipment-server/src/
//! ├── core/          # configuration, state, server lifecycle
//! ├── auth/          # JWT authentication, Argon2 hashing, middleware
//! ├── services/      # order lifecycle, addresses, package type cache, users
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool and repositories
//! └── utils/         # errors, logging
//! ```
//!
//! Orders move through created → collected → in_station → in_route →
//! delivered (or cancelled); every status change is appended to an
//! append-only history ledger in the same transaction as the update.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger setup
pub use utils::logger::init_logger;
