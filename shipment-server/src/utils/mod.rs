//! Utility module - common helpers and types
//!
//! # Contents
//!
//! - [`AppError`] / [`AppResponse`] - application error and response types
//! - [`AppResult`] - handler/service result alias
//! - logger setup

pub mod error;
pub mod logger;

pub use error::{AppError, AppResponse, ok};

/// Application-level Result type
///
/// Used in HTTP handlers and application logic
pub type AppResult<T> = Result<T, AppError>;
