//! Package Type Model

use serde::{Deserialize, Serialize};

/// Package size classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
pub enum PackageSize {
    S,
    M,
    L,
    Xl,
}

/// Package classification with its weight limit
///
/// Read-mostly; served to order validation through an in-process TTL cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PackageType {
    pub id: i64,
    pub size_code: PackageSize,
    pub max_weight_kg: f64,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
}
