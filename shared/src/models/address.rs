//! Address and Coordinates Models

use serde::{Deserialize, Serialize};

/// Geographic point, exclusively owned by at most one address
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Coordinates {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: i64,
}

/// Postal address entity, owned by a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Address {
    pub id: i64,
    pub customer_id: i64,
    pub street: String,
    pub exterior_number: Option<String>,
    pub interior_number: Option<String>,
    pub neighborhood: Option<String>,
    pub postal_code: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub coordinate_id: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Coordinate payload nested in address create/update requests
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoordinatesRequest {
    pub latitude: f64,
    pub longitude: f64,
}

/// Address create/update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressRequest {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub exterior_number: Option<String>,
    #[serde(default)]
    pub interior_number: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub coordinates: Option<CoordinatesRequest>,
}
