//! Order Models

use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// Any status is reachable from any other; the server records every change
/// in `order_status_history` but does not enforce a transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    Created,
    Collected,
    InStation,
    InRoute,
    Delivered,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Created
    }
}

/// Shipment order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub origin_address_id: i64,
    pub destination_address_id: i64,
    pub package_type_id: i64,
    pub quantity: i64,
    pub actual_weight_kg: f64,
    pub status: OrderStatus,
    pub customer_id: i64,
    pub created_by: i64,
    pub updated_by: Option<i64>,
    pub observations: Option<String>,
    pub internal_notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create order payload
///
/// Customer and creator ids come from the authenticated request, not from
/// the body. Missing numeric fields deserialize to 0 and fail validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub origin_address_id: i64,
    #[serde(default)]
    pub destination_address_id: i64,
    #[serde(default)]
    pub package_type_id: i64,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub actual_weight_kg: f64,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default)]
    pub internal_notes: Option<String>,
}

/// One row per status change, append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderStatusHistory {
    pub id: i64,
    pub order_id: i64,
    pub previous_status: Option<OrderStatus>,
    pub new_status: OrderStatus,
    pub changed_at: i64,
    pub changed_by: i64,
    pub notes: Option<String>,
}

/// Order listing projection with joined customer/address/package info
///
/// `created_at` is formatted as DD/MM/YYYY; origin/destination are
/// concatenated into single display strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListItem {
    pub id: i64,
    pub order_number: String,
    pub created_at: String,
    pub full_name: String,
    pub origin_full_address: String,
    pub destination_full_address: String,
    pub quantity: i64,
    pub actual_weight_kg: f64,
    pub size_code: super::PackageSize,
    pub status: OrderStatus,
}

/// Detailed order view with joined customer, addresses and package type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderDetail {
    pub id: i64,
    pub order_number: String,
    pub created_at: i64,
    pub user_id: i64,
    pub full_name: String,
    pub origin_address_id: i64,
    pub ao_street: String,
    pub ao_exterior: Option<String>,
    pub ao_neighborhood: Option<String>,
    pub ao_city: String,
    pub ao_postal: Option<String>,
    pub destination_address_id: i64,
    pub ad_street: String,
    pub ad_exterior: Option<String>,
    pub ad_neighborhood: Option<String>,
    pub ad_city: String,
    pub ad_postal: Option<String>,
    pub quantity: i64,
    pub actual_weight_kg: f64,
    pub package_type_id: i64,
    pub size_code: super::PackageSize,
    pub observations: Option<String>,
    pub internal_notes: Option<String>,
    pub updated_at: i64,
    pub status: OrderStatus,
}
