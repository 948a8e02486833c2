//! Order Service
//!
//! Owns the order creation validation pipeline and status transitions.
//! Creation validates structural fields and the declared weight (through the
//! package type cache) before the single persistence write; status changes
//! go through the transactional repository update that also appends the
//! history row.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::db::repository::order;
use crate::services::PackageTypeService;
use crate::utils::{AppError, AppResult};
use shared::models::{Order, OrderCreate, OrderDetail, OrderListItem, OrderStatus, OrderStatusHistory};

fn generate_order_number(t: DateTime<Utc>) -> String {
    let nanos = t.timestamp_nanos_opt().unwrap_or_default();
    format!("ORD-{}-{}", t.format("%Y%m%d"), nanos % 1_000_000)
}

/// Order creation and lifecycle transitions
#[derive(Clone)]
pub struct OrderService {
    pool: SqlitePool,
    package_types: Option<PackageTypeService>,
}

impl OrderService {
    /// `package_types = None` skips weight validation entirely
    pub fn new(pool: SqlitePool, package_types: Option<PackageTypeService>) -> Self {
        Self {
            pool,
            package_types,
        }
    }

    /// Validate and persist a new order
    ///
    /// The checks run in a fixed sequence and the first failure wins. Order
    /// number collisions are not checked here; two orders generated in the
    /// same nanosecond surface as a uniqueness-constraint conflict from the
    /// insert.
    pub async fn create(
        &self,
        customer_id: i64,
        created_by: i64,
        data: OrderCreate,
    ) -> AppResult<Order> {
        if data.quantity <= 0 {
            return Err(AppError::validation(
                "quantity is required and must be greater than 0",
            ));
        }

        if data.actual_weight_kg <= 0.0 {
            return Err(AppError::validation(
                "actual_weight_kg is required and must be greater than 0",
            ));
        }

        if let Some(package_types) = &self.package_types {
            package_types
                .validate_package_weight(data.package_type_id, data.actual_weight_kg)
                .await?;
        }

        if data.origin_address_id == 0 || data.destination_address_id == 0 {
            return Err(AppError::validation(
                "origin_address_id and destination_address_id are required",
            ));
        }

        if data.origin_address_id == data.destination_address_id {
            return Err(AppError::validation(
                "origin and destination must be different",
            ));
        }

        if data.package_type_id == 0 {
            return Err(AppError::validation("package_type_id is required"));
        }

        if customer_id == 0 || created_by == 0 {
            return Err(AppError::validation(
                "customer_id and created_by are required",
            ));
        }

        let order_number = match data.order_number.as_deref() {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => generate_order_number(Utc::now()),
        };
        let status = data.status.unwrap_or_default();

        let order =
            order::create(&self.pool, customer_id, created_by, &order_number, status, &data)
                .await?;
        tracing::info!(
            order_id = order.id,
            order_number = %order.order_number,
            customer_id,
            "Order created"
        );
        Ok(order)
    }

    /// Transition an order to a new status, recording the change
    ///
    /// Any status is accepted from any prior state; the transition and its
    /// ledger row commit atomically.
    pub async fn update_status(
        &self,
        id: i64,
        status: OrderStatus,
        changed_by: i64,
    ) -> AppResult<()> {
        if changed_by == 0 {
            return Err(AppError::validation("changed_by is required"));
        }
        order::update_status(&self.pool, id, status, changed_by).await?;
        tracing::info!(order_id = id, status = ?status, changed_by, "Order status updated");
        Ok(())
    }

    pub async fn find_all(&self) -> AppResult<Vec<Order>> {
        Ok(order::find_all(&self.pool).await?)
    }

    pub async fn find_by_customer(&self, customer_id: i64) -> AppResult<Vec<Order>> {
        Ok(order::find_by_customer(&self.pool, customer_id).await?)
    }

    /// Joined listing; admins may request every customer's orders
    pub async fn list_items(
        &self,
        requester_id: i64,
        is_admin: bool,
        all: bool,
    ) -> AppResult<Vec<OrderListItem>> {
        let customer_id = if is_admin && all {
            None
        } else {
            Some(requester_id)
        };
        Ok(order::find_list_items(&self.pool, customer_id).await?)
    }

    /// Joined detail view, scoped to the owning customer for non-admins
    pub async fn detail(
        &self,
        requester_id: i64,
        is_admin: bool,
        id: i64,
    ) -> AppResult<OrderDetail> {
        let detail = order::find_detail_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;
        if !is_admin && detail.user_id != requester_id {
            return Err(AppError::not_found(format!("Order {id}")));
        }
        Ok(detail)
    }

    /// Status ledger for one order, scoped like [`Self::detail`]
    pub async fn history(
        &self,
        requester_id: i64,
        is_admin: bool,
        id: i64,
    ) -> AppResult<Vec<OrderStatusHistory>> {
        let existing = order::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;
        if !is_admin && existing.customer_id != requester_id {
            return Err(AppError::not_found(format!("Order {id}")));
        }
        Ok(order::find_history(&self.pool, id).await?)
    }
}
