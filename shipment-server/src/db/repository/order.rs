//! Order Repository
//!
//! Status transitions update the order row and append a history row inside
//! one transaction; neither write is observable without the other.

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderCreate, OrderDetail, OrderListItem, OrderStatus, OrderStatusHistory, PackageSize};
use sqlx::SqlitePool;

// internal struct for scanning joined rows
#[derive(sqlx::FromRow)]
struct OrderJoinedRow {
    id: i64,
    order_number: String,
    created_at: i64,
    full_name: String,
    ao_street: String,
    ao_exterior: Option<String>,
    ao_neighborhood: Option<String>,
    ao_city: String,
    ao_postal: Option<String>,
    ad_street: String,
    ad_exterior: Option<String>,
    ad_neighborhood: Option<String>,
    ad_city: String,
    ad_postal: Option<String>,
    quantity: i64,
    actual_weight_kg: f64,
    size_code: PackageSize,
    status: OrderStatus,
}

fn join_address_parts(parts: [&str; 5]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_day(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

impl From<OrderJoinedRow> for OrderListItem {
    fn from(row: OrderJoinedRow) -> Self {
        let origin = join_address_parts([
            &row.ao_street,
            row.ao_exterior.as_deref().unwrap_or(""),
            row.ao_neighborhood.as_deref().unwrap_or(""),
            &row.ao_city,
            row.ao_postal.as_deref().unwrap_or(""),
        ]);
        let destination = join_address_parts([
            &row.ad_street,
            row.ad_exterior.as_deref().unwrap_or(""),
            row.ad_neighborhood.as_deref().unwrap_or(""),
            &row.ad_city,
            row.ad_postal.as_deref().unwrap_or(""),
        ]);
        OrderListItem {
            id: row.id,
            order_number: row.order_number,
            created_at: format_day(row.created_at),
            full_name: row.full_name,
            origin_full_address: origin,
            destination_full_address: destination,
            quantity: row.quantity,
            actual_weight_kg: row.actual_weight_kg,
            size_code: row.size_code,
            status: row.status,
        }
    }
}

pub async fn create(
    pool: &SqlitePool,
    customer_id: i64,
    created_by: i64,
    order_number: &str,
    status: OrderStatus,
    data: &OrderCreate,
) -> RepoResult<Order> {
    let now = shared::util::now_millis();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (order_number, origin_address_id, destination_address_id, package_type_id, quantity, actual_weight_kg, status, customer_id, created_by, updated_by, observations, internal_notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13) RETURNING id",
    )
    .bind(order_number)
    .bind(data.origin_address_id)
    .bind(data.destination_address_id)
    .bind(data.package_type_id)
    .bind(data.quantity)
    .bind(data.actual_weight_kg)
    .bind(status)
    .bind(customer_id)
    .bind(created_by)
    .bind(created_by)
    .bind(&data.observations)
    .bind(&data.internal_notes)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, Order>(
        "SELECT id, order_number, origin_address_id, destination_address_id, package_type_id, quantity, actual_weight_kg, status, customer_id, created_by, updated_by, observations, internal_notes, created_at, updated_at FROM orders WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, Order>(
        "SELECT id, order_number, origin_address_id, destination_address_id, package_type_id, quantity, actual_weight_kg, status, customer_id, created_by, updated_by, observations, internal_notes, created_at, updated_at FROM orders ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_customer(pool: &SqlitePool, customer_id: i64) -> RepoResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, Order>(
        "SELECT id, order_number, origin_address_id, destination_address_id, package_type_id, quantity, actual_weight_kg, status, customer_id, created_by, updated_by, observations, internal_notes, created_at, updated_at FROM orders WHERE customer_id = ? ORDER BY id",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

const JOINED_SELECT: &str = "SELECT o.id, o.order_number, o.created_at, u.full_name, \
    ao.street as ao_street, ao.exterior_number as ao_exterior, ao.neighborhood as ao_neighborhood, ao.city as ao_city, ao.postal_code as ao_postal, \
    ad.street as ad_street, ad.exterior_number as ad_exterior, ad.neighborhood as ad_neighborhood, ad.city as ad_city, ad.postal_code as ad_postal, \
    o.quantity, o.actual_weight_kg, pt.size_code, o.status \
    FROM orders o \
    INNER JOIN users u ON o.customer_id = u.id \
    INNER JOIN addresses ao ON o.origin_address_id = ao.id \
    INNER JOIN addresses ad ON o.destination_address_id = ad.id \
    INNER JOIN package_types pt ON o.package_type_id = pt.id";

/// Joined listing; `customer_id = None` returns every order (admin view)
pub async fn find_list_items(
    pool: &SqlitePool,
    customer_id: Option<i64>,
) -> RepoResult<Vec<OrderListItem>> {
    let rows = match customer_id {
        Some(cid) => {
            sqlx::query_as::<_, OrderJoinedRow>(&format!(
                "{JOINED_SELECT} WHERE o.customer_id = ? ORDER BY o.id"
            ))
            .bind(cid)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, OrderJoinedRow>(&format!("{JOINED_SELECT} ORDER BY o.id"))
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows.into_iter().map(OrderListItem::from).collect())
}

pub async fn find_detail_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<OrderDetail>> {
    let row = sqlx::query_as::<_, OrderDetail>(
        "SELECT o.id, o.order_number, o.created_at, u.id as user_id, u.full_name, \
         o.origin_address_id, ao.street as ao_street, ao.exterior_number as ao_exterior, ao.neighborhood as ao_neighborhood, ao.city as ao_city, ao.postal_code as ao_postal, \
         o.destination_address_id, ad.street as ad_street, ad.exterior_number as ad_exterior, ad.neighborhood as ad_neighborhood, ad.city as ad_city, ad.postal_code as ad_postal, \
         o.quantity, o.actual_weight_kg, o.package_type_id, pt.size_code, o.observations, o.internal_notes, o.updated_at, o.status \
         FROM orders o \
         INNER JOIN users u ON o.customer_id = u.id \
         INNER JOIN addresses ao ON o.origin_address_id = ao.id \
         INNER JOIN addresses ad ON o.destination_address_id = ad.id \
         INNER JOIN package_types pt ON o.package_type_id = pt.id \
         WHERE o.id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_history(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderStatusHistory>> {
    let rows = sqlx::query_as::<_, OrderStatusHistory>(
        "SELECT id, order_id, previous_status, new_status, changed_at, changed_by, notes FROM order_status_history WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Update the order status and append the history row atomically
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: OrderStatus,
    changed_by: i64,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let previous: OrderStatus = sqlx::query_scalar("SELECT status FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;

    sqlx::query("UPDATE orders SET status = ?1, updated_by = ?2, updated_at = ?3 WHERE id = ?4")
        .bind(status)
        .bind(changed_by)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        "INSERT INTO order_status_history (order_id, previous_status, new_status, changed_at, changed_by) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(previous)
    .bind(status)
    .bind(now)
    .bind(changed_by)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
