//! Address Repository
//!
//! Address rows and their optional coordinate row are kept consistent inside
//! one transaction. Non-admin lookups are always scoped to the requesting
//! customer; a foreign row surfaces as NotFound.

use super::{RepoError, RepoResult};
use shared::models::{Address, AddressRequest, Coordinates};
use sqlx::{Sqlite, SqlitePool, Transaction};

const ADDRESS_COLUMNS: &str = "id, customer_id, street, exterior_number, interior_number, neighborhood, postal_code, city, state, country, coordinate_id, is_active, created_at, updated_at";

const COORD_COLUMNS: &str = "id, latitude, longitude, created_at";

async fn find_in_tx(
    tx: &mut Transaction<'_, Sqlite>,
    requester_id: i64,
    is_admin: bool,
    id: i64,
) -> RepoResult<Address> {
    let row = if is_admin {
        sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
    } else {
        sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = ?1 AND customer_id = ?2"
        ))
        .bind(id)
        .bind(requester_id)
        .fetch_optional(&mut **tx)
        .await?
    };
    row.ok_or_else(|| RepoError::NotFound(format!("Address {id} not found")))
}

pub async fn find_coordinates(pool: &SqlitePool, id: i64) -> RepoResult<Option<Coordinates>> {
    let row = sqlx::query_as::<_, Coordinates>(&format!(
        "SELECT {COORD_COLUMNS} FROM coordinates WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert the coordinate row (when supplied) and the address referencing it,
/// atomically.
pub async fn create_with_coordinates(
    pool: &SqlitePool,
    customer_id: i64,
    data: &AddressRequest,
) -> RepoResult<(Address, Option<Coordinates>)> {
    let now = shared::util::now_millis();
    let is_active = data.is_active.unwrap_or(true);
    let country = data.country.as_deref().filter(|c| !c.is_empty()).unwrap_or("Mexico");

    let mut tx = pool.begin().await?;

    let coordinate_id = match &data.coordinates {
        Some(c) => {
            let id: i64 = sqlx::query_scalar(
                "INSERT INTO coordinates (latitude, longitude, created_at) VALUES (?1, ?2, ?3) RETURNING id",
            )
            .bind(c.latitude)
            .bind(c.longitude)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;
            Some(id)
        }
        None => None,
    };

    let address_id: i64 = sqlx::query_scalar(
        "INSERT INTO addresses (customer_id, street, exterior_number, interior_number, neighborhood, postal_code, city, state, country, coordinate_id, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12) RETURNING id",
    )
    .bind(customer_id)
    .bind(&data.street)
    .bind(&data.exterior_number)
    .bind(&data.interior_number)
    .bind(&data.neighborhood)
    .bind(&data.postal_code)
    .bind(&data.city)
    .bind(&data.state)
    .bind(country)
    .bind(coordinate_id)
    .bind(is_active)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    let address = sqlx::query_as::<_, Address>(&format!(
        "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = ?"
    ))
    .bind(address_id)
    .fetch_one(pool)
    .await?;

    let coordinates = match coordinate_id {
        Some(id) => find_coordinates(pool, id).await?,
        None => None,
    };

    Ok((address, coordinates))
}

/// Update the address and its coordinate in place; a new coordinate row is
/// created and attached when the address does not own one yet.
pub async fn update_with_coordinates(
    pool: &SqlitePool,
    requester_id: i64,
    is_admin: bool,
    id: i64,
    data: &AddressRequest,
) -> RepoResult<(Address, Option<Coordinates>)> {
    let now = shared::util::now_millis();
    let country = data.country.as_deref().filter(|c| !c.is_empty()).unwrap_or("Mexico");

    let mut tx = pool.begin().await?;

    let existing = find_in_tx(&mut tx, requester_id, is_admin, id).await?;

    let mut touched_coordinate = None;
    if let Some(c) = &data.coordinates {
        match existing.coordinate_id {
            Some(coord_id) => {
                sqlx::query("UPDATE coordinates SET latitude = ?1, longitude = ?2 WHERE id = ?3")
                    .bind(c.latitude)
                    .bind(c.longitude)
                    .bind(coord_id)
                    .execute(&mut *tx)
                    .await?;
                touched_coordinate = Some(coord_id);
            }
            None => {
                let coord_id: i64 = sqlx::query_scalar(
                    "INSERT INTO coordinates (latitude, longitude, created_at) VALUES (?1, ?2, ?3) RETURNING id",
                )
                .bind(c.latitude)
                .bind(c.longitude)
                .bind(now)
                .fetch_one(&mut *tx)
                .await?;
                sqlx::query("UPDATE addresses SET coordinate_id = ?1 WHERE id = ?2")
                    .bind(coord_id)
                    .bind(existing.id)
                    .execute(&mut *tx)
                    .await?;
                touched_coordinate = Some(coord_id);
            }
        }
    }

    sqlx::query(
        "UPDATE addresses SET street = ?1, exterior_number = ?2, interior_number = ?3, neighborhood = ?4, postal_code = ?5, city = ?6, state = ?7, country = ?8, updated_at = ?9 WHERE id = ?10",
    )
    .bind(&data.street)
    .bind(&data.exterior_number)
    .bind(&data.interior_number)
    .bind(&data.neighborhood)
    .bind(&data.postal_code)
    .bind(&data.city)
    .bind(&data.state)
    .bind(country)
    .bind(now)
    .bind(existing.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let address = sqlx::query_as::<_, Address>(&format!(
        "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = ?"
    ))
    .bind(existing.id)
    .fetch_one(pool)
    .await?;

    let coordinates = match touched_coordinate {
        Some(coord_id) => find_coordinates(pool, coord_id).await?,
        None => None,
    };

    Ok((address, coordinates))
}

pub async fn find_by_id(
    pool: &SqlitePool,
    requester_id: i64,
    is_admin: bool,
    id: i64,
) -> RepoResult<Option<Address>> {
    let row = if is_admin {
        sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?
    } else {
        sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = ?1 AND customer_id = ?2"
        ))
        .bind(id)
        .bind(requester_id)
        .fetch_optional(pool)
        .await?
    };
    Ok(row)
}

/// Scoped listing: non-admins only see their own active addresses; admins
/// may include inactive rows.
pub async fn list(
    pool: &SqlitePool,
    requester_id: i64,
    is_admin: bool,
    include_inactive: bool,
) -> RepoResult<Vec<Address>> {
    let rows = if !is_admin {
        sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE customer_id = ? AND is_active = 1 ORDER BY id"
        ))
        .bind(requester_id)
        .fetch_all(pool)
        .await?
    } else if include_inactive {
        sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses ORDER BY id"
        ))
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE is_active = 1 ORDER BY id"
        ))
        .fetch_all(pool)
        .await?
    };
    Ok(rows)
}

pub async fn toggle_active(
    pool: &SqlitePool,
    requester_id: i64,
    is_admin: bool,
    id: i64,
    active: bool,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = if is_admin {
        sqlx::query("UPDATE addresses SET is_active = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(active)
            .bind(now)
            .bind(id)
            .execute(pool)
            .await?
    } else {
        sqlx::query(
            "UPDATE addresses SET is_active = ?1, updated_at = ?2 WHERE id = ?3 AND customer_id = ?4",
        )
        .bind(active)
        .bind(now)
        .bind(id)
        .bind(requester_id)
        .execute(pool)
        .await?
    };
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Address {id} not found")));
    }
    Ok(())
}

/// Delete the address unless any order references it; an orphaned coordinate
/// row is removed in the same transaction, on a best-effort basis.
pub async fn delete(
    pool: &SqlitePool,
    requester_id: i64,
    is_admin: bool,
    id: i64,
) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    let existing = find_in_tx(&mut tx, requester_id, is_admin, id).await?;

    let references: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM orders WHERE origin_address_id = ?1 OR destination_address_id = ?1",
    )
    .bind(existing.id)
    .fetch_one(&mut *tx)
    .await?;
    if references > 0 {
        return Err(RepoError::Conflict(
            "address is referenced by orders and cannot be deleted".into(),
        ));
    }

    sqlx::query("DELETE FROM addresses WHERE id = ?")
        .bind(existing.id)
        .execute(&mut *tx)
        .await?;

    if let Some(coord_id) = existing.coordinate_id {
        let usage: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM addresses WHERE coordinate_id = ?")
                .bind(coord_id)
                .fetch_one(&mut *tx)
                .await?;
        if usage == 0 {
            // orphan cleanup is best-effort; its failure does not abort the delete
            if let Err(e) = sqlx::query("DELETE FROM coordinates WHERE id = ?")
                .bind(coord_id)
                .execute(&mut *tx)
                .await
            {
                tracing::warn!(coordinate_id = coord_id, error = %e, "Failed to clean up orphaned coordinate");
            }
        }
    }

    tx.commit().await?;
    Ok(())
}
