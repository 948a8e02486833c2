//! Address Service
//!
//! Validates address payloads and delegates the composite address+coordinate
//! writes to the transactional repository operations. Ownership scoping is
//! applied in the repository; a row owned by someone else is reported as not
//! found, never as forbidden.

use sqlx::SqlitePool;

use crate::db::repository::address;
use crate::utils::{AppError, AppResult};
use shared::models::{Address, AddressRequest, Coordinates, Role};

fn validate_coordinates(data: &AddressRequest) -> AppResult<()> {
    if let Some(c) = &data.coordinates {
        if c.latitude < -90.0 || c.latitude > 90.0 {
            return Err(AppError::validation(
                "latitude must be between -90 and 90 degrees",
            ));
        }
        if c.longitude < -180.0 || c.longitude > 180.0 {
            return Err(AppError::validation(
                "longitude must be between -180 and 180 degrees",
            ));
        }
    }
    Ok(())
}

/// Address CRUD with coordinate ownership
#[derive(Clone)]
pub struct AddressService {
    pool: SqlitePool,
}

impl AddressService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an address (and its coordinate, when supplied) for a customer
    pub async fn create(
        &self,
        customer_id: i64,
        data: AddressRequest,
    ) -> AppResult<(Address, Option<Coordinates>)> {
        if customer_id == 0 {
            return Err(AppError::validation("customer_id is required"));
        }

        if data.street.is_empty() || data.city.is_empty() || data.state.is_empty() {
            return Err(AppError::validation("street, city and state are required"));
        }

        validate_coordinates(&data)?;

        Ok(address::create_with_coordinates(&self.pool, customer_id, &data).await?)
    }

    /// Update an address and its coordinate; owner or admin only
    pub async fn update(
        &self,
        requester_id: i64,
        is_admin: bool,
        id: i64,
        data: AddressRequest,
    ) -> AppResult<(Address, Option<Coordinates>)> {
        if id == 0 {
            return Err(AppError::validation("id is required"));
        }

        let (mut updated, coordinates) =
            address::update_with_coordinates(&self.pool, requester_id, is_admin, id, &data).await?;

        if let Some(active) = data.is_active {
            address::toggle_active(&self.pool, requester_id, is_admin, id, active).await?;
            updated.is_active = active;
        }

        Ok((updated, coordinates))
    }

    pub async fn get(&self, requester_id: i64, is_admin: bool, id: i64) -> AppResult<Address> {
        address::find_by_id(&self.pool, requester_id, is_admin, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Address {id}")))
    }

    /// Non-admins always get their own active addresses; admins may list all
    /// customers (`all`) and include inactive rows
    pub async fn list(
        &self,
        requester_id: i64,
        role: Role,
        include_inactive: bool,
        all: bool,
    ) -> AppResult<Vec<Address>> {
        let is_admin = role == Role::Admin;
        Ok(address::list(
            &self.pool,
            requester_id,
            is_admin && all,
            include_inactive && is_admin,
        )
        .await?)
    }

    pub async fn toggle_active(
        &self,
        requester_id: i64,
        is_admin: bool,
        id: i64,
        active: bool,
    ) -> AppResult<()> {
        Ok(address::toggle_active(&self.pool, requester_id, is_admin, id, active).await?)
    }

    /// Delete an address unless orders still reference it
    pub async fn delete(&self, requester_id: i64, is_admin: bool, id: i64) -> AppResult<()> {
        Ok(address::delete(&self.pool, requester_id, is_admin, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CoordinatesRequest;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE coordinates (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL,
                created_at INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE addresses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                customer_id INTEGER NOT NULL,
                street TEXT NOT NULL,
                exterior_number TEXT,
                interior_number TEXT,
                neighborhood TEXT,
                postal_code TEXT,
                city TEXT NOT NULL,
                state TEXT NOT NULL,
                country TEXT NOT NULL DEFAULT 'Mexico',
                coordinate_id INTEGER,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at INTEGER NOT NULL DEFAULT 0,
                updated_at INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE orders (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                origin_address_id INTEGER NOT NULL,
                destination_address_id INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    fn request(coords: Option<CoordinatesRequest>) -> AddressRequest {
        AddressRequest {
            street: "Av. Reforma 123".into(),
            exterior_number: Some("123".into()),
            interior_number: Some("A".into()),
            neighborhood: Some("Centro".into()),
            postal_code: Some("06000".into()),
            city: "Ciudad de Mexico".into(),
            state: "CDMX".into(),
            country: Some("Mexico".into()),
            is_active: None,
            coordinates: coords,
        }
    }

    fn validation_message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_success() {
        let svc = AddressService::new(test_pool().await);
        let coords = CoordinatesRequest {
            latitude: 19.4326,
            longitude: -99.1332,
        };
        let (address, coordinates) = svc.create(1, request(Some(coords))).await.unwrap();

        assert_eq!(address.customer_id, 1);
        assert_eq!(address.street, "Av. Reforma 123");
        assert!(address.is_active);
        let coordinates = coordinates.unwrap();
        assert_eq!(coordinates.latitude, 19.4326);
        assert_eq!(coordinates.longitude, -99.1332);
    }

    #[tokio::test]
    async fn test_create_without_coordinates() {
        let svc = AddressService::new(test_pool().await);
        let (address, coordinates) = svc.create(1, request(None)).await.unwrap();
        assert!(coordinates.is_none());
        assert_eq!(address.coordinate_id, None);
    }

    #[tokio::test]
    async fn test_create_missing_customer() {
        let svc = AddressService::new(test_pool().await);
        let err = svc.create(0, request(None)).await.unwrap_err();
        assert_eq!(validation_message(err), "customer_id is required");
    }

    #[tokio::test]
    async fn test_create_missing_required_fields() {
        let svc = AddressService::new(test_pool().await);
        for broken in [
            AddressRequest { street: String::new(), ..request(None) },
            AddressRequest { city: String::new(), ..request(None) },
            AddressRequest { state: String::new(), ..request(None) },
        ] {
            let err = svc.create(1, broken).await.unwrap_err();
            assert_eq!(validation_message(err), "street, city and state are required");
        }
    }

    #[tokio::test]
    async fn test_create_boundary_coordinates_accepted() {
        let svc = AddressService::new(test_pool().await);
        for (latitude, longitude) in [
            (90.0, 0.0),
            (-90.0, 0.0),
            (0.0, 180.0),
            (0.0, -180.0),
            (0.0, 0.0),
        ] {
            let coords = CoordinatesRequest { latitude, longitude };
            let (_, coordinates) = svc.create(1, request(Some(coords))).await.unwrap();
            let coordinates = coordinates.unwrap();
            assert_eq!(coordinates.latitude, latitude);
            assert_eq!(coordinates.longitude, longitude);
        }
    }

    #[tokio::test]
    async fn test_create_out_of_range_latitude() {
        let svc = AddressService::new(test_pool().await);
        for latitude in [-91.0, 91.0] {
            let coords = CoordinatesRequest { latitude, longitude: 0.0 };
            let err = svc.create(1, request(Some(coords))).await.unwrap_err();
            assert_eq!(
                validation_message(err),
                "latitude must be between -90 and 90 degrees"
            );
        }
    }

    #[tokio::test]
    async fn test_create_out_of_range_longitude() {
        let svc = AddressService::new(test_pool().await);
        for longitude in [-181.0, 181.0] {
            let coords = CoordinatesRequest { latitude: 0.0, longitude };
            let err = svc.create(1, request(Some(coords))).await.unwrap_err();
            assert_eq!(
                validation_message(err),
                "longitude must be between -180 and 180 degrees"
            );
        }
    }

    #[tokio::test]
    async fn test_create_with_inactive_override() {
        let svc = AddressService::new(test_pool().await);
        let (address, _) = svc
            .create(1, AddressRequest { is_active: Some(false), ..request(None) })
            .await
            .unwrap();
        assert!(!address.is_active);
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let svc = AddressService::new(test_pool().await);
        let err = svc.update(1, false, 0, request(None)).await.unwrap_err();
        assert_eq!(validation_message(err), "id is required");
    }

    #[tokio::test]
    async fn test_update_applies_active_override() {
        let svc = AddressService::new(test_pool().await);
        let (address, _) = svc.create(1, request(None)).await.unwrap();

        let (updated, _) = svc
            .update(
                1,
                false,
                address.id,
                AddressRequest { is_active: Some(false), ..request(None) },
            )
            .await
            .unwrap();
        assert!(!updated.is_active);

        let reread = svc.get(1, true, address.id).await.unwrap();
        assert!(!reread.is_active);
    }

    #[tokio::test]
    async fn test_get_scoped() {
        let svc = AddressService::new(test_pool().await);
        let (address, _) = svc.create(1, request(None)).await.unwrap();

        assert!(svc.get(1, false, address.id).await.is_ok());
        let err = svc.get(2, false, address.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_role_scoping() {
        let svc = AddressService::new(test_pool().await);
        svc.create(1, request(None)).await.unwrap();
        svc.create(2, request(None)).await.unwrap();

        // clients never see other customers' rows, regardless of flags
        let own = svc.list(1, Role::Client, true, true).await.unwrap();
        assert_eq!(own.len(), 1);

        let everyone = svc.list(99, Role::Admin, false, true).await.unwrap();
        assert_eq!(everyone.len(), 2);
    }
}
