//! Server state
//!
//! [`ServerState`] holds the shared service singletons. It is `Clone`; every
//! field is either a cheap handle (pool, `Arc`) or a service wrapping one.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{AddressService, OrderService, PackageTypeService, UserService};
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT token service
    pub jwt: Arc<JwtService>,
    /// Order lifecycle engine
    pub orders: OrderService,
    /// Address manager
    pub addresses: AddressService,
    /// Package type reads and weight-limit cache
    pub package_types: PackageTypeService,
    /// User accounts
    pub users: UserService,
}

impl ServerState {
    /// Open the database, run migrations, seed the admin account and wire up
    /// the services
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        let pool = db.pool;

        let jwt = Arc::new(JwtService::new(config.jwt.clone()));
        let package_types = PackageTypeService::new(pool.clone());
        let orders = OrderService::new(pool.clone(), Some(package_types.clone()));
        let addresses = AddressService::new(pool.clone());
        let users = UserService::new(pool.clone());

        users.ensure_admin().await?;

        Ok(Self {
            config: config.clone(),
            pool,
            jwt,
            orders,
            addresses,
            package_types,
            users,
        })
    }
}
