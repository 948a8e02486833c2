//! Package Type Service
//!
//! Serves package classifications to order validation through a TTL-based
//! read-through cache so the weight check does not hit storage on every
//! order. Administrative toggles invalidate the cache on this instance only;
//! other instances keep serving their snapshot until their own TTL expires.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use sqlx::SqlitePool;
use tokio::sync::RwLock;

use crate::db::repository::package_type;
use crate::utils::{AppError, AppResult};
use shared::models::PackageType;

/// How long a cached snapshot stays fresh
const CACHE_TTL: Duration = Duration::from_secs(10);

/// Hard weight ceiling, independent of any package type's own limit
const STANDARD_WEIGHT_LIMIT_KG: f64 = 25.0;

const STANDARD_LIMIT_MESSAGE: &str = "package weight exceeds the standard 25 kg limit; shipments of this kind require a special arrangement with the company";

#[derive(Default)]
struct PackageTypeCache {
    types: HashMap<i64, PackageType>,
    refreshed_at: Option<Instant>,
}

impl PackageTypeCache {
    fn is_fresh(&self, ttl: Duration) -> bool {
        !self.types.is_empty() && self.refreshed_at.is_some_and(|t| t.elapsed() < ttl)
    }
}

/// Package type reads, active-flag toggles and the weight-limit cache
#[derive(Clone)]
pub struct PackageTypeService {
    pool: SqlitePool,
    cache: Arc<RwLock<PackageTypeCache>>,
    ttl: Duration,
}

impl PackageTypeService {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_ttl(pool, CACHE_TTL)
    }

    fn with_ttl(pool: SqlitePool, ttl: Duration) -> Self {
        Self {
            pool,
            cache: Arc::new(RwLock::new(PackageTypeCache::default())),
            ttl,
        }
    }

    /// Uncached listing for the API; admins may include inactive types
    pub async fn list(&self, include_inactive: bool) -> AppResult<Vec<PackageType>> {
        Ok(package_type::find_all(&self.pool, include_inactive).await?)
    }

    /// Toggle a package type's active flag and invalidate the cache
    pub async fn toggle_active(&self, id: i64, active: bool) -> AppResult<()> {
        if id == 0 {
            return Err(AppError::validation("id is required"));
        }
        package_type::set_active(&self.pool, id, active).await?;
        self.invalidate().await;
        Ok(())
    }

    /// Snapshot of all active package types, keyed by id
    ///
    /// Reads go through the shared lock while the snapshot is fresh. A stale
    /// snapshot escalates to the write lock and re-checks freshness there, so
    /// concurrent refresh attempts collapse into a single storage read.
    pub async fn get_all(&self) -> AppResult<HashMap<i64, PackageType>> {
        {
            let cache = self.cache.read().await;
            if cache.is_fresh(self.ttl) {
                return Ok(cache.types.clone());
            }
        }

        let mut cache = self.cache.write().await;
        if cache.is_fresh(self.ttl) {
            return Ok(cache.types.clone());
        }

        let types = package_type::find_all(&self.pool, false).await?;
        cache.types = types.into_iter().map(|pt| (pt.id, pt)).collect();
        cache.refreshed_at = Some(Instant::now());
        tracing::debug!(count = cache.types.len(), "Package type cache refreshed");

        Ok(cache.types.clone())
    }

    /// Drop the cached snapshot; the next read reloads from storage
    pub async fn invalidate(&self) {
        let mut cache = self.cache.write().await;
        cache.types.clear();
        cache.refreshed_at = None;
    }

    /// Validate a declared weight against a package type's limit
    ///
    /// Weights above the 25 kg standard limit are rejected with a dedicated
    /// message regardless of the type's own maximum.
    pub async fn validate_package_weight(
        &self,
        package_type_id: i64,
        weight_kg: f64,
    ) -> AppResult<()> {
        let package_types = self.get_all().await?;

        let Some(package_type) = package_types.get(&package_type_id) else {
            if weight_kg > STANDARD_WEIGHT_LIMIT_KG {
                return Err(AppError::business_rule(STANDARD_LIMIT_MESSAGE));
            }
            return Err(AppError::not_found(format!(
                "Package type {package_type_id}"
            )));
        };

        if !package_type.is_active {
            return Err(AppError::business_rule("package type is not active"));
        }

        if weight_kg > STANDARD_WEIGHT_LIMIT_KG {
            return Err(AppError::business_rule(STANDARD_LIMIT_MESSAGE));
        }

        if weight_kg > package_type.max_weight_kg {
            return Err(AppError::business_rule(
                "package weight exceeds the maximum for this package type",
            ));
        }

        Ok(())
    }
}
