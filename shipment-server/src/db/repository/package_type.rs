//! Package Type Repository

use super::{RepoError, RepoResult};
use shared::models::PackageType;
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool, include_inactive: bool) -> RepoResult<Vec<PackageType>> {
    let rows = if include_inactive {
        sqlx::query_as::<_, PackageType>(
            "SELECT id, size_code, max_weight_kg, description, is_active, created_at FROM package_types ORDER BY id",
        )
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, PackageType>(
            "SELECT id, size_code, max_weight_kg, description, is_active, created_at FROM package_types WHERE is_active = 1 ORDER BY id",
        )
        .fetch_all(pool)
        .await?
    };
    Ok(rows)
}

pub async fn set_active(pool: &SqlitePool, id: i64, active: bool) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE package_types SET is_active = ? WHERE id = ?")
        .bind(active)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Package type {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE package_types (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                size_code TEXT NOT NULL UNIQUE,
                max_weight_kg REAL NOT NULL,
                description TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "INSERT INTO package_types (size_code, max_weight_kg, is_active) VALUES
                ('S', 5.0, 1), ('M', 10.0, 1), ('L', 15.0, 0), ('XL', 25.0, 1)",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    #[tokio::test]
    async fn test_find_all_active_only() {
        let pool = test_pool().await;
        let active = find_all(&pool, false).await.unwrap();
        assert_eq!(active.len(), 3);
        assert!(active.iter().all(|pt| pt.is_active));
    }

    #[tokio::test]
    async fn test_find_all_include_inactive() {
        let pool = test_pool().await;
        let all = find_all(&pool, true).await.unwrap();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn test_set_active() {
        let pool = test_pool().await;
        set_active(&pool, 3, true).await.unwrap();
        let active = find_all(&pool, false).await.unwrap();
        assert_eq!(active.len(), 4);
    }

    #[tokio::test]
    async fn test_set_active_missing() {
        let pool = test_pool().await;
        let err = set_active(&pool, 42, false).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
