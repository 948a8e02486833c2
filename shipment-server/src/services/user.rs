//! User Service
//!
//! Registration, credential checks and account deletion. Authentication
//! failures collapse into one "invalid credentials" outcome so the API never
//! confirms whether an email exists.

use sqlx::SqlitePool;

use crate::auth::{hash_password, verify_password};
use crate::db::repository::user;
use crate::utils::{AppError, AppResult};
use shared::models::{Role, User, UserCreate};

#[derive(Clone)]
pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new account; unknown roles fall back to client
    pub async fn register(&self, data: UserCreate) -> AppResult<User> {
        if data.email.is_empty() || data.password.is_empty() || data.full_name.is_empty() {
            return Err(AppError::validation(
                "email, password and full_name are required",
            ));
        }

        let role = data.role.unwrap_or(Role::Client);

        let password_hash = hash_password(&data.password)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

        let created = user::create(
            &self.pool,
            &data.email,
            &password_hash,
            &data.full_name,
            data.phone.as_deref(),
            role,
        )
        .await?;
        tracing::info!(user_id = created.id, email = %created.email, "User registered");
        Ok(created)
    }

    /// Check credentials and return the account
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        if email.is_empty() || password.is_empty() {
            return Err(AppError::validation("email and password are required"));
        }

        let found = user::find_by_email(&self.pool, email).await?;
        let found = match found {
            Some(u) => u,
            None => {
                tracing::warn!(email = %email, "Login failed - user not found");
                return Err(AppError::invalid_credentials());
            }
        };

        if !found.is_active {
            return Err(AppError::forbidden("Account has been disabled"));
        }

        let password_valid = verify_password(password, &found.password_hash)
            .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
        if !password_valid {
            tracing::warn!(email = %email, "Login failed - invalid credentials");
            return Err(AppError::invalid_credentials());
        }

        Ok(found)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        user::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id}")))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        Ok(user::delete_by_id(&self.pool, id).await?)
    }

    /// Seed the default admin account when none exists
    pub async fn ensure_admin(&self) -> AppResult<()> {
        let email =
            std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
        if user::find_by_email(&self.pool, &email).await?.is_some() {
            return Ok(());
        }

        let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string());
        self.register(UserCreate {
            email: email.clone(),
            password,
            full_name: "Admin".to_string(),
            phone: None,
            role: Some(Role::Admin),
        })
        .await?;
        tracing::info!(email = %email, "Seeded default admin account");
        Ok(())
    }
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
            "CREATE TABLE users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                phone TEXT,
                full_name TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'client',
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at INTEGER NOT NULL DEFAULT 0,
                updated_at INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    fn registration() -> UserCreate {
        UserCreate {
            email: "alice@example.com".into(),
            password: "hunter2".into(),
            full_name: "Alice".into(),
            phone: None,
            role: None,
        }
    }

    #[tokio::test]
    async fn test_register_and_authenticate() {
        let svc = UserService::new(test_pool().await);
        let user = svc.register(registration()).await.unwrap();
        assert_eq!(user.role, Role::Client);
        // the stored hash is never the raw password
        assert_ne!(user.password_hash, "hunter2");

        let authed = svc.authenticate("alice@example.com", "hunter2").await.unwrap();
        assert_eq!(authed.id, user.id);
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let svc = UserService::new(test_pool().await);
        let err = svc
            .register(UserCreate { email: String::new(), ..registration() })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let svc = UserService::new(test_pool().await);
        svc.register(registration()).await.unwrap();
        let err = svc.register(registration()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email_and_wrong_password_look_alike() {
        let svc = UserService::new(test_pool().await);
        svc.register(registration()).await.unwrap();

        let unknown = svc
            .authenticate("bob@example.com", "hunter2")
            .await
            .unwrap_err();
        let wrong = svc
            .authenticate("alice@example.com", "wrong")
            .await
            .unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() {
        let svc = UserService::new(test_pool().await);
        svc.ensure_admin().await.unwrap();
        svc.ensure_admin().await.unwrap();

        let admin = svc.authenticate("admin@example.com", "admin").await.unwrap();
        assert_eq!(admin.role, Role::Admin);
    }
}
