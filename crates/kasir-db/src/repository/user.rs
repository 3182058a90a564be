//! # User Repository
//!
//! The cashier directory. Only ids and display names live here; sign-in is
//! handled elsewhere.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use kasir_core::validation::validate_username;
use kasir_core::User;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Registers a cashier under a fresh id.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - username already taken
    pub async fn insert(&self, username: &str) -> DbResult<User> {
        let username = username.trim();
        validate_username(username)?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            created_at: Utc::now(),
        };
        debug!(id = %user.id, username = %user.username, "Inserting user");

        sqlx::query("INSERT INTO users (id, username, created_at) VALUES (?1, ?2, ?3)")
            .bind(&user.id)
            .bind(&user.username)
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::UniqueViolation { field, .. } => DbError::duplicate(field, username),
                other => other,
            })?;

        Ok(user)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, created_at FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, created_at FROM users WHERE username = ?1",
        )
        .bind(username.trim())
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Display name for a cashier id, if the user exists.
    pub async fn display_name(&self, id: &str) -> DbResult<Option<String>> {
        let name: Option<String> = sqlx::query_scalar("SELECT username FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let users = db.users();

        let admin = users.insert("admin").await.unwrap();
        assert_eq!(users.get_by_id(&admin.id).await.unwrap(), Some(admin.clone()));
        assert_eq!(users.get_by_username("admin").await.unwrap(), Some(admin.clone()));
        assert_eq!(users.display_name(&admin.id).await.unwrap().as_deref(), Some("admin"));
        assert_eq!(users.display_name("nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.users().insert("kasir1").await.unwrap();

        let err = db.users().insert("kasir1").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { value, .. } if value == "kasir1"));
    }

    #[tokio::test]
    async fn test_empty_username_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(matches!(db.users().insert("   ").await, Err(DbError::Invalid(_))));
    }
}
