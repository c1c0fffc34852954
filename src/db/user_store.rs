use async_trait::async_trait;

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::user::User,
};

/// Resolves the user id carried by a session to a user record.
#[async_trait]
pub trait UserLoader: Send + Sync {
    async fn load_user(&self, id: i64) -> Result<Option<User>>;
}

/// User store for database operations
#[derive(Clone)]
pub struct UserStore {
    pool: DbPool,
}

impl UserStore {
    /// Create a new UserStore with the provided database pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a user by ID
    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let user =
            sqlx::query_as::<_, User>("SELECT id, username, password FROM users WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    /// Get a user by exact username
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a new user and return its id.
    ///
    /// `password_hash` must already be hashed. A username that is already
    /// taken yields `AppError::Validation`, even when another request won
    /// the race between the existence check and this insert.
    pub async fn create_user(&self, username: &str, password_hash: &str) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    AppError::Validation(format!("username {username} already exists"))
                }
                other => AppError::Storage(other),
            })?;

        tx.commit().await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

#[async_trait]
impl UserLoader for UserStore {
    async fn load_user(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_pool;

    async fn store() -> UserStore {
        UserStore::new(init_memory_pool().await.unwrap())
    }

    #[tokio::test]
    async fn created_user_can_be_found_by_id_and_username() {
        let store = store().await;
        let id = store.create_user("alice", "$argon2id$fake").await.unwrap();

        let by_id = store.get_user_by_id(id).await.unwrap().unwrap();
        let by_name = store.get_user_by_username("alice").await.unwrap().unwrap();

        assert_eq!(by_id.id, by_name.id);
        assert_eq!(by_id.username, "alice");
        assert_eq!(by_id.password, "$argon2id$fake");
    }

    #[tokio::test]
    async fn username_lookup_is_exact() {
        let store = store().await;
        store.create_user("alice", "hash").await.unwrap();

        assert!(store.get_user_by_username("Alice").await.unwrap().is_none());
        assert!(store.get_user_by_username("alice ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_validation_error() {
        let store = store().await;
        store.create_user("alice", "hash1").await.unwrap();

        let err = store.create_user("alice", "hash2").await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn loader_returns_none_for_unknown_id() {
        let store = store().await;
        assert!(store.load_user(42).await.unwrap().is_none());
    }
}
