use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::favorites::FavoriteLocation;

use super::DbError;

/// Repository trait for favorite-location operations
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// List a user's favorites, newest first
    async fn list(&self, user_id: &str) -> Result<Vec<FavoriteLocation>, DbError>;

    /// Insert a favorite
    async fn add(&self, favorite: &FavoriteLocation) -> Result<(), DbError>;

    /// Delete a favorite by user id and exact name; returns whether a row existed
    async fn remove(&self, user_id: &str, name: &str) -> Result<bool, DbError>;
}

/// SQLite implementation of FavoriteRepository
pub struct SqliteFavoriteRepository {
    pool: SqlitePool,
}

impl SqliteFavoriteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Internal row structure for SQLite queries
#[derive(sqlx::FromRow)]
struct FavoriteRow {
    id: String,
    user_id: String,
    name: String,
    created_at: i64,
}

impl From<FavoriteRow> for FavoriteLocation {
    fn from(row: FavoriteRow) -> Self {
        FavoriteLocation {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl FavoriteRepository for SqliteFavoriteRepository {
    async fn list(&self, user_id: &str) -> Result<Vec<FavoriteLocation>, DbError> {
        let rows: Vec<FavoriteRow> = sqlx::query_as(
            "SELECT id, user_id, name, created_at
             FROM favorite_locations WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(FavoriteLocation::from).collect())
    }

    async fn add(&self, favorite: &FavoriteLocation) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO favorite_locations (id, user_id, name, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&favorite.id)
        .bind(&favorite.user_id)
        .bind(&favorite.name)
        .bind(favorite.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, user_id: &str, name: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM favorite_locations WHERE user_id = ? AND name = ?")
            .bind(user_id)
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, DbConfig};

    async fn setup_test_db() -> SqlitePool {
        let config = DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        };
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    fn create_test_favorite(user_id: &str, name: &str, created_at: i64) -> FavoriteLocation {
        FavoriteLocation {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            created_at,
        }
    }

    #[tokio::test]
    async fn test_add_then_list_newest_first() {
        let pool = setup_test_db().await;
        let repo = SqliteFavoriteRepository::new(pool);

        repo.add(&create_test_favorite("user1", "London", 1700000000))
            .await
            .unwrap();
        repo.add(&create_test_favorite("user1", "Tokyo", 1700000100))
            .await
            .unwrap();

        let favorites = repo.list("user1").await.unwrap();
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].name, "Tokyo");
        assert_eq!(favorites[1].name, "London");
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_user() {
        let pool = setup_test_db().await;
        let repo = SqliteFavoriteRepository::new(pool);

        repo.add(&create_test_favorite("user1", "Paris", 1700000000))
            .await
            .unwrap();
        repo.add(&create_test_favorite("user2", "Berlin", 1700000000))
            .await
            .unwrap();

        let favorites = repo.list("user1").await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].name, "Paris");
    }

    #[tokio::test]
    async fn test_remove_exact_name_match() {
        let pool = setup_test_db().await;
        let repo = SqliteFavoriteRepository::new(pool);

        repo.add(&create_test_favorite("user1", "Sydney", 1700000000))
            .await
            .unwrap();

        // Names are matched exactly
        assert!(!repo.remove("user1", "sydney").await.unwrap());
        assert!(repo.remove("user1", "Sydney").await.unwrap());
        assert!(repo.list("user1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_missing_name_is_not_an_error() {
        let pool = setup_test_db().await;
        let repo = SqliteFavoriteRepository::new(pool);

        // Deleting a name that was never saved succeeds silently
        assert!(!repo.remove("user1", "Atlantis").await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_is_scoped_to_user() {
        let pool = setup_test_db().await;
        let repo = SqliteFavoriteRepository::new(pool);

        repo.add(&create_test_favorite("user1", "Mumbai", 1700000000))
            .await
            .unwrap();

        assert!(!repo.remove("user2", "Mumbai").await.unwrap());
        assert_eq!(repo.list("user1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_add_is_rejected_by_store() {
        let pool = setup_test_db().await;
        let repo = SqliteFavoriteRepository::new(pool);

        repo.add(&create_test_favorite("user1", "Dubai", 1700000000))
            .await
            .unwrap();

        let result = repo
            .add(&create_test_favorite("user1", "Dubai", 1700000100))
            .await;
        assert!(result.is_err());
    }
}
