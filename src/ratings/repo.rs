use async_trait::async_trait;

use super::repo_types::{OwnerRatingRow, RatingStats, RatingValue};
use crate::db::{PgDatabase, RepoError};

#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Insert-or-overwrite keyed on `(user_id, store_id)` as one atomic write.
    /// Fails with `ForeignKeyViolation` when the store (or user) does not exist.
    async fn upsert_rating(
        &self,
        user_id: i32,
        store_id: i32,
        value: RatingValue,
    ) -> Result<(), RepoError>;

    async fn rating_stats_for_store(&self, store_id: i32) -> Result<RatingStats, RepoError>;

    /// Stats over every rating of every store owned by `owner_id`.
    async fn rating_stats_for_owner(&self, owner_id: i32) -> Result<RatingStats, RepoError>;

    async fn ratings_for_owner(&self, owner_id: i32) -> Result<Vec<OwnerRatingRow>, RepoError>;
}

#[async_trait]
impl RatingRepository for PgDatabase {
    async fn upsert_rating(
        &self,
        user_id: i32,
        store_id: i32,
        value: RatingValue,
    ) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO ratings (user_id, store_id, rating)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, store_id) DO UPDATE SET rating = EXCLUDED.rating
            "#,
        )
        .bind(user_id)
        .bind(store_id)
        .bind(value.get())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn rating_stats_for_store(&self, store_id: i32) -> Result<RatingStats, RepoError> {
        let stats = sqlx::query_as::<_, RatingStats>(
            r#"
            SELECT COUNT(*) AS count, COALESCE(SUM(rating), 0)::BIGINT AS sum
              FROM ratings
             WHERE store_id = $1
            "#,
        )
        .bind(store_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    async fn rating_stats_for_owner(&self, owner_id: i32) -> Result<RatingStats, RepoError> {
        let stats = sqlx::query_as::<_, RatingStats>(
            r#"
            SELECT COUNT(r.rating) AS count, COALESCE(SUM(r.rating), 0)::BIGINT AS sum
              FROM ratings r
              JOIN stores s ON s.id = r.store_id
             WHERE s.owner_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    async fn ratings_for_owner(&self, owner_id: i32) -> Result<Vec<OwnerRatingRow>, RepoError> {
        let rows = sqlx::query_as::<_, OwnerRatingRow>(
            r#"
            SELECT s.id AS store_id, s.name AS store_name, u.name AS user_name, r.rating
              FROM ratings r
              JOIN users u ON u.id = r.user_id
              JOIN stores s ON s.id = r.store_id
             WHERE s.owner_id = $1
             ORDER BY s.name ASC, u.name ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
