use async_trait::async_trait;

use super::repo_types::{NewStore, Store, StoreListingRow};
use crate::db::{PgDatabase, RepoError};

#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Fails with `UniqueViolation` on a taken email and `ForeignKeyViolation`
    /// when the owner does not exist.
    async fn insert_store(&self, store: NewStore) -> Result<Store, RepoError>;

    /// Every store, ordered by name, with rating count/sum and `user_id`'s own rating.
    async fn list_stores_for_rater(&self, user_id: i32) -> Result<Vec<StoreListingRow>, RepoError>;
}

#[async_trait]
impl StoreRepository for PgDatabase {
    async fn insert_store(&self, store: NewStore) -> Result<Store, RepoError> {
        let row = sqlx::query_as::<_, Store>(
            r#"
            INSERT INTO stores (name, email, address, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, address, owner_id
            "#,
        )
        .bind(&store.name)
        .bind(&store.email)
        .bind(&store.address)
        .bind(store.owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_stores_for_rater(&self, user_id: i32) -> Result<Vec<StoreListingRow>, RepoError> {
        let rows = sqlx::query_as::<_, StoreListingRow>(
            r#"
            SELECT s.id, s.name, s.address,
                   COUNT(r.rating) AS rating_count,
                   COALESCE(SUM(r.rating), 0)::BIGINT AS rating_sum,
                   (SELECT ur.rating FROM ratings ur
                     WHERE ur.store_id = s.id AND ur.user_id = $1) AS user_rating
              FROM stores s
              LEFT JOIN ratings r ON r.store_id = s.id
             GROUP BY s.id, s.name, s.address
             ORDER BY s.name ASC, s.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
