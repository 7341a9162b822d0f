use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Store {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub address: String,
    pub owner_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewStore {
    pub name: String,
    pub email: String,
    pub address: String,
    pub owner_id: i32,
}

/// One store as seen by a rater: aggregate inputs plus the rater's own value.
#[derive(Debug, Clone, FromRow)]
pub struct StoreListingRow {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub rating_count: i64,
    pub rating_sum: i64,
    pub user_rating: Option<i32>,
}
