use serde::Serialize;
use sqlx::FromRow;

/// A rating known to be within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RatingValue(u8);

impl RatingValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
    }

    pub fn get(self) -> i32 {
        i32::from(self.0)
    }
}

/// Inputs to a mean: how many ratings and their total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct RatingStats {
    pub count: i64,
    pub sum: i64,
}

/// A rating on one of an owner's stores, with the rater's display name.
#[derive(Debug, Clone, FromRow)]
pub struct OwnerRatingRow {
    pub store_id: i32,
    pub store_name: String,
    pub user_name: String,
    pub rating: i32,
}
