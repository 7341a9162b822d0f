//! Mean ratings, recomputed from storage on every call.

use super::repo::RatingRepository;
use super::repo_types::RatingStats;
use crate::error::AppError;

impl RatingStats {
    /// `None` when nothing has been rated; never a made-up zero.
    pub fn average(self) -> Option<f64> {
        if self.count <= 0 {
            return None;
        }
        Some(self.sum as f64 / self.count as f64)
    }
}

pub async fn average_rating<R>(repo: &R, store_id: i32) -> Result<Option<f64>, AppError>
where
    R: RatingRepository + ?Sized,
{
    Ok(repo.rating_stats_for_store(store_id).await?.average())
}

/// Mean over all ratings of all stores owned by `owner_id`.
pub async fn average_rating_for_owner<R>(repo: &R, owner_id: i32) -> Result<Option<f64>, AppError>
where
    R: RatingRepository + ?Sized,
{
    Ok(repo.rating_stats_for_owner(owner_id).await?.average())
}
