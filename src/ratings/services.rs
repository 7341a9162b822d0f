use tracing::{info, instrument};

use super::aggregate::average_rating_for_owner;
use super::repo::RatingRepository;
use super::repo_types::{OwnerRatingRow, RatingValue};
use crate::auth::claims::Identity;
use crate::db::RepoError;
use crate::error::AppError;

pub struct OwnerRatings {
    pub ratings: Vec<OwnerRatingRow>,
    pub average: Option<f64>,
}

/// Records `identity`'s rating for a store, replacing any earlier one.
/// The caller must already have been authorized as a normal user.
#[instrument(skip(repo), fields(user_id = identity.id))]
pub async fn submit_rating<R>(
    repo: &R,
    identity: &Identity,
    store_id: i32,
    value: i64,
) -> Result<RatingValue, AppError>
where
    R: RatingRepository + ?Sized,
{
    let value = RatingValue::new(value).ok_or(AppError::InvalidRating)?;

    repo.upsert_rating(identity.id, store_id, value)
        .await
        .map_err(|e| match e {
            RepoError::ForeignKeyViolation => AppError::StoreNotFound,
            other => AppError::StorageUnavailable(other),
        })?;

    info!(store_id, rating = value.get(), "rating recorded");
    Ok(value)
}

#[instrument(skip(repo), fields(owner_id = owner.id))]
pub async fn owner_ratings<R>(repo: &R, owner: &Identity) -> Result<OwnerRatings, AppError>
where
    R: RatingRepository + ?Sized,
{
    let ratings = repo.ratings_for_owner(owner.id).await?;
    let average = average_rating_for_owner(repo, owner.id).await?;
    Ok(OwnerRatings { ratings, average })
}
