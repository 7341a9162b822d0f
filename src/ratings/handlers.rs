use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, instrument};

use super::{
    dto::{OwnerRatingsResponse, SubmitRatingRequest, SubmitRatingResponse},
    aggregate, services,
};
use crate::{
    auth::guard::{Authorized, NormalOnly, StoreOwnerOnly},
    error::AppError,
    extract::PathParam,
    state::AppState,
};

pub fn rating_routes() -> Router<AppState> {
    Router::new().route("/user/stores/:store_id/rating", post(submit_rating))
}

pub fn owner_routes() -> Router<AppState> {
    Router::new().route("/store/ratings", get(owner_ratings))
}

#[instrument(skip(state, auth, payload), fields(user_id = auth.identity.id))]
pub async fn submit_rating(
    State(state): State<AppState>,
    auth: Authorized<NormalOnly>,
    PathParam(store_id): PathParam<i32>,
    payload: Result<Json<SubmitRatingRequest>, JsonRejection>,
) -> Result<Json<SubmitRatingResponse>, AppError> {
    let value = match payload {
        Ok(Json(body)) => body.integer(),
        Err(rejection) => {
            debug!(error = %rejection, "rating body rejected");
            None
        }
    }
    .ok_or(AppError::InvalidRating)?;
    let stored = services::submit_rating(&*state.db, &auth.identity, store_id, value).await?;
    let average = aggregate::average_rating(&*state.db, store_id).await?;
    Ok(Json(SubmitRatingResponse {
        message: "Rating submitted successfully",
        rating: stored.get(),
        average_rating: average,
    }))
}

#[instrument(skip(state, auth), fields(owner_id = auth.identity.id))]
pub async fn owner_ratings(
    State(state): State<AppState>,
    auth: Authorized<StoreOwnerOnly>,
) -> Result<Json<OwnerRatingsResponse>, AppError> {
    let dash = services::owner_ratings(&*state.db, &auth.identity).await?;
    Ok(Json(OwnerRatingsResponse {
        ratings: dash.ratings.into_iter().map(Into::into).collect(),
        average_rating: dash.average,
    }))
}
