use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::{dto::StoreListItem, services};
use crate::{
    auth::guard::{Authorized, NormalOnly},
    error::AppError,
    state::AppState,
};

pub fn store_routes() -> Router<AppState> {
    Router::new().route("/user/stores", get(list_stores))
}

#[instrument(skip(state, auth), fields(user_id = auth.identity.id))]
pub async fn list_stores(
    State(state): State<AppState>,
    auth: Authorized<NormalOnly>,
) -> Result<Json<Vec<StoreListItem>>, AppError> {
    let stores = services::list_stores(&*state.db, &auth.identity).await?;
    Ok(Json(stores.into_iter().map(Into::into).collect()))
}
