use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::instrument;

use super::dto::{AddStoreRequest, AddUserRequest, CreatedResponse};
use crate::{
    auth::{
        guard::{AdminOnly, Authorized},
        services::create_user,
    },
    error::AppError,
    extract::JsonBody,
    state::AppState,
    stores::services::create_store,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", post(add_user))
        .route("/admin/stores", post(add_store))
}

#[instrument(skip(state, auth, payload), fields(admin_id = auth.identity.id))]
pub async fn add_user(
    State(state): State<AppState>,
    auth: Authorized<AdminOnly>,
    JsonBody(payload): JsonBody<AddUserRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let (input, role) = payload.into_parts();
    let user = create_user(&*state.db, &auth.identity, input, &role).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "User added successfully",
            id: user.id,
        }),
    ))
}

#[instrument(skip(state, auth, payload), fields(admin_id = auth.identity.id))]
pub async fn add_store(
    State(state): State<AppState>,
    auth: Authorized<AdminOnly>,
    JsonBody(payload): JsonBody<AddStoreRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let store = create_store(&*state.db, &auth.identity, payload.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Store added successfully",
            id: store.id,
        }),
    ))
}
