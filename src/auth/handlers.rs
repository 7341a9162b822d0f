use axum::{
    extract::State,
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{
        LoginRequest, LoginResponse, MessageResponse, SignupRequest, SignupResponse,
        UpdatePasswordRequest,
    },
    jwt::AuthUser,
    services,
};
use crate::{error::AppError, extract::JsonBody, state::AppState};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/update-password", put(update_password))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let (input, requested_role) = payload.into_parts();
    let role = services::signup(&*state.db, input, requested_role.as_deref()).await?;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User registered successfully",
            role,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let out = services::login(&*state.db, &state.keys, &payload.email, &payload.password).await?;
    Ok(Json(LoginResponse {
        token: out.token,
        role: out.role,
        expires_in: state.keys.ttl().as_secs(),
    }))
}

#[instrument(skip(state, payload), fields(user_id = identity.id))]
pub async fn update_password(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    JsonBody(payload): JsonBody<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    services::update_password(
        &*state.db,
        &identity,
        &payload.old_password,
        &payload.new_password,
    )
    .await?;
    Ok(Json(MessageResponse {
        message: "Password updated successfully",
    }))
}
