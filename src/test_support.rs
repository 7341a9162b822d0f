use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::auth::claims::{Identity, Role};
use crate::auth::password::hash_password;
use crate::auth::repo::UserRepository;
use crate::auth::repo_types::NewUser;
use crate::db::memory::MemoryDatabase;
use crate::state::AppState;
use crate::stores::repo::StoreRepository;
use crate::stores::repo_types::NewStore;

pub const SEED_PASSWORD: &str = "Seed!Pass1";

pub fn fake_state() -> (AppState, Arc<MemoryDatabase>) {
    let db = Arc::new(MemoryDatabase::new());
    (AppState::fake_with(db.clone()), db)
}

/// Inserts a user and returns its id with a freshly signed token.
pub async fn seed_user(
    state: &AppState,
    db: &MemoryDatabase,
    email: &str,
    role: Role,
) -> (i32, String) {
    let user = db
        .insert_user(NewUser {
            name: "Seeded Account Holder".into(),
            email: email.into(),
            address: "1 Seed Lane".into(),
            password_hash: hash_password(SEED_PASSWORD).unwrap(),
            role,
        })
        .await
        .unwrap();
    let token = state
        .keys
        .sign(Identity {
            id: user.id,
            role: user.role,
        })
        .unwrap();
    (user.id, token)
}

pub async fn seed_store(db: &MemoryDatabase, owner_id: i32, email: &str) -> i32 {
    db.insert_store(NewStore {
        name: format!("Store {email}"),
        email: email.into(),
        address: "High Street".into(),
        owner_id,
    })
    .await
    .unwrap()
    .id
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(json) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => req.body(Body::empty()),
    }
    .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

/// Sends `body` verbatim, with a JSON content type only when `json_header` is set.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    json_header: bool,
    body: &'static str,
) -> Response {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    if json_header {
        req = req.header(header::CONTENT_TYPE, "application/json");
    }
    let req = req.body(Body::from(body)).unwrap();
    app.clone().oneshot(req).await.unwrap()
}

pub async fn read_json(res: Response) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
