//! Role-scoped access control.
//!
//! `Authorized<R>` authenticates the bearer token and then checks the caller's
//! role against `R::ROLE`. A handler that takes it as an argument is never
//! reached by an unauthenticated or wrongly-scoped request.

use std::marker::PhantomData;
use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::claims::{Identity, Role};
use super::jwt::{AuthUser, JwtKeys};
use crate::error::AppError;

pub fn authorize(identity: &Identity, required: Role) -> Result<(), AppError> {
    if identity.role.satisfies(required) {
        Ok(())
    } else {
        warn!(user_id = identity.id, role = %identity.role, required = %required, "role check failed");
        Err(AppError::Forbidden)
    }
}

pub trait RequiredRole: Send + Sync + 'static {
    const ROLE: Role;
}

pub struct AdminOnly;
pub struct NormalOnly;
pub struct StoreOwnerOnly;

impl RequiredRole for AdminOnly {
    const ROLE: Role = Role::Admin;
}

impl RequiredRole for NormalOnly {
    const ROLE: Role = Role::Normal;
}

impl RequiredRole for StoreOwnerOnly {
    const ROLE: Role = Role::StoreOwner;
}

pub struct Authorized<R: RequiredRole> {
    pub identity: Identity,
    _role: PhantomData<R>,
}

#[axum::async_trait]
impl<S, R> FromRequestParts<S> for Authorized<R>
where
    S: Send + Sync,
    Arc<JwtKeys>: FromRef<S>,
    R: RequiredRole,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(identity) = AuthUser::from_request_parts(parts, state).await?;
        authorize(&identity, R::ROLE)?;
        Ok(Self {
            identity,
            _role: PhantomData,
        })
    }
}
