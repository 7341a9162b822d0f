//! Persistence seam.
//!
//! Each feature module declares the repository trait it needs (`UserRepository`,
//! `StoreRepository`, `RatingRepository`) and implements it for `PgDatabase`.
//! Handlers hold an `Arc<dyn Database>` so tests can swap in the in-memory
//! implementation.

use std::time::Duration;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;

use crate::auth::repo::UserRepository;
use crate::config::AppConfig;
use crate::ratings::repo::RatingRepository;
use crate::stores::repo::StoreRepository;

#[cfg(test)]
pub mod memory;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("unique constraint violated")]
    UniqueViolation,

    #[error("foreign key constraint violated")]
    ForeignKeyViolation,

    #[error("data corruption: {0}")]
    DataCorruption(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return RepoError::UniqueViolation;
            }
            if db_err.is_foreign_key_violation() {
                return RepoError::ForeignKeyViolation;
            }
        }
        RepoError::Database(e)
    }
}

pub trait Database: UserRepository + StoreRepository + RatingRepository {}

impl<T> Database for T where T: UserRepository + StoreRepository + RatingRepository {}

/// PostgreSQL-backed repositories.
#[derive(Clone)]
pub struct PgDatabase {
    pub(crate) pool: PgPool,
}

impl PgDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&config.database_url)
        .await
        .context("connect to database")
}
