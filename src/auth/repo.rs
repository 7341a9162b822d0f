use async_trait::async_trait;

use super::repo_types::{NewUser, User, UserRow};
use crate::db::{PgDatabase, RepoError};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exact-match lookup on the stored (normalized) email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>, RepoError>;

    /// Fails with `RepoError::UniqueViolation` when the email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, RepoError>;

    /// Returns `false` when no user has that id.
    async fn update_password_hash(&self, id: i32, password_hash: &str) -> Result<bool, RepoError>;
}

#[async_trait]
impl UserRepository for PgDatabase {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, address, password_hash, role
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, address, password_hash, role
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, address, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, address, password_hash, role
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.address)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await?;
        User::try_from(row)
    }

    async fn update_password_hash(&self, id: i32, password_hash: &str) -> Result<bool, RepoError> {
        let res = sqlx::query(r#"UPDATE users SET password_hash = $1 WHERE id = $2"#)
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() == 1)
    }
}
