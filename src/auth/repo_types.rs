use sqlx::FromRow;

use super::claims::Role;
use crate::db::RepoError;

/// User record.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub address: String,
    pub password_hash: String, // argon2 PHC string
    pub role: Role,
}

/// Values needed to create a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub address: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub address: String,
    pub password_hash: String,
    pub role: String,
}

impl TryFrom<UserRow> for User {
    type Error = RepoError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let role = Role::parse(&r.role).ok_or_else(|| {
            RepoError::DataCorruption(format!("unknown role {:?} for user {}", r.role, r.id))
        })?;
        Ok(Self {
            id: r.id,
            name: r.name,
            email: r.email,
            address: r.address,
            password_hash: r.password_hash,
            role,
        })
    }
}
