use tracing::{info, instrument, warn};

use super::claims::{Identity, Role};
use super::jwt::JwtKeys;
use super::password::{burn_verification, hash_password, verify_password};
use super::repo::UserRepository;
use super::repo_types::{NewUser, User};
use super::validation::{
    normalize_email, require_fields, validate_address, validate_email, validate_password,
    validate_user_name,
};
use crate::db::RepoError;
use crate::error::AppError;

/// Unvalidated account details as submitted.
#[derive(Debug, Clone)]
pub struct AccountInput {
    pub name: String,
    pub email: String,
    pub address: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub role: Role,
}

fn validate_account(input: &AccountInput) -> Result<String, AppError> {
    require_fields(&[
        input.name.as_str(),
        input.email.as_str(),
        input.address.as_str(),
        input.password.as_str(),
    ])?;
    validate_user_name(&input.name)?;
    let email = normalize_email(&input.email);
    validate_email(&email)?;
    validate_address(&input.address)?;
    validate_password(&input.password)?;
    Ok(email)
}

fn map_insert_error(e: RepoError) -> AppError {
    match e {
        RepoError::UniqueViolation => AppError::DuplicateEmail,
        other => AppError::StorageUnavailable(other),
    }
}

async fn create_account<R>(repo: &R, input: AccountInput, role: Role) -> Result<User, AppError>
where
    R: UserRepository + ?Sized,
{
    let email = validate_account(&input)?;
    let password_hash = hash_password(&input.password)?;
    let user = repo
        .insert_user(NewUser {
            name: input.name,
            email,
            address: input.address,
            password_hash,
            role,
        })
        .await
        .map_err(map_insert_error)?;
    Ok(user)
}

/// Self-service registration. An unrecognised or absent role falls back to
/// `normal`; a recognised one is honoured as submitted.
#[instrument(skip(repo, input))]
pub async fn signup<R>(
    repo: &R,
    input: AccountInput,
    requested_role: Option<&str>,
) -> Result<Role, AppError>
where
    R: UserRepository + ?Sized,
{
    let role = requested_role.and_then(Role::parse).unwrap_or(Role::Normal);
    if role != Role::Normal {
        warn!(%role, "self-registration with elevated role");
    }

    let user = create_account(repo, input, role).await?;
    info!(user_id = user.id, %role, "user registered");
    Ok(user.role)
}

/// Admin-created account. The role is mandatory and must be one of the three roles.
#[instrument(skip(repo, input), fields(admin_id = admin.id))]
pub async fn create_user<R>(
    repo: &R,
    admin: &Identity,
    input: AccountInput,
    role: &str,
) -> Result<User, AppError>
where
    R: UserRepository + ?Sized,
{
    let role = Role::parse(role).ok_or_else(|| AppError::validation("Invalid role"))?;
    let user = create_account(repo, input, role).await?;
    info!(user_id = user.id, %role, "user added by admin");
    Ok(user)
}

#[instrument(skip(repo, keys, password))]
pub async fn login<R>(
    repo: &R,
    keys: &JwtKeys,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, AppError>
where
    R: UserRepository + ?Sized,
{
    let email = normalize_email(email);
    let Some(user) = repo.find_user_by_email(&email).await? else {
        burn_verification(password);
        warn!("login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let token = keys.sign(Identity {
        id: user.id,
        role: user.role,
    })?;
    info!(user_id = user.id, role = %user.role, "user logged in");
    Ok(LoginOutcome {
        token,
        role: user.role,
    })
}

/// Replaces the caller's password after re-checking the old one. Tokens
/// already issued stay valid until they expire.
#[instrument(skip(repo, old_password, new_password), fields(user_id = identity.id))]
pub async fn update_password<R>(
    repo: &R,
    identity: &Identity,
    old_password: &str,
    new_password: &str,
) -> Result<(), AppError>
where
    R: UserRepository + ?Sized,
{
    validate_password(new_password)
        .map_err(|_| AppError::validation("New password must meet requirements"))?;

    let user = repo
        .find_user_by_id(identity.id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    if !verify_password(old_password, &user.password_hash)? {
        warn!("update password with wrong old password");
        return Err(AppError::InvalidCredentials);
    }

    let password_hash = hash_password(new_password)?;
    if !repo.update_password_hash(user.id, &password_hash).await? {
        return Err(AppError::UserNotFound);
    }
    info!("password updated");
    Ok(())
}
