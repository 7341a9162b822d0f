use tracing::{info, instrument};

use super::repo::StoreRepository;
use super::repo_types::{NewStore, Store};
use crate::auth::claims::{Identity, Role};
use crate::auth::repo::UserRepository;
use crate::auth::validation::{normalize_email, require_fields, validate_address, validate_email};
use crate::db::RepoError;
use crate::error::AppError;
use crate::ratings::repo_types::RatingStats;

pub const STORE_NAME_MAX: usize = 60;

#[derive(Debug, Clone)]
pub struct StoreInput {
    pub name: String,
    pub email: String,
    pub address: String,
    pub owner_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct StoreSummary {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub overall_rating: Option<f64>,
    pub user_rating: Option<i32>,
}

#[instrument(skip(repo, input), fields(admin_id = admin.id))]
pub async fn create_store<R>(repo: &R, admin: &Identity, input: StoreInput) -> Result<Store, AppError>
where
    R: UserRepository + StoreRepository + ?Sized,
{
    require_fields(&[input.name.as_str(), input.email.as_str(), input.address.as_str()])?;
    if input.name.chars().count() > STORE_NAME_MAX {
        return Err(AppError::validation(format!(
            "Store name must be at most {STORE_NAME_MAX} characters"
        )));
    }
    let email = normalize_email(&input.email);
    validate_email(&email)?;
    validate_address(&input.address)?;
    let owner_id = input
        .owner_id
        .ok_or_else(|| AppError::validation("owner_id is required"))?;

    let owner = repo.find_user_by_id(owner_id).await?;
    if !owner.is_some_and(|u| u.role == Role::StoreOwner) {
        return Err(AppError::validation("Owner must be an existing store owner"));
    }

    let store = repo
        .insert_store(NewStore {
            name: input.name,
            email,
            address: input.address,
            owner_id,
        })
        .await
        .map_err(|e| match e {
            RepoError::UniqueViolation => AppError::DuplicateEmail,
            RepoError::ForeignKeyViolation => {
                AppError::validation("Owner must be an existing store owner")
            }
            other => AppError::StorageUnavailable(other),
        })?;
    info!(store_id = store.id, name = %store.name, owner_id, "store added");
    Ok(store)
}

/// All stores with their current mean rating and the viewer's own rating.
#[instrument(skip(repo), fields(user_id = viewer.id))]
pub async fn list_stores<R>(repo: &R, viewer: &Identity) -> Result<Vec<StoreSummary>, AppError>
where
    R: StoreRepository + ?Sized,
{
    let rows = repo.list_stores_for_rater(viewer.id).await?;
    Ok(rows
        .into_iter()
        .map(|r| StoreSummary {
            id: r.id,
            name: r.name,
            address: r.address,
            overall_rating: RatingStats {
                count: r.rating_count,
                sum: r.rating_sum,
            }
            .average(),
            user_rating: r.user_rating,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo_types::NewUser;
    use crate::db::memory::MemoryDatabase;
    use crate::ratings::services::submit_rating;

    async fn user(db: &MemoryDatabase, email: &str, role: Role) -> Identity {
        let u = db
            .insert_user(NewUser {
                name: "Seeded Account Holder".into(),
                email: email.into(),
                address: "x".into(),
                password_hash: "unused".into(),
                role,
            })
            .await
            .unwrap();
        Identity { id: u.id, role: u.role }
    }

    fn input(email: &str, owner_id: i32) -> StoreInput {
        StoreInput {
            name: "Corner Bakery".into(),
            email: email.into(),
            address: "4 Baker Row".into(),
            owner_id: Some(owner_id),
        }
    }

    #[tokio::test]
    async fn owner_must_be_store_owner() {
        let db = MemoryDatabase::new();
        let admin = user(&db, "admin@example.com", Role::Admin).await;
        let normal = user(&db, "n@example.com", Role::Normal).await;

        let res = create_store(&db, &admin, input("s@example.com", normal.id)).await;
        assert!(matches!(res, Err(AppError::ValidationFailed(_))));

        let res = create_store(&db, &admin, input("s@example.com", 999)).await;
        assert!(matches!(res, Err(AppError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn duplicate_store_email() {
        let db = MemoryDatabase::new();
        let admin = user(&db, "admin@example.com", Role::Admin).await;
        let owner = user(&db, "o@example.com", Role::StoreOwner).await;
        create_store(&db, &admin, input("s@example.com", owner.id)).await.unwrap();
        let res = create_store(&db, &admin, input("S@example.com", owner.id)).await;
        assert!(matches!(res, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn listing_reports_averages_and_own_rating() {
        let db = MemoryDatabase::new();
        let admin = user(&db, "admin@example.com", Role::Admin).await;
        let owner = user(&db, "o@example.com", Role::StoreOwner).await;
        let me = user(&db, "me@example.com", Role::Normal).await;
        let other = user(&db, "other@example.com", Role::Normal).await;

        let rated = create_store(&db, &admin, input("a@example.com", owner.id)).await.unwrap();
        let mut unrated_input = input("b@example.com", owner.id);
        unrated_input.name = "Zebra Hardware".into();
        let unrated = create_store(&db, &admin, unrated_input).await.unwrap();

        submit_rating(&db, &me, rated.id, 3).await.unwrap();
        submit_rating(&db, &other, rated.id, 5).await.unwrap();

        let list = list_stores(&db, &me).await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, rated.id);
        assert_eq!(list[0].overall_rating, Some(4.0));
        assert_eq!(list[0].user_rating, Some(3));
        assert_eq!(list[1].id, unrated.id);
        assert_eq!(list[1].overall_rating, None);
        assert_eq!(list[1].user_rating, None);
    }
}
