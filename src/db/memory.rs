use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::RepoError;
use crate::auth::repo::UserRepository;
use crate::auth::repo_types::{NewUser, User};
use crate::ratings::repo::RatingRepository;
use crate::ratings::repo_types::{OwnerRatingRow, RatingStats, RatingValue};
use crate::stores::repo::StoreRepository;
use crate::stores::repo_types::{NewStore, Store, StoreListingRow};

/// Same constraints as the SQL schema: unique emails, foreign keys on
/// ratings and store owners, one rating per `(user, store)`.
#[derive(Default)]
pub struct MemoryDatabase {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: BTreeMap<i32, User>,
    stores: BTreeMap<i32, Store>,
    ratings: BTreeMap<(i32, i32), RatingValue>,
    next_user_id: i32,
    next_store_id: i32,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn rating_rows(&self, user_id: i32, store_id: i32) -> usize {
        let inner = self.inner.read().await;
        inner
            .ratings
            .keys()
            .filter(|(u, s)| *u == user_id && *s == store_id)
            .count()
    }

    pub async fn find_rating(&self, user_id: i32, store_id: i32) -> Option<i32> {
        let inner = self.inner.read().await;
        inner.ratings.get(&(user_id, store_id)).map(|v| v.get())
    }
}

fn stats<'a>(values: impl Iterator<Item = &'a RatingValue>) -> RatingStats {
    values.fold(RatingStats::default(), |acc, v| RatingStats {
        count: acc.count + 1,
        sum: acc.sum + i64::from(v.get()),
    })
}

#[async_trait]
impl UserRepository for MemoryDatabase {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, RepoError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(RepoError::UniqueViolation);
        }
        inner.next_user_id += 1;
        let created = User {
            id: inner.next_user_id,
            name: user.name,
            email: user.email,
            address: user.address,
            password_hash: user.password_hash,
            role: user.role,
        };
        inner.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_password_hash(&self, id: i32, password_hash: &str) -> Result<bool, RepoError> {
        let mut inner = self.inner.write().await;
        match inner.users.get_mut(&id) {
            Some(u) => {
                u.password_hash = password_hash.to_owned();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl StoreRepository for MemoryDatabase {
    async fn insert_store(&self, store: NewStore) -> Result<Store, RepoError> {
        let mut inner = self.inner.write().await;
        if inner.stores.values().any(|s| s.email == store.email) {
            return Err(RepoError::UniqueViolation);
        }
        if !inner.users.contains_key(&store.owner_id) {
            return Err(RepoError::ForeignKeyViolation);
        }
        inner.next_store_id += 1;
        let created = Store {
            id: inner.next_store_id,
            name: store.name,
            email: store.email,
            address: store.address,
            owner_id: Some(store.owner_id),
        };
        inner.stores.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_stores_for_rater(&self, user_id: i32) -> Result<Vec<StoreListingRow>, RepoError> {
        let inner = self.inner.read().await;
        let mut rows: Vec<StoreListingRow> = inner
            .stores
            .values()
            .map(|s| {
                let st = stats(
                    inner
                        .ratings
                        .iter()
                        .filter(|((_, store), _)| *store == s.id)
                        .map(|(_, v)| v),
                );
                StoreListingRow {
                    id: s.id,
                    name: s.name.clone(),
                    address: s.address.clone(),
                    rating_count: st.count,
                    rating_sum: st.sum,
                    user_rating: inner.ratings.get(&(user_id, s.id)).map(|v| v.get()),
                }
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(rows)
    }
}

#[async_trait]
impl RatingRepository for MemoryDatabase {
    async fn upsert_rating(
        &self,
        user_id: i32,
        store_id: i32,
        value: RatingValue,
    ) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&user_id) || !inner.stores.contains_key(&store_id) {
            return Err(RepoError::ForeignKeyViolation);
        }
        inner.ratings.insert((user_id, store_id), value);
        Ok(())
    }

    async fn rating_stats_for_store(&self, store_id: i32) -> Result<RatingStats, RepoError> {
        let inner = self.inner.read().await;
        Ok(stats(
            inner
                .ratings
                .iter()
                .filter(|((_, store), _)| *store == store_id)
                .map(|(_, v)| v),
        ))
    }

    async fn rating_stats_for_owner(&self, owner_id: i32) -> Result<RatingStats, RepoError> {
        let inner = self.inner.read().await;
        Ok(stats(
            inner
                .ratings
                .iter()
                .filter(|((_, store), _)| {
                    inner
                        .stores
                        .get(store)
                        .is_some_and(|s| s.owner_id == Some(owner_id))
                })
                .map(|(_, v)| v),
        ))
    }

    async fn ratings_for_owner(&self, owner_id: i32) -> Result<Vec<OwnerRatingRow>, RepoError> {
        let inner = self.inner.read().await;
        let mut rows: Vec<OwnerRatingRow> = inner
            .ratings
            .iter()
            .filter_map(|((user_id, store_id), v)| {
                let store = inner.stores.get(store_id)?;
                if store.owner_id != Some(owner_id) {
                    return None;
                }
                let user = inner.users.get(user_id)?;
                Some(OwnerRatingRow {
                    store_id: store.id,
                    store_name: store.name.clone(),
                    user_name: user.name.clone(),
                    rating: v.get(),
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            a.store_name
                .cmp(&b.store_name)
                .then_with(|| a.user_name.cmp(&b.user_name))
        });
        Ok(rows)
    }
}
