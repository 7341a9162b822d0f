use serde::Serialize;

use super::services::StoreSummary;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreListItem {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub overall_rating: Option<f64>,
    pub user_rating: Option<i32>,
}

impl From<StoreSummary> for StoreListItem {
    fn from(s: StoreSummary) -> Self {
        Self {
            id: s.id,
            name: s.name,
            address: s.address,
            overall_rating: s.overall_rating,
            user_rating: s.user_rating,
        }
    }
}
