use serde::{Deserialize, Serialize};

use super::repo_types::OwnerRatingRow;

/// `rating` is kept loose so non-integers and wrong types surface as
/// `InvalidRating` instead of a deserialization rejection. Whole-valued
/// floats such as `4.0` count as integers.
#[derive(Debug, Deserialize)]
pub struct SubmitRatingRequest {
    #[serde(default)]
    pub rating: Option<serde_json::Value>,
}

impl SubmitRatingRequest {
    pub fn integer(&self) -> Option<i64> {
        let value = self.rating.as_ref()?;
        value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingResponse {
    pub message: &'static str,
    pub rating: i32,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRatingItem {
    pub store_id: i32,
    pub store_name: String,
    pub name: String,
    pub rating: i32,
}

impl From<OwnerRatingRow> for OwnerRatingItem {
    fn from(r: OwnerRatingRow) -> Self {
        Self {
            store_id: r.store_id,
            store_name: r.store_name,
            name: r.user_name,
            rating: r.rating,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRatingsResponse {
    pub ratings: Vec<OwnerRatingItem>,
    pub average_rating: Option<f64>,
}
