use serde::{Deserialize, Serialize};

use crate::auth::services::AccountInput;
use crate::stores::services::StoreInput;

#[derive(Debug, Deserialize)]
pub struct AddUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

impl AddUserRequest {
    pub fn into_parts(self) -> (AccountInput, String) {
        (
            AccountInput {
                name: self.name,
                email: self.email,
                address: self.address,
                password: self.password,
            },
            self.role,
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct AddStoreRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub owner_id: Option<i32>,
}

impl From<AddStoreRequest> for StoreInput {
    fn from(r: AddStoreRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            address: r.address,
            owner_id: r.owner_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: i32,
}
