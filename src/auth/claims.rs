use std::fmt;

use serde::{Deserialize, Serialize};

/// Account role. The only input to authorization decisions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Normal,
    StoreOwner,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Normal => "normal",
            Role::StoreOwner => "store_owner",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "normal" => Some(Role::Normal),
            "store_owner" => Some(Role::StoreOwner),
            _ => None,
        }
    }

    /// Exact match only: no role implies another.
    pub fn satisfies(self, required: Role) -> bool {
        match (self, required) {
            (Role::Admin, Role::Admin)
            | (Role::Normal, Role::Normal)
            | (Role::StoreOwner, Role::StoreOwner) => true,
            (Role::Admin, Role::Normal | Role::StoreOwner)
            | (Role::Normal, Role::Admin | Role::StoreOwner)
            | (Role::StoreOwner, Role::Admin | Role::Normal) => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is making the request, as proven by a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub id: i32,
    pub role: Role,
}

/// JWT payload. Carries identity only, never profile data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,     // user ID
    pub role: Role,  // role at issue time
    pub iat: usize,  // issued at (unix timestamp)
    pub exp: usize,  // expires at (unix timestamp)
    pub iss: String, // issuer
    pub aud: String, // audience
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            role: self.role,
        }
    }
}
