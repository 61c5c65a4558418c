use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub country: String,
    /// Optimistic-concurrency token, incremented on every successful update.
    pub version: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCompany {
    pub name: String,
    pub address: String,
    pub country: String,
}

impl NewCompany {
    #[must_use]
    pub fn new(name: String, address: String, country: String) -> Self {
        Self {
            name: name.trim().to_string(),
            address: address.trim().to_string(),
            country: country.trim().to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateCompany {
    pub name: String,
    pub address: String,
    pub country: String,
    /// Version the caller last saw; a mismatch rejects the write.
    pub expected_version: i32,
}

impl UpdateCompany {
    #[must_use]
    pub fn new(name: String, address: String, country: String, expected_version: i32) -> Self {
        Self {
            name: name.trim().to_string(),
            address: address.trim().to_string(),
            country: country.trim().to_string(),
            expected_version,
        }
    }
}
