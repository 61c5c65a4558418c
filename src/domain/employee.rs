use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: Uuid,
    /// Owning company; immutable after creation.
    pub company_id: Uuid,
    pub name: String,
    pub age: i32,
    pub position: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewEmployee {
    pub company_id: Uuid,
    pub name: String,
    pub age: i32,
    pub position: String,
}

impl NewEmployee {
    #[must_use]
    pub fn new(company_id: Uuid, name: String, age: i32, position: String) -> Self {
        Self {
            company_id,
            name: name.trim().to_string(),
            age,
            position: position.trim().to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateEmployee {
    pub name: String,
    pub age: i32,
    pub position: String,
}

impl UpdateEmployee {
    #[must_use]
    pub fn new(name: String, age: i32, position: String) -> Self {
        Self {
            name: name.trim().to_string(),
            age,
            position: position.trim().to_string(),
        }
    }
}
