use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::employee::{Employee as DomainEmployee, NewEmployee as DomainNewEmployee};
use crate::models::company::Company;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::employees)]
#[diesel(belongs_to(Company, foreign_key = company_id))]
/// Diesel model for [`crate::domain::employee::Employee`].
pub struct Employee {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub age: i32,
    pub position: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::employees)]
/// Insertable form of [`Employee`].
pub struct NewEmployee<'a> {
    pub id: String,
    pub company_id: String,
    pub name: &'a str,
    pub age: i32,
    pub position: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::employees)]
/// Data used when updating an [`Employee`] record.
pub struct UpdateEmployee<'a> {
    pub name: &'a str,
    pub age: i32,
    pub position: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Employee> for DomainEmployee {
    type Error = uuid::Error;

    fn try_from(employee: Employee) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&employee.id)?,
            company_id: Uuid::parse_str(&employee.company_id)?,
            name: employee.name,
            age: employee.age,
            position: employee.position,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewEmployee> for NewEmployee<'a> {
    fn from(employee: &'a DomainNewEmployee) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            company_id: employee.company_id.to_string(),
            name: employee.name.as_str(),
            age: employee.age,
            position: employee.position.as_str(),
        }
    }
}
