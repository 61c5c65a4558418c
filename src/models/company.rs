use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::company::{Company as DomainCompany, NewCompany as DomainNewCompany};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::companies)]
/// Diesel model for [`crate::domain::company::Company`].
pub struct Company {
    pub id: String,
    pub name: String,
    pub address: String,
    pub country: String,
    pub version: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::companies)]
/// Insertable form of [`Company`].
pub struct NewCompany<'a> {
    pub id: String,
    pub name: &'a str,
    pub address: &'a str,
    pub country: &'a str,
    pub version: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::companies)]
/// Data used when updating a [`Company`] record.
pub struct UpdateCompany<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub country: &'a str,
    pub version: i32,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Company> for DomainCompany {
    type Error = uuid::Error;

    fn try_from(company: Company) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&company.id)?,
            name: company.name,
            address: company.address,
            country: company.country,
            version: company.version,
            created_at: company.created_at,
            updated_at: company.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewCompany> for NewCompany<'a> {
    fn from(company: &'a DomainNewCompany) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: company.name.as_str(),
            address: company.address.as_str(),
            country: company.country.as_str(),
            version: 1,
        }
    }
}
