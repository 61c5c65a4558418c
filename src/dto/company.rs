use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::company::{Company, NewCompany, UpdateCompany};
use crate::dto::PayloadError;

/// Externally exposed shape of a [`Company`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyDto {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub country: String,
    /// Address and country joined for display.
    pub full_address: String,
    /// Concurrency token callers must echo back on updates.
    pub version: i32,
}

impl From<Company> for CompanyDto {
    fn from(company: Company) -> Self {
        let full_address = format!("{} {}", company.address, company.country);
        Self {
            id: company.id,
            name: company.name,
            address: company.address,
            country: company.country,
            full_address,
            version: company.version,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
/// Payload for creating a company.
pub struct CompanyPayload {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 250))]
    pub address: String,
    #[validate(length(min = 1, max = 80))]
    pub country: String,
}

impl CompanyPayload {
    pub fn to_new_company(&self) -> NewCompany {
        NewCompany::new(self.name.clone(), self.address.clone(), self.country.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
/// Payload for replacing a company; `version` is the token last seen.
pub struct CompanyUpdatePayload {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 250))]
    pub address: String,
    #[validate(length(min = 1, max = 80))]
    pub country: String,
    pub version: i32,
}

impl CompanyUpdatePayload {
    pub fn to_update_company(&self) -> UpdateCompany {
        UpdateCompany::new(
            self.name.clone(),
            self.address.clone(),
            self.country.clone(),
            self.version,
        )
    }
}

impl From<&Company> for CompanyUpdatePayload {
    fn from(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            address: company.address.clone(),
            country: company.country.clone(),
            version: company.version,
        }
    }
}

/// Parses a comma-separated list of company identifiers.
pub fn parse_id_list(raw: &str) -> Result<Vec<Uuid>, PayloadError> {
    let ids = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Uuid::parse_str(s).map_err(|_| PayloadError::InvalidIdList))
        .collect::<Result<Vec<_>, _>>()?;

    if ids.is_empty() {
        return Err(PayloadError::InvalidIdList);
    }
    Ok(ids)
}
