use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::user::ADMIN_ROLE;
use crate::dto::company::{CompanyDto, CompanyPayload, CompanyUpdatePayload};
use crate::dto::merge_patch;
use crate::repository::{CompanyReader, CompanyWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists every company. Restricted to administrators.
pub fn list_companies<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<CompanyDto>>
where
    R: CompanyReader + ?Sized,
{
    if !user.has_role(ADMIN_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let companies = repo.list_companies().map_err(ServiceError::from)?;
    Ok(companies.into_iter().map(CompanyDto::from).collect())
}

/// Fetches a single company by id.
pub fn get_company<R>(repo: &R, id: Uuid) -> ServiceResult<CompanyDto>
where
    R: CompanyReader + ?Sized,
{
    repo.get_company_by_id(id)
        .map_err(ServiceError::from)?
        .map(CompanyDto::from)
        .ok_or(ServiceError::NotFound)
}

/// Fetches a collection of companies; any missing id fails the whole lookup.
pub fn get_company_collection<R>(repo: &R, ids: &[Uuid]) -> ServiceResult<Vec<CompanyDto>>
where
    R: CompanyReader + ?Sized,
{
    let companies = repo.get_companies_by_ids(ids).map_err(ServiceError::from)?;

    if companies.len() != ids.len() {
        log::info!("Some company ids in the requested collection do not exist");
        return Err(ServiceError::NotFound);
    }

    Ok(companies.into_iter().map(CompanyDto::from).collect())
}

/// Validates and persists a single new company.
pub fn create_company<R>(repo: &R, payload: &CompanyPayload) -> ServiceResult<CompanyDto>
where
    R: CompanyWriter + ?Sized,
{
    payload.validate()?;

    let created = repo
        .create_companies(&[payload.to_new_company()])
        .map_err(ServiceError::from)?;

    created
        .into_iter()
        .next()
        .map(CompanyDto::from)
        .ok_or_else(|| ServiceError::Internal("insert returned no rows".to_string()))
}

/// Validates and persists a batch of new companies in one transaction.
pub fn create_company_collection<R>(
    repo: &R,
    payloads: &[CompanyPayload],
) -> ServiceResult<Vec<CompanyDto>>
where
    R: CompanyWriter + ?Sized,
{
    if payloads.is_empty() {
        return Err(ServiceError::Validation(
            "company collection is empty".to_string(),
        ));
    }
    for payload in payloads {
        payload.validate()?;
    }

    let new_companies: Vec<_> = payloads.iter().map(CompanyPayload::to_new_company).collect();
    let created = repo
        .create_companies(&new_companies)
        .map_err(ServiceError::from)?;

    Ok(created.into_iter().map(CompanyDto::from).collect())
}

/// Replaces a company. The payload's `version` must match the stored one.
pub fn update_company<R>(
    repo: &R,
    id: Uuid,
    payload: &CompanyUpdatePayload,
) -> ServiceResult<CompanyDto>
where
    R: CompanyReader + CompanyWriter + ?Sized,
{
    payload.validate()?;

    repo.get_company_by_id(id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let updated = repo
        .update_company(id, &payload.to_update_company())
        .map_err(ServiceError::from)?;

    Ok(CompanyDto::from(updated))
}

/// Applies a JSON merge patch to a company's update shape, then stores it.
///
/// A patch that omits `version` inherits the current one; a stale `version`
/// in the patch is rejected the same way a stale PUT is.
pub fn patch_company<R>(repo: &R, id: Uuid, patch: &Value) -> ServiceResult<CompanyDto>
where
    R: CompanyReader + CompanyWriter + ?Sized,
{
    if !patch.is_object() {
        return Err(ServiceError::Validation(
            "patch document must be a JSON object".to_string(),
        ));
    }

    let company = repo
        .get_company_by_id(id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let mut document = serde_json::to_value(CompanyUpdatePayload::from(&company))
        .map_err(|e| ServiceError::Internal(e.to_string()))?;
    merge_patch(&mut document, patch);

    let payload: CompanyUpdatePayload = serde_json::from_value(document)
        .map_err(|e| ServiceError::Validation(e.to_string()))?;

    update_company(repo, id, &payload)
}

/// Deletes a company and all of its employees.
pub fn delete_company<R>(repo: &R, id: Uuid) -> ServiceResult<()>
where
    R: CompanyWriter + ?Sized,
{
    let deleted = repo.delete_company(id).map_err(ServiceError::from)?;
    if deleted == 0 {
        return Err(ServiceError::NotFound);
    }
    Ok(())
}
