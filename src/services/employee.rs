use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::domain::employee::Employee;
use crate::dto::employee::{EmployeeDto, EmployeeListParams, EmployeePayload};
use crate::dto::merge_patch;
use crate::pagination::PageMetadata;
use crate::repository::{
    CompanyReader, EmployeeListQuery, EmployeeReader, EmployeeWriter,
};
use crate::services::{ServiceError, ServiceResult};
use crate::shaping::shape_employees;

/// One page of shaped employees plus the paging metadata for the
/// `X-Pagination` header.
#[derive(Debug)]
pub struct EmployeePage {
    pub items: Vec<Map<String, Value>>,
    pub metadata: PageMetadata,
}

/// Lists a company's employees: normalize, push the query down, shape.
pub fn list_employees<R>(
    repo: &R,
    company_id: Uuid,
    params: &EmployeeListParams,
) -> ServiceResult<EmployeePage>
where
    R: CompanyReader + EmployeeReader + ?Sized,
{
    let options = params.normalize()?;

    repo.get_company_by_id(company_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let query = EmployeeListQuery::new(company_id)
        .age_range(options.min_age, options.max_age)
        .sort(options.sort)
        .paginate(options.page, options.per_page);
    let query = match &options.search {
        Some(term) => query.search(term.clone()),
        None => query,
    };

    let (total, employees) = repo.list_employees(query).map_err(ServiceError::from)?;

    Ok(EmployeePage {
        items: shape_employees(&employees, &options.fields),
        metadata: PageMetadata::new(options.page, options.per_page, total),
    })
}

/// Fetches one employee, treating membership in another company as absence.
pub fn get_employee<R>(repo: &R, company_id: Uuid, id: Uuid) -> ServiceResult<EmployeeDto>
where
    R: EmployeeReader + ?Sized,
{
    employee_for_company(repo, company_id, id).map(EmployeeDto::from)
}

/// Creates an employee under an existing company.
pub fn create_employee<R>(
    repo: &R,
    company_id: Uuid,
    payload: &EmployeePayload,
) -> ServiceResult<EmployeeDto>
where
    R: CompanyReader + EmployeeWriter + ?Sized,
{
    payload.validate()?;

    repo.get_company_by_id(company_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let created = repo
        .create_employee(&payload.to_new_employee(company_id))
        .map_err(ServiceError::from)?;

    Ok(EmployeeDto::from(created))
}

/// Replaces an employee's mutable fields.
pub fn update_employee<R>(
    repo: &R,
    company_id: Uuid,
    id: Uuid,
    payload: &EmployeePayload,
) -> ServiceResult<EmployeeDto>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    payload.validate()?;

    employee_for_company(repo, company_id, id)?;

    let updated = repo
        .update_employee(id, &payload.to_update_employee())
        .map_err(ServiceError::from)?;

    Ok(EmployeeDto::from(updated))
}

/// Applies a JSON merge patch to the employee's update shape, then stores it.
pub fn patch_employee<R>(
    repo: &R,
    company_id: Uuid,
    id: Uuid,
    patch: &Value,
) -> ServiceResult<EmployeeDto>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    if !patch.is_object() {
        return Err(ServiceError::Validation(
            "patch document must be a JSON object".to_string(),
        ));
    }

    let employee = employee_for_company(repo, company_id, id)?;

    let mut document = serde_json::to_value(EmployeePayload::from(&employee))
        .map_err(|e| ServiceError::Internal(e.to_string()))?;
    merge_patch(&mut document, patch);

    let payload: EmployeePayload = serde_json::from_value(document)
        .map_err(|e| ServiceError::Validation(e.to_string()))?;
    payload.validate()?;

    let updated = repo
        .update_employee(id, &payload.to_update_employee())
        .map_err(ServiceError::from)?;

    Ok(EmployeeDto::from(updated))
}

/// Deletes one employee of the given company.
pub fn delete_employee<R>(repo: &R, company_id: Uuid, id: Uuid) -> ServiceResult<()>
where
    R: EmployeeReader + EmployeeWriter + ?Sized,
{
    employee_for_company(repo, company_id, id)?;

    let deleted = repo.delete_employee(id).map_err(ServiceError::from)?;
    if deleted == 0 {
        return Err(ServiceError::NotFound);
    }
    Ok(())
}

fn employee_for_company<R>(repo: &R, company_id: Uuid, id: Uuid) -> ServiceResult<Employee>
where
    R: EmployeeReader + ?Sized,
{
    let employee = repo
        .get_employee_by_id(id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if employee.company_id != company_id {
        return Err(ServiceError::NotFound);
    }
    Ok(employee)
}
