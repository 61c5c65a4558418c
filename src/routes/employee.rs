use actix_web::{HttpResponse, delete, get, http::header, patch, post, put, web};
use serde_json::Value;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::dto::employee::{EmployeeListParams, EmployeePayload};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::employee as employee_service;

/// Name of the response header carrying serialized page metadata.
pub const PAGINATION_HEADER: &str = "X-Pagination";

#[get("/companies/{company_id}/employees")]
pub async fn list_employees(
    _user: AuthenticatedUser,
    company_id: web::Path<Uuid>,
    params: web::Query<EmployeeListParams>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = employee_service::list_employees(repo.get_ref(), company_id.into_inner(), &params)?;

    let metadata = serde_json::to_string(&page.metadata)
        .map_err(|e| ServiceError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok()
        .insert_header((PAGINATION_HEADER, metadata))
        .json(page.items))
}

#[get("/companies/{company_id}/employees/{id}")]
pub async fn get_employee(
    _user: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let (company_id, id) = path.into_inner();
    let employee = employee_service::get_employee(repo.get_ref(), company_id, id)?;
    Ok(HttpResponse::Ok().json(employee))
}

#[post("/companies/{company_id}/employees")]
pub async fn create_employee(
    _user: AuthenticatedUser,
    company_id: web::Path<Uuid>,
    repo: web::Data<DieselRepository>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, ServiceError> {
    let company_id = company_id.into_inner();
    let employee = employee_service::create_employee(repo.get_ref(), company_id, &payload)?;
    Ok(HttpResponse::Created()
        .insert_header((
            header::LOCATION,
            format!("/api/v1/companies/{company_id}/employees/{}", employee.id),
        ))
        .json(employee))
}

#[put("/companies/{company_id}/employees/{id}")]
pub async fn update_employee(
    _user: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
    repo: web::Data<DieselRepository>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, ServiceError> {
    let (company_id, id) = path.into_inner();
    employee_service::update_employee(repo.get_ref(), company_id, id, &payload)?;
    Ok(HttpResponse::NoContent().finish())
}

#[patch("/companies/{company_id}/employees/{id}")]
pub async fn patch_employee(
    _user: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
    repo: web::Data<DieselRepository>,
    patch: web::Json<Value>,
) -> Result<HttpResponse, ServiceError> {
    let (company_id, id) = path.into_inner();
    employee_service::patch_employee(repo.get_ref(), company_id, id, &patch)?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/companies/{company_id}/employees/{id}")]
pub async fn delete_employee(
    _user: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let (company_id, id) = path.into_inner();
    employee_service::delete_employee(repo.get_ref(), company_id, id)?;
    Ok(HttpResponse::NoContent().finish())
}
