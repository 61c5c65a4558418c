use actix_web::{HttpResponse, delete, get, http::header, patch, post, put, web};
use serde_json::Value;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::dto::company::{CompanyPayload, CompanyUpdatePayload, parse_id_list};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::company as company_service;

#[get("/companies")]
pub async fn list_companies(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let companies = company_service::list_companies(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(companies))
}

#[get("/companies/collection/{ids}")]
pub async fn get_company_collection(
    _user: AuthenticatedUser,
    ids: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let ids = parse_id_list(&ids)?;
    let companies = company_service::get_company_collection(repo.get_ref(), &ids)?;
    Ok(HttpResponse::Ok().json(companies))
}

#[get("/companies/{id}")]
pub async fn get_company(
    _user: AuthenticatedUser,
    id: web::Path<Uuid>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let company = company_service::get_company(repo.get_ref(), id.into_inner())?;
    Ok(HttpResponse::Ok().json(company))
}

#[post("/companies")]
pub async fn create_company(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    payload: web::Json<CompanyPayload>,
) -> Result<HttpResponse, ServiceError> {
    let company = company_service::create_company(repo.get_ref(), &payload)?;
    Ok(HttpResponse::Created()
        .insert_header((
            header::LOCATION,
            format!("/api/v1/companies/{}", company.id),
        ))
        .json(company))
}

#[post("/companies/collection")]
pub async fn create_company_collection(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    payload: web::Json<Vec<CompanyPayload>>,
) -> Result<HttpResponse, ServiceError> {
    let companies = company_service::create_company_collection(repo.get_ref(), &payload)?;
    let ids = companies
        .iter()
        .map(|c| c.id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    Ok(HttpResponse::Created()
        .insert_header((
            header::LOCATION,
            format!("/api/v1/companies/collection/{ids}"),
        ))
        .json(companies))
}

#[put("/companies/{id}")]
pub async fn update_company(
    _user: AuthenticatedUser,
    id: web::Path<Uuid>,
    repo: web::Data<DieselRepository>,
    payload: web::Json<CompanyUpdatePayload>,
) -> Result<HttpResponse, ServiceError> {
    company_service::update_company(repo.get_ref(), id.into_inner(), &payload)?;
    Ok(HttpResponse::NoContent().finish())
}

#[patch("/companies/{id}")]
pub async fn patch_company(
    _user: AuthenticatedUser,
    id: web::Path<Uuid>,
    repo: web::Data<DieselRepository>,
    patch: web::Json<Value>,
) -> Result<HttpResponse, ServiceError> {
    company_service::patch_company(repo.get_ref(), id.into_inner(), &patch)?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/companies/{id}")]
pub async fn delete_company(
    _user: AuthenticatedUser,
    id: web::Path<Uuid>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    company_service::delete_company(repo.get_ref(), id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
