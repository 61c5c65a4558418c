use actix_web::{HttpResponse, post, web};

use crate::dto::auth::{LoginPayload, RegisterPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::auth as auth_service;

#[post("/authentication")]
pub async fn register(
    repo: web::Data<DieselRepository>,
    payload: web::Json<RegisterPayload>,
) -> Result<HttpResponse, ServiceError> {
    auth_service::register(repo.get_ref(), &payload)?;
    Ok(HttpResponse::Created().finish())
}

#[post("/authentication/login")]
pub async fn login(
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    payload: web::Json<LoginPayload>,
) -> Result<HttpResponse, ServiceError> {
    let token = auth_service::login(repo.get_ref(), config.get_ref(), &payload)?;
    Ok(HttpResponse::Ok().json(token))
}
