use validator::Validate;

use crate::auth::{create_token, hash_password, verify_password};
use crate::domain::user::NewUser;
use crate::dto::auth::{LoginPayload, RegisterPayload, TokenDto};
use crate::models::config::ServerConfig;
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Registers a new API user; duplicate usernames surface as a conflict.
pub fn register<R>(repo: &R, payload: &RegisterPayload) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    payload.validate()?;

    let new_user = NewUser::new(
        payload.username.clone(),
        hash_password(&payload.password),
        payload.roles.clone(),
    );

    repo.create_user(&new_user).map_err(ServiceError::from)?;
    Ok(())
}

/// Exchanges valid credentials for a signed bearer token.
///
/// Bad username and bad password are indistinguishable to the caller.
pub fn login<R>(repo: &R, config: &ServerConfig, payload: &LoginPayload) -> ServiceResult<TokenDto>
where
    R: UserReader + ?Sized,
{
    payload.validate()?;

    let username = payload.username.trim().to_lowercase();
    let user = repo
        .get_user_by_username(&username)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::Unauthorized)?;

    if !verify_password(&payload.password, &user.password_hash) {
        log::warn!("Authentication failed for user {username}");
        return Err(ServiceError::Unauthorized);
    }

    let token = create_token(&user, &config.secret, config.token_ttl)
        .map_err(|e| ServiceError::Internal(e.to_string()))?;

    Ok(TokenDto { token })
}
