use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::error::Result;
use crate::middleware::auth::CurrentUser;
use crate::models::user::User;
use crate::AppState;

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let Json(req) = payload?;
    req.validate()?;
    let resp = state.auth_service.register(req).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>> {
    let Json(req) = payload?;
    req.validate()?;
    Ok(Json(state.auth_service.login(req).await?))
}

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<User>> {
    Ok(Json(state.auth_service.profile(user_id).await?))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    payload: std::result::Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<User>> {
    let Json(req) = payload?;
    req.validate()?;
    Ok(Json(state.auth_service.update_profile(user_id, req).await?))
}
