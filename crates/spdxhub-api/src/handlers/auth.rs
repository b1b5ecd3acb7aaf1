//! Registration and login.

use crate::auth::password::{hash_password, verify_password};
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use spdxhub_core::models::UserResponse;
use spdxhub_core::AppError;
use spdxhub_db::NewUser;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub organisation: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// 403 body for accounts that authenticate but may not log in.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginRejection {
    pub invalid: bool,
    pub error: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid registration data", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), HttpAppError> {
    let username = request.username.trim();
    if username.is_empty() {
        return Err(HttpAppError(AppError::InvalidInput(
            "Username must not be empty".to_string(),
        )));
    }
    if request.password.len() < 8 {
        return Err(HttpAppError(AppError::InvalidInput(
            "Password must be at least 8 characters long".to_string(),
        )));
    }
    if request.password != request.confirm_password {
        return Err(HttpAppError(AppError::InvalidInput(
            "Passwords do not match".to_string(),
        )));
    }

    let password_hash = hash_password(&request.password)?;

    // Registration grants staff access immediately.
    let user = state
        .db
        .users
        .create(NewUser {
            username: username.to_string(),
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            organisation: request.organisation,
            password_hash,
            is_staff: true,
            is_active: true,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Unknown user or wrong password", body = ErrorResponse),
        (status = 403, description = "Account inactive or not staff", body = LoginRejection)
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, HttpAppError> {
    let user = state
        .db
        .users
        .get_by_username(request.username.trim())
        .await?;

    let Some(user) = user else {
        return Err(HttpAppError(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        )));
    };

    if !verify_password(&request.password, &user.password_hash)? {
        return Err(HttpAppError(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        )));
    }

    // Credentials are right but the account may not log in: 403 with the
    // invalid flag, distinct from the 401 for bad credentials.
    if !user.is_active || !user.is_staff {
        tracing::warn!(username = %user.username, "Login refused for inactive or non-staff account");
        return Ok((
            StatusCode::FORBIDDEN,
            Json(LoginRejection {
                invalid: true,
                error: "This account is inactive or not authorized for staff access".to_string(),
            }),
        )
            .into_response());
    }

    let token = state.auth.keys.issue(&user)?;

    tracing::info!(username = %user.username, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(user),
    })
    .into_response())
}
