use crate::auth::jwt::JwtKeys;
use crate::auth::models::CurrentUser;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use spdxhub_core::AppError;
use spdxhub_db::UserRepository;

/// State shared with the auth middleware and the auth handlers.
#[derive(Clone)]
pub struct AuthState {
    pub keys: JwtKeys,
    pub users: UserRepository,
}

/// Bearer-token authentication for the protected routes.
///
/// Verifies the JWT, then re-reads the account so tokens issued before a
/// deactivation stop working immediately.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return HttpAppError(AppError::Unauthorized(
            "Invalid authorization header format".to_string(),
        ))
        .into_response();
    };

    let claims = match auth_state.keys.verify(token) {
        Ok(claims) => claims,
        Err(e) => return HttpAppError(e).into_response(),
    };

    let user = match auth_state.users.get_by_id(claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpAppError(AppError::Unauthorized("Unknown user".to_string()))
                .into_response();
        }
        Err(e) => return HttpAppError(e).into_response(),
    };

    if !user.is_active {
        return HttpAppError(AppError::Unauthorized(
            "This account has been deactivated".to_string(),
        ))
        .into_response();
    }

    if !user.is_staff {
        return HttpAppError(AppError::Forbidden(
            "Staff access is required".to_string(),
        ))
        .into_response();
    }

    request.extensions_mut().insert(CurrentUser {
        id: user.id,
        username: user.username,
        is_staff: user.is_staff,
    });
    next.run(request).await
}
