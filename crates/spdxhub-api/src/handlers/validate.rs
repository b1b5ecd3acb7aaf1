//! Document validation endpoint.

use crate::auth::models::CurrentUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::{
    check_extension, cleanup_stored, missing_file_response, upload_key, FormData,
};
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
    Json,
};
use spdxhub_core::constants::{FILE_NOT_UPLOADED_RESULT, VALID_DOCUMENT_RESULT};
use spdxhub_core::models::ValidateUploadResponse;
use spdxhub_tool::ToolError;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/validate",
    tag = "validate",
    responses(
        (status = 200, description = "The caller's validation records", body = [ValidateUploadResponse]),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_validations(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<Vec<ValidateUploadResponse>>, HttpAppError> {
    let records = state.db.validate_uploads.list_for_owner(user.id).await?;
    Ok(Json(
        records.into_iter().map(ValidateUploadResponse::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/validate",
    tag = "validate",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Validation outcome recorded", body = ValidateUploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "No file in the request", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn validate_document(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let form = FormData::read(multipart, state.media.max_file_size).await?;

    let Some(file) = form.file("file") else {
        // The validate path records even fileless attempts.
        let record = state
            .db
            .validate_uploads
            .create(user.id, None, None, FILE_NOT_UPLOADED_RESULT)
            .await?;
        tracing::debug!(record_id = %record.id, "Validate request without file");
        return Ok(missing_file_response("No file was uploaded"));
    };

    check_extension(&file.filename, &state.media.allowed_extensions)?;

    let key = upload_key(&file.filename);
    let stored = state
        .media
        .storage
        .store(&key, file.bytes.to_vec())
        .await
        .map_err(HttpAppError::from)?;

    let result = match state.toolchain.verify(&stored.path).await {
        Ok(()) => VALID_DOCUMENT_RESULT.to_string(),
        // Tool rejections are the request's outcome, recorded verbatim.
        Err(ToolError::Reported { message }) => message,
        Err(err) => return Err(err.into()),
    };

    let record = match state
        .db
        .validate_uploads
        .create(user.id, Some(&stored.key), Some(&file.filename), &result)
        .await
    {
        Ok(record) => record,
        Err(e) => {
            cleanup_stored(state.media.storage.clone(), stored.key);
            return Err(e.into());
        }
    };

    tracing::info!(
        record_id = %record.id,
        owner = %user.username,
        filename = %file.filename,
        "Validation recorded"
    );

    Ok(Json(ValidateUploadResponse::from(record)).into_response())
}
