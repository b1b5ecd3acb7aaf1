//! Document comparison endpoint.

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
use spdxhub_core::models::CompareUploadResponse;
use spdxhub_storage::sanitize_filename;
use spdxhub_tool::ToolError;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/compare",
    tag = "compare",
    responses(
        (status = 200, description = "The caller's comparison records", body = [CompareUploadResponse]),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_comparisons(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<Vec<CompareUploadResponse>>, HttpAppError> {
    let records = state.db.compare_uploads.list_for_owner(user.id).await?;
    Ok(Json(
        records.into_iter().map(CompareUploadResponse::from).collect(),
    ))
}

/// Report filename: the client's choice sanitized, or a generated one, with
/// the spreadsheet extension the toolchain writes.
fn report_filename(requested: Option<&str>) -> String {
    let name = requested
        .map(sanitize_filename)
        .filter(|name| name != "upload");
    let name = name.unwrap_or_else(|| format!("comparison-{}", uuid::Uuid::new_v4()));
    if name.to_lowercase().ends_with(".xlsx") {
        name
    } else {
        format!("{}.xlsx", name)
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/compare",
    tag = "compare",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Comparison outcome recorded", body = CompareUploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "A file is missing from the request", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn compare_documents(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let form = FormData::read(multipart, state.media.max_file_size).await?;

    let (Some(file1), Some(file2)) = (form.file("file1"), form.file("file2")) else {
        return Ok(missing_file_response(
            "Comparison requires both file1 and file2",
        ));
    };

    check_extension(&file1.filename, &state.media.allowed_extensions)?;
    check_extension(&file2.filename, &state.media.allowed_extensions)?;

    let report_name = report_filename(form.text("rfilename"));
    let report_path = state
        .media
        .storage
        .resolve_path(&report_name)
        .map_err(HttpAppError::from)?;

    let stored1 = state
        .media
        .storage
        .store(&upload_key(&file1.filename), file1.bytes.to_vec())
        .await
        .map_err(HttpAppError::from)?;

    let stored2 = match state
        .media
        .storage
        .store(&upload_key(&file2.filename), file2.bytes.to_vec())
        .await
    {
        Ok(stored) => stored,
        Err(e) => {
            cleanup_stored(state.media.storage.clone(), stored1.key);
            return Err(e.into());
        }
    };

    let result = match state
        .toolchain
        .compare(&report_path, &[&stored1.path, &stored2.path])
        .await
    {
        Ok(()) => state.media.storage.public_url(&report_name),
        Err(ToolError::Reported { message }) => message,
        Err(err) => return Err(err.into()),
    };

    let record = match state
        .db
        .compare_uploads
        .create(
            user.id,
            &stored1.key,
            &file1.filename,
            &stored2.key,
            &file2.filename,
            &report_name,
            &result,
        )
        .await
    {
        Ok(record) => record,
        Err(e) => {
            cleanup_stored(state.media.storage.clone(), stored1.key);
            cleanup_stored(state.media.storage.clone(), stored2.key);
            return Err(e.into());
        }
    };

    tracing::info!(
        record_id = %record.id,
        owner = %user.username,
        report = %report_name,
        "Comparison recorded"
    );

    Ok(Json(CompareUploadResponse::from(record)).into_response())
}
