//! Format conversion endpoint.

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
use spdxhub_core::models::ConvertUploadResponse;
use spdxhub_core::AppError;
use spdxhub_storage::sanitize_filename;
use spdxhub_tool::{ConversionKind, DocumentFormat, SpdxToolchain, ToolError};
use std::path::Path;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/convert",
    tag = "convert",
    responses(
        (status = 200, description = "The caller's conversion records", body = [ConvertUploadResponse]),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_conversions(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<Vec<ConvertUploadResponse>>, HttpAppError> {
    let records = state.db.convert_uploads.list_for_owner(user.id).await?;
    Ok(Json(
        records.into_iter().map(ConvertUploadResponse::from).collect(),
    ))
}

/// Verify the source document where the toolchain ships a verifier, then
/// run the table-selected conversion entry point.
async fn run_conversion(
    toolchain: &SpdxToolchain,
    kind: ConversionKind,
    input: &Path,
    output: &Path,
) -> Result<(), ToolError> {
    if kind.from_format().is_verifiable() {
        toolchain.verify(input).await?;
    }
    toolchain.convert(kind, input, output).await
}

#[utoipa::path(
    post,
    path = "/api/v1/convert",
    tag = "convert",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Conversion outcome recorded", body = ConvertUploadResponse),
        (status = 400, description = "Invalid input or unsupported conversion", body = ErrorResponse),
        (status = 404, description = "No file in the request", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn convert_document(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let form = FormData::read(multipart, state.media.max_file_size).await?;

    let Some(file) = form.file("file") else {
        return Ok(missing_file_response("No file was uploaded"));
    };

    let (Some(cfilename), Some(from_raw), Some(to_raw)) = (
        form.text("cfilename"),
        form.text("from_format"),
        form.text("to_format"),
    ) else {
        return Err(HttpAppError(AppError::InvalidInput(
            "cfilename, from_format and to_format are required".to_string(),
        )));
    };

    let from: DocumentFormat = from_raw.parse().map_err(AppError::InvalidInput)?;
    let to: DocumentFormat = to_raw.parse().map_err(AppError::InvalidInput)?;

    // Enumerated dispatch: unsupported pairs fail before any file is touched.
    let Some(kind) = ConversionKind::for_pair(from, to) else {
        return Err(HttpAppError(AppError::InvalidInput(format!(
            "Conversion from {} to {} is not supported",
            from, to
        ))));
    };

    check_extension(&file.filename, &state.media.allowed_extensions)?;

    let output_filename = sanitize_filename(cfilename);
    let output_path = state
        .media
        .storage
        .resolve_path(&output_filename)
        .map_err(HttpAppError::from)?;

    let key = upload_key(&file.filename);
    let stored = state
        .media
        .storage
        .store(&key, file.bytes.to_vec())
        .await
        .map_err(HttpAppError::from)?;

    let result = match run_conversion(&state.toolchain, kind, &stored.path, &output_path).await {
        Ok(()) => state.media.storage.public_url(&output_filename),
        Err(ToolError::Reported { message }) => message,
        Err(err) => return Err(err.into()),
    };

    let record = match state
        .db
        .convert_uploads
        .create(
            user.id,
            &stored.key,
            &file.filename,
            &from.to_string(),
            &to.to_string(),
            &output_filename,
            &result,
        )
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
        from = %from,
        to = %to,
        "Conversion recorded"
    );

    Ok(Json(ConvertUploadResponse::from(record)).into_response())
}
