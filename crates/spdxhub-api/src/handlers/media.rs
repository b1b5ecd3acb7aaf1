//! Serving of stored uploads and generated outputs.

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/media/{key}",
    tag = "media",
    params(("key" = String, Path, description = "Storage key of the file")),
    responses(
        (status = 200, description = "File contents"),
        (status = 400, description = "Invalid key", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn serve_media(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Response, HttpAppError> {
    let data = state
        .media
        .storage
        .read(&key)
        .await
        .map_err(HttpAppError::from)?;

    let content_type = mime_guess::from_path(&key).first_or_octet_stream();

    Ok((
        [(header::CONTENT_TYPE, content_type.to_string())],
        data,
    )
        .into_response())
}
