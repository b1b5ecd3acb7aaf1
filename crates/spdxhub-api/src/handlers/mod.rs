pub mod auth;
pub mod compare;
pub mod convert;
pub mod health;
pub mod media;
pub mod validate;

mod form;

pub(crate) use form::FormData;

use crate::error::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use spdxhub_core::AppError;
use spdxhub_storage::{sanitize_filename, Storage};
use std::sync::Arc;

/// Storage key for an incoming upload: unique prefix plus the sanitized
/// client filename, so concurrent uploads of the same name never collide.
pub(crate) fn upload_key(filename: &str) -> String {
    format!("uploads/{}-{}", uuid::Uuid::new_v4(), sanitize_filename(filename))
}

/// Reject files whose extension is not in the configured allowlist.
pub(crate) fn check_extension(filename: &str, allowed: &[String]) -> Result<(), AppError> {
    if allowed.is_empty() {
        return Ok(());
    }
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext {
        Some(ext) if allowed.iter().any(|a| a == &ext) => Ok(()),
        Some(ext) => Err(AppError::InvalidInput(format!(
            "Invalid extension '{}', allowed: {:?}",
            ext, allowed
        ))),
        None => Err(AppError::InvalidInput(format!(
            "Missing file extension (filename: {})",
            filename
        ))),
    }
}

/// 404 with an `error` key in the body, returned when a required file field
/// is absent from the multipart form.
pub(crate) fn missing_file_response(detail: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(detail, "FILE_MISSING")),
    )
        .into_response()
}

/// Best-effort removal of a stored file after a database failure, so the
/// file-save and record-creation pair stays compensating rather than
/// leaving orphans behind.
pub(crate) fn cleanup_stored(storage: Arc<dyn Storage>, key: String) {
    tokio::spawn(async move {
        if let Err(cleanup_err) = storage.delete(&key).await {
            tracing::debug!(
                error = %cleanup_err,
                key = %key,
                "Failed to cleanup stored file after DB error"
            );
        }
    });
}
