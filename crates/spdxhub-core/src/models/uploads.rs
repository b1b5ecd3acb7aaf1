//! Upload record types.
//!
//! One row per external-tool invocation. `result` is written exactly once,
//! at creation, and records the terminal outcome: the acceptance sentinel,
//! the public URL of a generated output, or the toolchain diagnostic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A validation attempt.
///
/// `file_key` is nullable: a request without a file still records the
/// attempt, carrying the missing-file sentinel as its result.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ValidateUpload {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub file_key: Option<String>,
    pub original_filename: Option<String>,
    pub result: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidateUploadResponse {
    pub id: Uuid,
    pub filename: Option<String>,
    pub result: String,
    pub created_at: DateTime<Utc>,
}

impl From<ValidateUpload> for ValidateUploadResponse {
    fn from(record: ValidateUpload) -> Self {
        ValidateUploadResponse {
            id: record.id,
            filename: record.original_filename,
            result: record.result,
            created_at: record.created_at,
        }
    }
}

/// A conversion attempt. `result` is the public URL of the converted output
/// on success, or the toolchain diagnostic on rejection.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ConvertUpload {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub file_key: String,
    pub original_filename: String,
    pub from_format: String,
    pub to_format: String,
    pub output_filename: String,
    pub result: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConvertUploadResponse {
    pub id: Uuid,
    pub filename: String,
    pub from_format: String,
    pub to_format: String,
    pub output_filename: String,
    pub result: String,
    pub created_at: DateTime<Utc>,
}

impl From<ConvertUpload> for ConvertUploadResponse {
    fn from(record: ConvertUpload) -> Self {
        ConvertUploadResponse {
            id: record.id,
            filename: record.original_filename,
            from_format: record.from_format,
            to_format: record.to_format,
            output_filename: record.output_filename,
            result: record.result,
            created_at: record.created_at,
        }
    }
}

/// A comparison attempt over two documents. `result` is the public URL of
/// the generated report on success, or the toolchain diagnostic.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CompareUpload {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub file1_key: String,
    pub file1_filename: String,
    pub file2_key: String,
    pub file2_filename: String,
    pub report_filename: String,
    pub result: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompareUploadResponse {
    pub id: Uuid,
    pub file1_filename: String,
    pub file2_filename: String,
    pub report_filename: String,
    pub result: String,
    pub created_at: DateTime<Utc>,
}

impl From<CompareUpload> for CompareUploadResponse {
    fn from(record: CompareUpload) -> Self {
        CompareUploadResponse {
            id: record.id,
            file1_filename: record.file1_filename,
            file2_filename: record.file2_filename,
            report_filename: record.report_filename,
            result: record.result,
            created_at: record.created_at,
        }
    }
}
