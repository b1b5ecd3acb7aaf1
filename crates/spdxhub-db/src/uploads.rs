use spdxhub_core::models::{CompareUpload, ConvertUpload, ValidateUpload};
use spdxhub_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

#[derive(Clone)]
pub struct ValidateUploadRepository {
    pool: PgPool,
}

impl ValidateUploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record one validation attempt. `file_key` is absent for requests
    /// that arrived without a file.
    pub async fn create(
        &self,
        owner_id: Uuid,
        file_key: Option<&str>,
        original_filename: Option<&str>,
        result: &str,
    ) -> Result<ValidateUpload, AppError> {
        let record = sqlx::query_as::<Postgres, ValidateUpload>(
            r#"
            INSERT INTO validate_uploads (id, owner_id, file_key, original_filename, result)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(file_key)
        .bind(original_filename)
        .bind(result)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<ValidateUpload>, AppError> {
        let records = sqlx::query_as::<Postgres, ValidateUpload>(
            "SELECT * FROM validate_uploads WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }
}

#[derive(Clone)]
pub struct ConvertUploadRepository {
    pool: PgPool,
}

impl ConvertUploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        owner_id: Uuid,
        file_key: &str,
        original_filename: &str,
        from_format: &str,
        to_format: &str,
        output_filename: &str,
        result: &str,
    ) -> Result<ConvertUpload, AppError> {
        let record = sqlx::query_as::<Postgres, ConvertUpload>(
            r#"
            INSERT INTO convert_uploads
                (id, owner_id, file_key, original_filename, from_format, to_format,
                 output_filename, result)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(file_key)
        .bind(original_filename)
        .bind(from_format)
        .bind(to_format)
        .bind(output_filename)
        .bind(result)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<ConvertUpload>, AppError> {
        let records = sqlx::query_as::<Postgres, ConvertUpload>(
            "SELECT * FROM convert_uploads WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }
}

#[derive(Clone)]
pub struct CompareUploadRepository {
    pool: PgPool,
}

impl CompareUploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        owner_id: Uuid,
        file1_key: &str,
        file1_filename: &str,
        file2_key: &str,
        file2_filename: &str,
        report_filename: &str,
        result: &str,
    ) -> Result<CompareUpload, AppError> {
        let record = sqlx::query_as::<Postgres, CompareUpload>(
            r#"
            INSERT INTO compare_uploads
                (id, owner_id, file1_key, file1_filename, file2_key, file2_filename,
                 report_filename, result)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(file1_key)
        .bind(file1_filename)
        .bind(file2_key)
        .bind(file2_filename)
        .bind(report_filename)
        .bind(result)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<CompareUpload>, AppError> {
        let records = sqlx::query_as::<Postgres, CompareUpload>(
            "SELECT * FROM compare_uploads WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }
}
