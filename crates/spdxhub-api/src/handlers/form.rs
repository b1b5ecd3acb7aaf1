//! Multipart form collection.
//!
//! Fields arrive in arbitrary order; collect them all before dispatching so
//! handlers can look up files and text values by name.

use crate::error::HttpAppError;
use axum::extract::Multipart;
use bytes::Bytes;
use spdxhub_core::AppError;
use std::collections::HashMap;

pub(crate) struct FormFile {
    pub filename: String,
    pub bytes: Bytes,
}

pub(crate) struct FormData {
    files: HashMap<String, FormFile>,
    fields: HashMap<String, String>,
}

impl FormData {
    pub async fn read(mut multipart: Multipart, max_file_size: usize) -> Result<Self, HttpAppError> {
        let mut files = HashMap::new();
        let mut fields = HashMap::new();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if let Some(filename) = field.file_name().map(str::to_string) {
                let bytes = field.bytes().await?;
                if bytes.len() > max_file_size {
                    return Err(HttpAppError(AppError::PayloadTooLarge(format!(
                        "{} bytes exceeds max {} bytes",
                        bytes.len(),
                        max_file_size
                    ))));
                }
                files.insert(name, FormFile { filename, bytes });
            } else {
                let value = field.text().await?;
                fields.insert(name, value);
            }
        }

        Ok(FormData { files, fields })
    }

    pub fn file(&self, name: &str) -> Option<&FormFile> {
        self.files.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}
