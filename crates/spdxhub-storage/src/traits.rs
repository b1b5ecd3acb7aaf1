//! Storage abstraction trait

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A stored file: its key, its public URL, and its on-disk path.
///
/// The path is exposed because the external toolchain operates on real
/// filesystem paths, not on storage keys.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub key: String,
    pub url: String,
    pub path: PathBuf,
}

/// Storage abstraction trait
///
/// The backend must be filesystem-addressable: the toolchain bridge hands
/// paths resolved through `resolve_path` to a child process.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write a file under the given key and return its key, URL, and path.
    async fn store(&self, key: &str, data: Vec<u8>) -> StorageResult<StoredFile>;

    /// Read a file by its storage key.
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a file by its storage key. Deleting a missing file is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if a file exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Resolve a key to its filesystem path without touching the file.
    fn resolve_path(&self, key: &str) -> StorageResult<PathBuf>;

    /// Public URL under which the key is served.
    fn public_url(&self, key: &str) -> String;
}

/// Strip path components and shell-hostile characters from a client-supplied
/// filename, keeping the extension intact.
pub fn sanitize_filename(filename: &str) -> String {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();

    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    // ".." survives character filtering; collapse it.
    let cleaned = cleaned.replace("..", "_");
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.' || c == '_') {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("/etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename("dir/../file.spdx"), "file.spdx");
    }

    #[test]
    fn test_sanitize_replaces_hostile_characters() {
        assert_eq!(sanitize_filename("a b;c.spdx"), "a_b_c.spdx");
        assert_eq!(sanitize_filename("doc$(rm).rdf"), "doc__rm_.rdf");
    }

    #[test]
    fn test_sanitize_degenerate_names() {
        assert_eq!(sanitize_filename(""), "upload");
        assert_eq!(sanitize_filename("..."), "upload");
        assert_eq!(sanitize_filename("///"), "upload");
    }

    #[test]
    fn test_sanitize_keeps_ordinary_names() {
        assert_eq!(
            sanitize_filename("SPDXTagExample-v2.0.spdx"),
            "SPDXTagExample-v2.0.spdx"
        );
    }
}
