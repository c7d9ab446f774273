use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileStorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("IO error: {0}")]
    IoError(String),
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    // unique name on disk
    pub filename: String,
    pub path: String,
    pub size: u64,
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Write `data` under a fresh unique name that keeps `extension` (e.g. `.pdf`).
    async fn store_file(&self, data: &[u8], extension: &str) -> Result<StoredFile, FileStorageError>;

    async fn retrieve_file(&self, path: &str) -> Result<Vec<u8>, FileStorageError>;

    /// Returns `false` when there was nothing to delete.
    async fn delete_file(&self, path: &str) -> Result<bool, FileStorageError>;
}
