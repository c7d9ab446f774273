use async_trait::async_trait;
use chrono::Utc;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::file_storage::{FileStorage, FileStorageError, StoredFile};

/// Stores uploads as flat files under one directory.
pub struct LocalFileStorage {
    base_path: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub async fn ensure_directory_exists(&self) -> Result<(), FileStorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))
    }

    /// `{millis}-{uuid}{ext}`; unique even for identical client names.
    fn unique_file_name(extension: &str) -> String {
        format!(
            "{}-{}{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4(),
            extension
        )
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store_file(
        &self,
        data: &[u8],
        extension: &str,
    ) -> Result<StoredFile, FileStorageError> {
        if extension.contains(['/', '\\']) {
            return Err(FileStorageError::InvalidPath(extension.to_string()));
        }

        self.ensure_directory_exists().await?;

        let filename = Self::unique_file_name(extension);
        let file_path = self.base_path.join(&filename);

        fs::write(&file_path, data)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))?;

        tracing::debug!(path = %file_path.display(), bytes = data.len(), "Stored upload");

        Ok(StoredFile {
            filename,
            path: file_path.to_string_lossy().to_string(),
            size: data.len() as u64,
        })
    }

    async fn retrieve_file(&self, path: &str) -> Result<Vec<u8>, FileStorageError> {
        match fs::read(path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(FileStorageError::FileNotFound(path.to_string()))
            }
            Err(e) => Err(FileStorageError::IoError(e.to_string())),
        }
    }

    async fn delete_file(&self, path: &str) -> Result<bool, FileStorageError> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(FileStorageError::IoError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[tokio::test]
    async fn stores_under_unique_names_keeping_extension() {
        let dir = tempfile::tempdir().unwrap();
        let base_path = dir.path().join("uploads");
        let storage = LocalFileStorage::new(base_path.clone());

        let first = storage.store_file(b"<p>a</p>", ".html").await.unwrap();
        let second = storage.store_file(b"<p>a</p>", ".html").await.unwrap();

        assert_ne!(first.filename, second.filename);
        assert!(first.filename.ends_with(".html"));
        assert_eq!(first.size, 8);
        assert!(Path::new(&first.path).starts_with(&base_path));
        assert_eq!(storage.retrieve_file(&first.path).await.unwrap(), b"<p>a</p>");
    }

    #[tokio::test]
    async fn delete_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_path_buf());
        let stored = storage.store_file(b"%PDF", ".pdf").await.unwrap();

        assert!(storage.delete_file(&stored.path).await.unwrap());
        assert!(!storage.delete_file(&stored.path).await.unwrap());
        assert!(!Path::new(&stored.path).exists());
    }

    #[tokio::test]
    async fn retrieve_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_path_buf());
        let missing = dir.path().join("nope.pdf");

        let error = storage
            .retrieve_file(&missing.to_string_lossy())
            .await
            .unwrap_err();

        assert!(matches!(error, FileStorageError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn rejects_extension_with_separators() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_path_buf());

        let error = storage.store_file(b"x", "/../x.pdf").await.unwrap_err();

        assert!(matches!(error, FileStorageError::InvalidPath(_)));
    }
}
