use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::application::ports::FileStorage;
use crate::domain::repositories::{UploadRepository, UploadRepositoryError};

#[derive(Debug, Error)]
pub enum DeleteUploadError {
    #[error("Upload not found: {0}")]
    UploadNotFound(Uuid),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] UploadRepositoryError),
    #[error("Storage error: {0}")]
    StorageError(String),
}

#[derive(Debug, Clone)]
pub struct DeleteUploadRequest {
    pub upload_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct DeleteUploadResponse {
    pub message: String,
}

pub struct DeleteUploadUseCase {
    upload_repository: Arc<dyn UploadRepository>,
    file_storage: Arc<dyn FileStorage>,
}

impl DeleteUploadUseCase {
    pub fn new(
        upload_repository: Arc<dyn UploadRepository>,
        file_storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self {
            upload_repository,
            file_storage,
        }
    }

    pub async fn execute(
        &self,
        request: DeleteUploadRequest,
    ) -> Result<DeleteUploadResponse, DeleteUploadError> {
        let upload = self
            .upload_repository
            .find_by_id(request.upload_id)
            .await?
            .ok_or(DeleteUploadError::UploadNotFound(request.upload_id))?;

        // A missing file does not block deleting the record
        let removed = self
            .file_storage
            .delete_file(upload.path())
            .await
            .map_err(|e| DeleteUploadError::StorageError(e.to_string()))?;
        if !removed {
            tracing::warn!(upload_id = %upload.id(), path = upload.path(), "Upload file was already gone");
        }

        self.upload_repository.delete(upload.id()).await?;

        tracing::info!(upload_id = %upload.id(), "Deleted upload");

        Ok(DeleteUploadResponse {
            message: "File deleted successfully".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::upload_file::{UploadFileRequest, UploadFileUseCase};
    use crate::infrastructure::database::InMemoryUploadRepository;
    use crate::infrastructure::file_system::LocalFileStorage;

    #[tokio::test]
    async fn deletes_record_even_when_file_is_already_gone() {
        let dir = tempfile::tempdir().unwrap();
        let repository = Arc::new(InMemoryUploadRepository::new());
        let storage = Arc::new(LocalFileStorage::new(dir.path().to_path_buf()));
        let upload = UploadFileUseCase::new(repository.clone(), storage.clone())
            .execute(UploadFileRequest {
                original_name: "page.html".to_string(),
                file_data: b"<p>x</p>".to_vec(),
            })
            .await
            .unwrap()
            .upload;
        tokio::fs::remove_file(upload.path()).await.unwrap();

        let use_case = DeleteUploadUseCase::new(repository.clone(), storage);
        use_case
            .execute(DeleteUploadRequest {
                upload_id: upload.id(),
            })
            .await
            .unwrap();

        assert!(repository.find_by_id(upload.id()).await.unwrap().is_none());

        let again = use_case
            .execute(DeleteUploadRequest {
                upload_id: upload.id(),
            })
            .await
            .unwrap_err();
        assert!(matches!(again, DeleteUploadError::UploadNotFound(_)));
    }
}
