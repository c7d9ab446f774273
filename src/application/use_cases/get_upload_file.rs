use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::application::ports::{FileStorage, file_storage::FileStorageError};
use crate::domain::repositories::{UploadRepository, UploadRepositoryError};
use crate::domain::value_objects::DocumentType;

#[derive(Debug, Error)]
pub enum GetUploadFileError {
    #[error("Upload not found: {0}")]
    UploadNotFound(Uuid),
    #[error("File not found on disk for upload {0}")]
    FileMissing(Uuid),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] UploadRepositoryError),
    #[error("Storage error: {0}")]
    StorageError(String),
}

#[derive(Debug, Clone)]
pub struct GetUploadFileRequest {
    pub upload_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct GetUploadFileResponse {
    pub original_name: String,
    pub document_type: DocumentType,
    pub data: Vec<u8>,
}

pub struct GetUploadFileUseCase {
    upload_repository: Arc<dyn UploadRepository>,
    file_storage: Arc<dyn FileStorage>,
}

impl GetUploadFileUseCase {
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
        request: GetUploadFileRequest,
    ) -> Result<GetUploadFileResponse, GetUploadFileError> {
        let upload = self
            .upload_repository
            .find_by_id(request.upload_id)
            .await?
            .ok_or(GetUploadFileError::UploadNotFound(request.upload_id))?;

        // Record exists but the bytes may not
        let data = self
            .file_storage
            .retrieve_file(upload.path())
            .await
            .map_err(|e| match e {
                FileStorageError::FileNotFound(_) => GetUploadFileError::FileMissing(upload.id()),
                other => GetUploadFileError::StorageError(other.to_string()),
            })?;

        Ok(GetUploadFileResponse {
            original_name: upload.original_name().to_string(),
            document_type: upload.document_type(),
            data,
        })
    }
}
