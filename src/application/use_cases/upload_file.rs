use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::FileStorage;
use crate::domain::entities::Upload;
use crate::domain::repositories::UploadRepository;
use crate::domain::value_objects::DocumentType;

#[derive(Debug, Error)]
pub enum UploadFileError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
}

#[derive(Debug, Clone)]
pub struct UploadFileRequest {
    /// Name the client sent the file under.
    pub original_name: String,
    pub file_data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct UploadFileResponse {
    pub upload: Upload,
}

pub struct UploadFileUseCase {
    upload_repository: Arc<dyn UploadRepository>,
    file_storage: Arc<dyn FileStorage>,
}

impl UploadFileUseCase {
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
        request: UploadFileRequest,
    ) -> Result<UploadFileResponse, UploadFileError> {
        // Validate extension and content
        let document_type = DocumentType::from_file_name(&request.original_name).ok_or_else(
            || UploadFileError::ValidationError("Only PDF and HTML files are allowed".to_string()),
        )?;

        if request.file_data.is_empty() {
            return Err(UploadFileError::ValidationError(
                "No file uploaded".to_string(),
            ));
        }

        // Write bytes first, then the record
        let stored = self
            .file_storage
            .store_file(&request.file_data, document_type.extension())
            .await
            .map_err(|e| UploadFileError::StorageError(e.to_string()))?;

        let upload = Upload::new(
            stored.filename,
            request.original_name,
            stored.path,
            document_type,
            stored.size as i64,
        );

        if let Err(e) = self.upload_repository.save(&upload).await {
            // keep disk and store in step
            if let Err(cleanup) = self.file_storage.delete_file(upload.path()).await {
                tracing::warn!(path = upload.path(), "Could not remove orphaned upload: {}", cleanup);
            }
            return Err(UploadFileError::StorageError(e.to_string()));
        }

        tracing::info!(
            upload_id = %upload.id(),
            original_name = upload.original_name(),
            size = upload.size(),
            "Stored upload"
        );

        Ok(UploadFileResponse { upload })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ProcessingStatus;
    use crate::infrastructure::database::InMemoryUploadRepository;
    use crate::infrastructure::file_system::LocalFileStorage;

    fn use_case(dir: &tempfile::TempDir) -> (UploadFileUseCase, Arc<InMemoryUploadRepository>) {
        let repository = Arc::new(InMemoryUploadRepository::new());
        let storage = Arc::new(LocalFileStorage::new(dir.path().to_path_buf()));
        (UploadFileUseCase::new(repository.clone(), storage), repository)
    }

    #[tokio::test]
    async fn stores_file_and_record() {
        let dir = tempfile::tempdir().unwrap();
        let (use_case, repository) = use_case(&dir);

        let response = use_case
            .execute(UploadFileRequest {
                original_name: "Report.PDF".to_string(),
                file_data: b"%PDF-1.4 body".to_vec(),
            })
            .await
            .unwrap();

        let upload = response.upload;
        assert_eq!(upload.document_type(), DocumentType::Pdf);
        assert_eq!(upload.status(), ProcessingStatus::Completed);
        assert_eq!(upload.original_name(), "Report.PDF");
        assert!(upload.filename().ends_with(".pdf"));
        assert_eq!(upload.size(), 13);
        assert_eq!(tokio::fs::read(upload.path()).await.unwrap(), b"%PDF-1.4 body");
        assert!(repository.find_by_id(upload.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn rejects_disallowed_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let (use_case, repository) = use_case(&dir);

        let wrong_type = use_case
            .execute(UploadFileRequest {
                original_name: "notes.txt".to_string(),
                file_data: b"hello".to_vec(),
            })
            .await
            .unwrap_err();
        let empty = use_case
            .execute(UploadFileRequest {
                original_name: "page.html".to_string(),
                file_data: Vec::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_type, UploadFileError::ValidationError(_)));
        assert!(matches!(empty, UploadFileError::ValidationError(_)));
        assert!(repository.find_all().await.unwrap().is_empty());
    }
}
