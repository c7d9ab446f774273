use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::application::ports::{JobProgress, ProgressPublisher};
use crate::application::services::DocumentProcessorService;
use crate::domain::repositories::{UploadRepository, UploadRepositoryError};

#[derive(Debug, Error)]
pub enum StartProcessingError {
    #[error("Upload not found: {0}")]
    UploadNotFound(Uuid),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] UploadRepositoryError),
}

#[derive(Debug, Clone)]
pub struct StartProcessingRequest {
    pub upload_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct StartProcessingResponse {
    pub job_id: Uuid,
    pub message: String,
}

/// Kicks off a background pipeline run and returns at once. Outcomes are
/// only reported through the progress publisher.
pub struct StartProcessingUseCase {
    upload_repository: Arc<dyn UploadRepository>,
    document_processor: Arc<DocumentProcessorService>,
    progress_publisher: Arc<dyn ProgressPublisher>,
}

impl StartProcessingUseCase {
    pub fn new(
        upload_repository: Arc<dyn UploadRepository>,
        document_processor: Arc<DocumentProcessorService>,
        progress_publisher: Arc<dyn ProgressPublisher>,
    ) -> Self {
        Self {
            upload_repository,
            document_processor,
            progress_publisher,
        }
    }

    pub async fn execute(
        &self,
        request: StartProcessingRequest,
    ) -> Result<StartProcessingResponse, StartProcessingError> {
        let upload = self
            .upload_repository
            .find_by_id(request.upload_id)
            .await?
            .ok_or(StartProcessingError::UploadNotFound(request.upload_id))?;

        // Job id is the upload id
        let job_id = upload.id();
        let progress = JobProgress::new(job_id, self.progress_publisher.clone());
        let processor = self.document_processor.clone();

        tracing::info!(%job_id, document_type = %upload.document_type(), "Starting processing job");

        tokio::spawn(async move {
            // failures are already logged and published
            let _ = processor.process(upload, progress).await;
        });

        Ok(StartProcessingResponse {
            job_id,
            message: "Processing started".to_string(),
        })
    }
}
