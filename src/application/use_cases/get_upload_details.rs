use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::ProcessingResult;
use crate::domain::repositories::{UploadRepository, UploadRepositoryError};

#[derive(Debug, Error)]
pub enum GetUploadDetailsError {
    #[error("Upload not found: {0}")]
    UploadNotFound(Uuid),
    #[error("Upload {0} has not been processed yet")]
    NotProcessed(Uuid),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] UploadRepositoryError),
}

#[derive(Debug, Clone)]
pub struct GetUploadDetailsRequest {
    pub upload_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct GetUploadDetailsResponse {
    pub processing_result: ProcessingResult,
}

pub struct GetUploadDetailsUseCase {
    upload_repository: Arc<dyn UploadRepository>,
}

impl GetUploadDetailsUseCase {
    pub fn new(upload_repository: Arc<dyn UploadRepository>) -> Self {
        Self { upload_repository }
    }

    pub async fn execute(
        &self,
        request: GetUploadDetailsRequest,
    ) -> Result<GetUploadDetailsResponse, GetUploadDetailsError> {
        let upload = self
            .upload_repository
            .find_by_id(request.upload_id)
            .await?
            .ok_or(GetUploadDetailsError::UploadNotFound(request.upload_id))?;

        // Nothing to show until a run has completed
        let processing_result = upload
            .processing_result()
            .cloned()
            .ok_or(GetUploadDetailsError::NotProcessed(upload.id()))?;

        Ok(GetUploadDetailsResponse { processing_result })
    }
}
