use std::sync::Arc;
use thiserror::Error;

use crate::domain::entities::Upload;
use crate::domain::repositories::{UploadRepository, UploadRepositoryError};

#[derive(Debug, Error)]
pub enum ListUploadsError {
    #[error("Repository error: {0}")]
    RepositoryError(#[from] UploadRepositoryError),
}

#[derive(Debug, Clone)]
pub struct ListUploadsResponse {
    /// Newest first.
    pub uploads: Vec<Upload>,
}

pub struct ListUploadsUseCase {
    upload_repository: Arc<dyn UploadRepository>,
}

impl ListUploadsUseCase {
    pub fn new(upload_repository: Arc<dyn UploadRepository>) -> Self {
        Self { upload_repository }
    }

    pub async fn execute(&self) -> Result<ListUploadsResponse, ListUploadsError> {
        let uploads = self.upload_repository.find_all().await?;
        Ok(ListUploadsResponse { uploads })
    }
}
