use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::Upload;

#[derive(Debug, Error)]
pub enum UploadRepositoryError {
    #[error("Upload not found: {0}")]
    NotFound(Uuid),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[async_trait]
pub trait UploadRepository: Send + Sync {
    async fn save(&self, upload: &Upload) -> Result<Uuid, UploadRepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Upload>, UploadRepositoryError>;
    /// All uploads, newest first.
    async fn find_all(&self) -> Result<Vec<Upload>, UploadRepositoryError>;
    async fn update(&self, upload: &Upload) -> Result<(), UploadRepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<bool, UploadRepositoryError>;
}
