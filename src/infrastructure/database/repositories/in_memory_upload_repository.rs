use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Upload;
use crate::domain::repositories::{UploadRepository, UploadRepositoryError};

/// Process-local upload store used when no database is configured.
#[derive(Default)]
pub struct InMemoryUploadRepository {
    uploads: RwLock<HashMap<Uuid, Upload>>,
}

impl InMemoryUploadRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UploadRepository for InMemoryUploadRepository {
    async fn save(&self, upload: &Upload) -> Result<Uuid, UploadRepositoryError> {
        let mut uploads = self.uploads.write().await;
        if uploads.contains_key(&upload.id()) {
            return Err(UploadRepositoryError::ValidationError(format!(
                "Upload {} already exists",
                upload.id()
            )));
        }
        uploads.insert(upload.id(), upload.clone());
        Ok(upload.id())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Upload>, UploadRepositoryError> {
        Ok(self.uploads.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Upload>, UploadRepositoryError> {
        let mut all: Vec<Upload> = self.uploads.read().await.values().cloned().collect();
        all.sort_by(|a, b| b.uploaded_at().cmp(&a.uploaded_at()));
        Ok(all)
    }

    async fn update(&self, upload: &Upload) -> Result<(), UploadRepositoryError> {
        let mut uploads = self.uploads.write().await;
        match uploads.get_mut(&upload.id()) {
            Some(existing) => {
                *existing = upload.clone();
                Ok(())
            }
            None => Err(UploadRepositoryError::NotFound(upload.id())),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, UploadRepositoryError> {
        Ok(self.uploads.write().await.remove(&id).is_some())
    }
}
