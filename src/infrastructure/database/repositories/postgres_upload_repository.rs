use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Upload;
use crate::domain::repositories::{UploadRepository, UploadRepositoryError};
use crate::infrastructure::database::models::{NewUploadModel, UploadModel};
use crate::infrastructure::database::schema::uploads::dsl::*;
use crate::infrastructure::database::{DbConnection, DbPool, get_connection_from_pool};

pub struct PostgresUploadRepository {
    pool: DbPool,
}

impl PostgresUploadRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    // Diesel is synchronous; run queries on the blocking pool
    async fn with_connection<T, F>(&self, query: F) -> Result<T, UploadRepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&mut DbConnection) -> Result<T, UploadRepositoryError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = get_connection_from_pool(&pool)
                .map_err(|e| UploadRepositoryError::DatabaseError(e.to_string()))?;
            query(&mut conn)
        })
        .await
        .map_err(|e| UploadRepositoryError::DatabaseError(e.to_string()))?
    }
}

fn to_domain(model: UploadModel) -> Result<Upload, UploadRepositoryError> {
    Upload::try_from(model).map_err(UploadRepositoryError::ValidationError)
}

#[async_trait]
impl UploadRepository for PostgresUploadRepository {
    async fn save(&self, upload: &Upload) -> Result<Uuid, UploadRepositoryError> {
        let new_upload =
            NewUploadModel::try_from(upload).map_err(UploadRepositoryError::ValidationError)?;

        self.with_connection(move |conn| {
            let inserted: UploadModel = diesel::insert_into(uploads)
                .values(&new_upload)
                .get_result(conn)
                .map_err(|e| UploadRepositoryError::DatabaseError(e.to_string()))?;
            Ok(inserted.id)
        })
        .await
    }

    async fn find_by_id(&self, upload_id: Uuid) -> Result<Option<Upload>, UploadRepositoryError> {
        let model = self
            .with_connection(move |conn| {
                uploads
                    .find(upload_id)
                    .select(UploadModel::as_select())
                    .first(conn)
                    .optional()
                    .map_err(|e| UploadRepositoryError::DatabaseError(e.to_string()))
            })
            .await?;

        model.map(to_domain).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Upload>, UploadRepositoryError> {
        let models = self
            .with_connection(|conn| {
                // Newest first
                uploads
                    .order(uploaded_at.desc())
                    .select(UploadModel::as_select())
                    .load(conn)
                    .map_err(|e| UploadRepositoryError::DatabaseError(e.to_string()))
            })
            .await?;

        models.into_iter().map(to_domain).collect()
    }

    async fn update(&self, upload: &Upload) -> Result<(), UploadRepositoryError> {
        let changes =
            NewUploadModel::try_from(upload).map_err(UploadRepositoryError::ValidationError)?;
        let upload_id = upload.id();

        let updated = self
            .with_connection(move |conn| {
                diesel::update(uploads.find(upload_id))
                    .set(&changes)
                    .execute(conn)
                    .map_err(|e| UploadRepositoryError::DatabaseError(e.to_string()))
            })
            .await?;

        if updated == 0 {
            return Err(UploadRepositoryError::NotFound(upload_id));
        }
        Ok(())
    }

    async fn delete(&self, upload_id: Uuid) -> Result<bool, UploadRepositoryError> {
        let deleted = self
            .with_connection(move |conn| {
                diesel::delete(uploads.find(upload_id))
                    .execute(conn)
                    .map_err(|e| UploadRepositoryError::DatabaseError(e.to_string()))
            })
            .await?;

        Ok(deleted > 0)
    }
}
