use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{ProcessingResult, Upload};
use crate::domain::value_objects::{DocumentType, ProcessingStatus};
use crate::infrastructure::database::schema::uploads;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = uploads)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UploadModel {
    pub id: Uuid,
    pub filename: String,
    pub original_name: String,
    pub path: String,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: String,
    pub document_type: String,
    pub size: i64,
    pub processing_result: Option<serde_json::Value>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = uploads)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct NewUploadModel {
    pub id: Uuid,
    pub filename: String,
    pub original_name: String,
    pub path: String,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: String,
    pub document_type: String,
    pub size: i64,
    pub processing_result: Option<serde_json::Value>,
}

impl TryFrom<&Upload> for NewUploadModel {
    type Error = String;

    fn try_from(upload: &Upload) -> Result<Self, Self::Error> {
        let processing_result = upload
            .processing_result()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| format!("Unserializable processing result: {}", e))?;

        Ok(Self {
            id: upload.id(),
            filename: upload.filename().to_string(),
            original_name: upload.original_name().to_string(),
            path: upload.path().to_string(),
            uploaded_at: upload.uploaded_at(),
            updated_at: upload.updated_at(),
            status: upload.status().as_str().to_string(),
            document_type: upload.document_type().as_str().to_string(),
            size: upload.size(),
            processing_result,
        })
    }
}

impl TryFrom<UploadModel> for Upload {
    type Error = String;

    fn try_from(model: UploadModel) -> Result<Self, Self::Error> {
        let status: ProcessingStatus = model.status.parse()?;
        let document_type: DocumentType = model.document_type.parse()?;
        let processing_result = model
            .processing_result
            .map(serde_json::from_value::<ProcessingResult>)
            .transpose()
            .map_err(|e| format!("Invalid processing result for {}: {}", model.id, e))?;

        Ok(Upload::from_database(
            model.id,
            model.filename,
            model.original_name,
            model.path,
            model.uploaded_at,
            model.updated_at,
            status,
            document_type,
            model.size,
            processing_result,
        ))
    }
}
