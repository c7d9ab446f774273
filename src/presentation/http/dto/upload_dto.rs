use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::use_cases::start_processing::StartProcessingResponse;
use crate::domain::entities::Upload;
use crate::domain::value_objects::{DocumentType, ProcessingStatus};

/// Listing and upload reply. `filename` carries the client's original name.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummaryDto {
    pub id: Uuid,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub status: ProcessingStatus,
    #[serde(rename = "type")]
    pub document_type: DocumentType,
}

impl From<&Upload> for UploadSummaryDto {
    fn from(upload: &Upload) -> Self {
        Self {
            id: upload.id(),
            filename: upload.original_name().to_string(),
            uploaded_at: upload.uploaded_at(),
            status: upload.status(),
            document_type: upload.document_type(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStartedDto {
    pub message: String,
    pub job_id: Uuid,
}

impl From<StartProcessingResponse> for ProcessStartedDto {
    fn from(response: StartProcessingResponse) -> Self {
        Self {
            message: response.message,
            job_id: response.job_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_uses_original_name_and_type_key() {
        let upload = Upload::new(
            "1700-abc.html".to_string(),
            "page.html".to_string(),
            "./uploads/1700-abc.html".to_string(),
            DocumentType::Html,
            10,
        );

        let value = serde_json::to_value(UploadSummaryDto::from(&upload)).unwrap();

        assert_eq!(value["filename"], "page.html");
        assert_eq!(value["type"], "html");
        assert_eq!(value["status"], "completed");
        assert!(value.get("uploadedAt").is_some());
        assert!(value.get("path").is_none());
    }
}
