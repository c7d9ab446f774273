use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::ProcessingResult;
use crate::domain::value_objects::{DocumentType, ProcessingStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upload {
    id: Uuid,
    filename: String,
    original_name: String,
    path: String,
    uploaded_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    status: ProcessingStatus,
    document_type: DocumentType,
    size: i64,
    processing_result: Option<ProcessingResult>,
}

impl Upload {
    /// A freshly stored upload. Its status is `completed`: the upload itself
    /// finished, processing has not been requested yet.
    pub fn new(
        filename: String,
        original_name: String,
        path: String,
        document_type: DocumentType,
        size: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            filename,
            original_name,
            path,
            uploaded_at: now,
            updated_at: now,
            status: ProcessingStatus::Completed,
            document_type,
            size,
            processing_result: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_database(
        id: Uuid,
        filename: String,
        original_name: String,
        path: String,
        uploaded_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        status: ProcessingStatus,
        document_type: DocumentType,
        size: i64,
        processing_result: Option<ProcessingResult>,
    ) -> Self {
        Self {
            id,
            filename,
            original_name,
            path,
            uploaded_at,
            updated_at,
            status,
            document_type,
            size,
            processing_result,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn status(&self) -> ProcessingStatus {
        self.status
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn processing_result(&self) -> Option<&ProcessingResult> {
        self.processing_result.as_ref()
    }

    /// Begins a run; any result from an earlier run is dropped.
    pub fn start_processing(&mut self) -> Result<(), String> {
        self.transition(ProcessingStatus::Processing)?;
        self.processing_result = None;
        Ok(())
    }

    pub fn complete_processing(&mut self, result: ProcessingResult) -> Result<(), String> {
        self.transition(ProcessingStatus::Completed)?;
        self.processing_result = Some(result);
        Ok(())
    }

    pub fn fail_processing(&mut self) -> Result<(), String> {
        self.transition(ProcessingStatus::Failed)
    }

    fn transition(&mut self, new_status: ProcessingStatus) -> Result<(), String> {
        if !self.status.can_transition_to(&new_status) {
            return Err(format!(
                "Upload {} cannot move from {} to {}",
                self.id, self.status, new_status
            ));
        }
        self.status = new_status;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Chunk, HtmlProcessingResult};

    fn sample_upload() -> Upload {
        Upload::new(
            "1700000000000-abc.html".to_string(),
            "page.html".to_string(),
            "/uploads/1700000000000-abc.html".to_string(),
            DocumentType::Html,
            42,
        )
    }

    fn sample_result() -> ProcessingResult {
        ProcessingResult::Html(HtmlProcessingResult {
            full_html: "<p>x</p>".to_string(),
            extracted_text: "x".to_string(),
            title: None,
            chunks: vec![Chunk {
                text: "x".to_string(),
                embedding: vec![0.1],
            }],
        })
    }

    #[test]
    fn test_upload_creation() {
        let upload = sample_upload();

        assert_eq!(upload.original_name(), "page.html");
        assert_eq!(upload.size(), 42);
        assert_eq!(upload.status(), ProcessingStatus::Completed);
        assert_eq!(upload.document_type(), DocumentType::Html);
        assert!(upload.processing_result().is_none());
    }

    #[test]
    fn test_processing_workflow() {
        let mut upload = sample_upload();

        upload.start_processing().unwrap();
        assert_eq!(upload.status(), ProcessingStatus::Processing);

        upload.complete_processing(sample_result()).unwrap();
        assert_eq!(upload.status(), ProcessingStatus::Completed);
        assert_eq!(upload.processing_result().map(|r| r.chunk_count()), Some(1));
    }

    #[test]
    fn test_cannot_complete_without_starting() {
        let mut upload = sample_upload();

        assert!(upload.complete_processing(sample_result()).is_err());
        assert!(upload.fail_processing().is_err());
        assert!(upload.processing_result().is_none());
    }

    #[test]
    fn test_processing_failure() {
        let mut upload = sample_upload();

        upload.start_processing().unwrap();
        upload.fail_processing().unwrap();
        assert_eq!(upload.status(), ProcessingStatus::Failed);

        // a failed upload can be processed again
        assert!(upload.start_processing().is_ok());
    }

    #[test]
    fn test_reprocessing_clears_previous_result() {
        let mut upload = sample_upload();
        upload.start_processing().unwrap();
        upload.complete_processing(sample_result()).unwrap();

        upload.start_processing().unwrap();

        assert_eq!(upload.status(), ProcessingStatus::Processing);
        assert!(upload.processing_result().is_none());
    }
}
