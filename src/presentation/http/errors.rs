use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::application::use_cases::{
    delete_upload::DeleteUploadError, get_upload_details::GetUploadDetailsError,
    get_upload_file::GetUploadFileError, list_uploads::ListUploadsError,
    start_processing::StartProcessingError, upload_file::UploadFileError,
};

/// Error reply with a `{"error": "..."}` body.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(message) | ApiError::NotFound(message) => message,
            ApiError::Internal(message) => {
                tracing::error!("Request failed: {}", message);
                message
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<UploadFileError> for ApiError {
    fn from(error: UploadFileError) -> Self {
        match error {
            UploadFileError::ValidationError(message) => ApiError::BadRequest(message),
            other @ UploadFileError::StorageError(_) => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ListUploadsError> for ApiError {
    fn from(error: ListUploadsError) -> Self {
        ApiError::Internal(error.to_string())
    }
}

impl From<GetUploadFileError> for ApiError {
    fn from(error: GetUploadFileError) -> Self {
        match error {
            GetUploadFileError::UploadNotFound(_) => ApiError::NotFound("File not found".to_string()),
            GetUploadFileError::FileMissing(_) => {
                ApiError::NotFound("File not found on disk".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<DeleteUploadError> for ApiError {
    fn from(error: DeleteUploadError) -> Self {
        match error {
            DeleteUploadError::UploadNotFound(_) => ApiError::NotFound("File not found".to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<StartProcessingError> for ApiError {
    fn from(error: StartProcessingError) -> Self {
        match error {
            StartProcessingError::UploadNotFound(_) => {
                ApiError::NotFound("File not found".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<GetUploadDetailsError> for ApiError {
    fn from(error: GetUploadDetailsError) -> Self {
        match error {
            GetUploadDetailsError::UploadNotFound(_) => {
                ApiError::NotFound("File not found".to_string())
            }
            GetUploadDetailsError::NotProcessed(_) => {
                ApiError::NotFound("Processing details not available".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn use_case_errors_map_to_statuses() {
        let validation: ApiError =
            UploadFileError::ValidationError("Only PDF and HTML files are allowed".to_string())
                .into();
        let missing: ApiError = DeleteUploadError::UploadNotFound(Uuid::nil()).into();
        let unprocessed: ApiError = GetUploadDetailsError::NotProcessed(Uuid::nil()).into();
        let storage: ApiError = UploadFileError::StorageError("disk full".to_string()).into();

        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(unprocessed.status(), StatusCode::NOT_FOUND);
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
