use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{
    DeleteUploadUseCase, GetUploadDetailsUseCase, GetUploadFileUseCase, ListUploadsUseCase,
    StartProcessingUseCase, UploadFileUseCase, delete_upload::DeleteUploadRequest,
    get_upload_details::GetUploadDetailsRequest, get_upload_file::GetUploadFileRequest,
    start_processing::StartProcessingRequest, upload_file::UploadFileRequest,
};
use crate::presentation::http::dto::{MessageResponseDto, ProcessStartedDto, UploadSummaryDto};
use crate::presentation::http::errors::ApiError;

const FILE_FIELD: &str = "file";

pub struct UploadHandler {
    upload_file_use_case: Arc<UploadFileUseCase>,
    list_uploads_use_case: Arc<ListUploadsUseCase>,
    get_upload_file_use_case: Arc<GetUploadFileUseCase>,
    delete_upload_use_case: Arc<DeleteUploadUseCase>,
    start_processing_use_case: Arc<StartProcessingUseCase>,
    get_upload_details_use_case: Arc<GetUploadDetailsUseCase>,
}

impl UploadHandler {
    pub fn new(
        upload_file_use_case: Arc<UploadFileUseCase>,
        list_uploads_use_case: Arc<ListUploadsUseCase>,
        get_upload_file_use_case: Arc<GetUploadFileUseCase>,
        delete_upload_use_case: Arc<DeleteUploadUseCase>,
        start_processing_use_case: Arc<StartProcessingUseCase>,
        get_upload_details_use_case: Arc<GetUploadDetailsUseCase>,
    ) -> Self {
        Self {
            upload_file_use_case,
            list_uploads_use_case,
            get_upload_file_use_case,
            delete_upload_use_case,
            start_processing_use_case,
            get_upload_details_use_case,
        }
    }

    // Store a multipart upload
    pub async fn upload_file(
        State(handler): State<Arc<UploadHandler>>,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, ApiError> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?
        {
            // Only the "file" field counts
            if field.name() != Some(FILE_FIELD) {
                continue;
            }

            let original_name = field
                .file_name()
                .map(str::to_string)
                .ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;

            let file_data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?
                .to_vec();

            // Execute use case
            let response = handler
                .upload_file_use_case
                .execute(UploadFileRequest {
                    original_name,
                    file_data,
                })
                .await?;

            return Ok((
                StatusCode::CREATED,
                Json(UploadSummaryDto::from(&response.upload)),
            ));
        }

        Err(ApiError::BadRequest("No file uploaded".to_string()))
    }

    // List uploads, newest first
    pub async fn list_uploads(
        State(handler): State<Arc<UploadHandler>>,
    ) -> Result<impl IntoResponse, ApiError> {
        let response = handler.list_uploads_use_case.execute().await?;
        let uploads: Vec<UploadSummaryDto> =
            response.uploads.iter().map(UploadSummaryDto::from).collect();

        Ok(Json(uploads))
    }

    // Stream the stored bytes back
    pub async fn download_file(
        State(handler): State<Arc<UploadHandler>>,
        Path(upload_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, ApiError> {
        let response = handler
            .get_upload_file_use_case
            .execute(GetUploadFileRequest { upload_id })
            .await?;

        // Inline so browsers can preview PDFs
        let disposition = format!(
            "inline; filename=\"{}\"",
            sanitize_header_file_name(&response.original_name)
        );

        Ok((
            [
                (
                    header::CONTENT_TYPE,
                    response.document_type.content_type().to_string(),
                ),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            response.data,
        ))
    }

    // Delete record and file
    pub async fn delete_upload(
        State(handler): State<Arc<UploadHandler>>,
        Path(upload_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, ApiError> {
        let response = handler
            .delete_upload_use_case
            .execute(DeleteUploadRequest { upload_id })
            .await?;

        Ok(Json(MessageResponseDto {
            message: response.message,
        }))
    }

    // Kick off processing; progress goes out over SSE
    pub async fn process_upload(
        State(handler): State<Arc<UploadHandler>>,
        Path(upload_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, ApiError> {
        let response = handler
            .start_processing_use_case
            .execute(StartProcessingRequest { upload_id })
            .await?;

        Ok((StatusCode::ACCEPTED, Json(ProcessStartedDto::from(response))))
    }

    // Stored processing result
    pub async fn upload_details(
        State(handler): State<Arc<UploadHandler>>,
        Path(upload_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, ApiError> {
        let response = handler
            .get_upload_details_use_case
            .execute(GetUploadDetailsRequest { upload_id })
            .await?;

        Ok(Json(response.processing_result))
    }
}

// Drop characters that would break a quoted header parameter
fn sanitize_header_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .collect()
}
