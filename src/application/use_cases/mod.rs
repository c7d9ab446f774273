pub mod delete_upload;
pub mod get_upload_details;
pub mod get_upload_file;
pub mod list_uploads;
pub mod start_processing;
pub mod upload_file;

pub use delete_upload::DeleteUploadUseCase;
pub use get_upload_details::GetUploadDetailsUseCase;
pub use get_upload_file::GetUploadFileUseCase;
pub use list_uploads::ListUploadsUseCase;
pub use start_processing::StartProcessingUseCase;
pub use upload_file::UploadFileUseCase;
