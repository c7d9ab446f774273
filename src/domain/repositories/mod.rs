pub mod upload_repository;

pub use upload_repository::{UploadRepository, UploadRepositoryError};
