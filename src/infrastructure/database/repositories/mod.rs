pub mod in_memory_upload_repository;
pub mod postgres_upload_repository;

pub use in_memory_upload_repository::InMemoryUploadRepository;
pub use postgres_upload_repository::PostgresUploadRepository;
