pub mod document_extractor;
pub mod embedding_provider;
pub mod file_storage;
pub mod ocr_provider;
pub mod progress_publisher;

pub use document_extractor::{DocumentExtractor, PdfPageSource};
pub use embedding_provider::EmbeddingProvider;
pub use file_storage::FileStorage;
pub use ocr_provider::OcrProvider;
pub use progress_publisher::{JobProgress, ProgressEvent, ProgressPublisher};
