pub mod document_extractors;
pub mod inference_client;
pub mod ocr_client;

pub use inference_client::InferenceEmbeddingProvider;
pub use ocr_client::OcrClient;
