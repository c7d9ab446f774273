use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrProviderError {
    #[error("Could not read page image {path}: {message}")]
    ImageUnreadable { path: String, message: String },
    #[error("OCR request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },
    #[error("OCR request failed: {0}")]
    NetworkError(String),
    #[error("OCR response invalid: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait OcrProvider: Send + Sync {
    async fn recognize(&self, image_path: &Path) -> Result<String, OcrProviderError>;
}
