use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentExtractionError {
    #[error("Corrupted file: {0}")]
    CorruptedFile(String),
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("IO error: {0}")]
    IoError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedContent {
    pub text: String,
    pub title: Option<String>,
}

#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract_html(&self, html: &str) -> Result<ExtractedContent, DocumentExtractionError>;
}

#[async_trait]
pub trait PdfPageSource: Send + Sync {
    async fn page_count(&self, pdf_path: &Path) -> Result<u32, DocumentExtractionError>;

    /// Produce an image of one page (1-based) and return where it lives.
    async fn render_page(
        &self,
        pdf_path: &Path,
        page_number: u32,
    ) -> Result<PathBuf, DocumentExtractionError>;
}
