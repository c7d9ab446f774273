use async_trait::async_trait;
use lopdf::Document;
use std::path::{Path, PathBuf};

use crate::application::ports::document_extractor::{DocumentExtractionError, PdfPageSource};

/// Counts pages with lopdf. Page rendering is a stub: it only computes where
/// the page image is expected under `pages_dir`.
pub struct PdfExtractor {
    pages_dir: PathBuf,
}

impl PdfExtractor {
    pub fn new(pages_dir: PathBuf) -> Self {
        Self { pages_dir }
    }

    pub fn page_image_path(&self, pdf_path: &Path, page_number: u32) -> PathBuf {
        let stem = pdf_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());
        self.pages_dir
            .join(format!("{}_page_{}.jpg", stem, page_number))
    }
}

#[async_trait]
impl PdfPageSource for PdfExtractor {
    async fn page_count(&self, pdf_path: &Path) -> Result<u32, DocumentExtractionError> {
        let path = pdf_path.to_path_buf();
        let count = tokio::task::spawn_blocking(move || {
            Document::load(&path)
                .map(|doc| doc.get_pages().len() as u32)
                .map_err(|e| DocumentExtractionError::CorruptedFile(e.to_string()))
        })
        .await
        .map_err(|e| DocumentExtractionError::ExtractionFailed(e.to_string()))??;

        tracing::debug!(path = %pdf_path.display(), pages = count, "Counted PDF pages");
        Ok(count)
    }

    async fn render_page(
        &self,
        pdf_path: &Path,
        page_number: u32,
    ) -> Result<PathBuf, DocumentExtractionError> {
        if page_number == 0 {
            return Err(DocumentExtractionError::ExtractionFailed(
                "Page numbers start at 1".to_string(),
            ));
        }
        Ok(self.page_image_path(pdf_path, page_number))
    }
}
