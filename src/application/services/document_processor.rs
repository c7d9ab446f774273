use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{
    DocumentExtractor, EmbeddingProvider, JobProgress, OcrProvider, PdfPageSource,
    document_extractor::DocumentExtractionError, embedding_provider::EmbeddingProviderError,
    ocr_provider::OcrProviderError,
};
use crate::application::services::chunker::{ParagraphSplitter, TextSplitter};
use crate::domain::entities::{Chunk, HtmlProcessingResult, PdfPageResult, ProcessingResult, Upload};
use crate::domain::repositories::{UploadRepository, UploadRepositoryError};
use crate::domain::value_objects::{DocumentType, PipelineStage};

#[derive(Debug, Error)]
pub enum DocumentProcessingError {
    #[error("Embedding request failed: {0}")]
    EmbeddingRequestFailed(#[from] EmbeddingProviderError),
    #[error("OCR request failed: {0}")]
    OcrRequestFailed(#[from] OcrProviderError),
    #[error("Extraction error: {0}")]
    ExtractionError(#[from] DocumentExtractionError),
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<UploadRepositoryError> for DocumentProcessingError {
    fn from(error: UploadRepositoryError) -> Self {
        DocumentProcessingError::StorageError(error.to_string())
    }
}

/// Runs extraction, chunking and embedding for one upload at a time, strictly
/// in sequence, reporting each step through a [`JobProgress`].
pub struct DocumentProcessorService {
    upload_repository: Arc<dyn UploadRepository>,
    document_extractor: Arc<dyn DocumentExtractor>,
    pdf_pages: Arc<dyn PdfPageSource>,
    ocr_provider: Arc<dyn OcrProvider>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    splitter: ParagraphSplitter,
    mark_failed_on_error: bool,
}

impl DocumentProcessorService {
    pub fn new(
        upload_repository: Arc<dyn UploadRepository>,
        document_extractor: Arc<dyn DocumentExtractor>,
        pdf_pages: Arc<dyn PdfPageSource>,
        ocr_provider: Arc<dyn OcrProvider>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            upload_repository,
            document_extractor,
            pdf_pages,
            ocr_provider,
            embedding_provider,
            splitter: ParagraphSplitter::default(),
            mark_failed_on_error: false,
        }
    }

    pub fn with_splitter(mut self, splitter: ParagraphSplitter) -> Self {
        self.splitter = splitter;
        self
    }

    /// Flip the record to `failed` when a run errors. Off by default: the
    /// record then stays `processing` and only the `error` event reports it.
    pub fn with_mark_failed_on_error(mut self, enabled: bool) -> Self {
        self.mark_failed_on_error = enabled;
        self
    }

    pub async fn process(
        &self,
        mut upload: Upload,
        progress: JobProgress,
    ) -> Result<ProcessingResult, DocumentProcessingError> {
        let job_id = progress.job_id();
        let mut stage = PipelineStage::Starting;

        // Run the pipeline, then report the outcome exactly once
        let outcome = self.run(&mut upload, &progress, &mut stage).await;

        match outcome {
            Ok(result) => {
                tracing::info!(
                    %job_id,
                    chunks = result.chunk_count(),
                    "Processing completed"
                );
                progress.completed(result.clone());
                Ok(result)
            }
            Err(error) => {
                tracing::error!(%job_id, %stage, error = %error, "Processing failed");
                progress.error(error.to_string());
                if self.mark_failed_on_error {
                    self.mark_failed(upload).await;
                }
                Err(error)
            }
        }
    }

    async fn run(
        &self,
        upload: &mut Upload,
        progress: &JobProgress,
        stage: &mut PipelineStage,
    ) -> Result<ProcessingResult, DocumentProcessingError> {
        // Mark as processing before touching the file
        upload
            .start_processing()
            .map_err(DocumentProcessingError::StorageError)?;
        self.upload_repository.update(upload).await?;

        let path = Path::new(upload.path()).to_path_buf();
        // Dispatch by document type
        let result = match upload.document_type() {
            DocumentType::Html => self.process_html(&path, progress, stage).await?,
            DocumentType::Pdf => self.process_pdf(&path, progress, stage).await?,
        };

        // Persist result and status together
        upload
            .complete_processing(result.clone())
            .map_err(DocumentProcessingError::StorageError)?;
        self.upload_repository.update(upload).await?;
        *stage = PipelineStage::Completed;

        Ok(result)
    }

    async fn process_html(
        &self,
        path: &Path,
        progress: &JobProgress,
        stage: &mut PipelineStage,
    ) -> Result<ProcessingResult, DocumentProcessingError> {
        progress.starting("Processing started.");

        *stage = PipelineStage::Extracting;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DocumentExtractionError::IoError(e.to_string()))?;
        // pages in legacy encodings still go through
        let full_html = String::from_utf8_lossy(&bytes).into_owned();
        let extracted = self.document_extractor.extract_html(&full_html).await?;

        *stage = PipelineStage::ChunkingAndEmbedding;
        let chunks = self.embed_chunks(&extracted.text, None, progress).await?;

        *stage = PipelineStage::Finalizing;
        progress.finalizing("Finalizing processing.");

        Ok(ProcessingResult::Html(HtmlProcessingResult {
            full_html,
            extracted_text: extracted.text,
            title: extracted.title,
            chunks,
        }))
    }

    async fn process_pdf(
        &self,
        path: &Path,
        progress: &JobProgress,
        stage: &mut PipelineStage,
    ) -> Result<ProcessingResult, DocumentProcessingError> {
        // an unreadable file fails before any page starts
        let total_pages = self.pdf_pages.page_count(path).await?;
        let mut pages = Vec::with_capacity(total_pages as usize);

        // Pages are processed one after another
        for page_number in 1..=total_pages {
            *stage = PipelineStage::Starting;
            progress.starting(format!("Processing page {} started", page_number));

            *stage = PipelineStage::Extracting;
            // Render then OCR
            let image_path = self.pdf_pages.render_page(path, page_number).await?;
            let extracted_text = self.ocr_provider.recognize(&image_path).await?;

            *stage = PipelineStage::ChunkingAndEmbedding;
            let chunks = self
                .embed_chunks(&extracted_text, Some(page_number), progress)
                .await?;

            *stage = PipelineStage::Finalizing;
            progress.finalizing(format!("Finalizing page {}", page_number));

            pages.push(PdfPageResult {
                page_number,
                image_path: image_path.to_string_lossy().to_string(),
                extracted_text,
                chunks,
            });
        }

        Ok(ProcessingResult::Pdf(pages))
    }

    // Chunk `text` and embed each chunk in order, one request at a time
    async fn embed_chunks(
        &self,
        text: &str,
        page_number: Option<u32>,
        progress: &JobProgress,
    ) -> Result<Vec<Chunk>, DocumentProcessingError> {
        let texts = self.splitter.split_text(text);
        let total_chunks = texts.len();
        let mut chunks = Vec::with_capacity(total_chunks);

        for (index, text) in texts.into_iter().enumerate() {
            // Await each embedding before the next request
            let embedding = self.embedding_provider.embed(&text).await?;
            chunks.push(Chunk { text, embedding });
            progress.chunk_done(page_number, index + 1, total_chunks);
        }

        Ok(chunks)
    }

    async fn mark_failed(&self, mut upload: Upload) {
        let upload_id = upload.id();
        if let Err(e) = upload.fail_processing() {
            tracing::warn!(%upload_id, "Could not mark upload as failed: {}", e);
            return;
        }
        if let Err(e) = self.upload_repository.update(&upload).await {
            tracing::warn!(%upload_id, "Could not persist failed status: {}", e);
        }
    }
}
