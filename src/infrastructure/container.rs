use std::sync::Arc;
use thiserror::Error;

use crate::{
    application::{
        ports::{
            DocumentExtractor, EmbeddingProvider, FileStorage, OcrProvider, PdfPageSource,
            ProgressPublisher,
        },
        services::{DocumentProcessorService, ParagraphSplitter},
        use_cases::{
            DeleteUploadUseCase, GetUploadDetailsUseCase, GetUploadFileUseCase,
            ListUploadsUseCase, StartProcessingUseCase, UploadFileUseCase,
        },
    },
    domain::repositories::UploadRepository,
    infrastructure::{
        config::AppConfig,
        database::{
            DatabaseError, InMemoryUploadRepository, PostgresUploadRepository,
            create_connection_pool, run_migrations,
        },
        external_services::{
            InferenceEmbeddingProvider, OcrClient,
            document_extractors::{HtmlExtractor, PdfExtractor},
            inference_client::EmbeddingsClientConfig,
        },
        file_system::LocalFileStorage,
        messaging::BroadcastProgressPublisher,
    },
    presentation::http::handlers::{SseHandler, UploadHandler},
};

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Database setup failed: {0}")]
    Database(#[from] DatabaseError),
    #[error("HTTP client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("Upload directory setup failed: {0}")]
    Storage(String),
}

pub struct AppContainer {
    pub config: AppConfig,

    // Repositories
    pub upload_repository: Arc<dyn UploadRepository>,

    // External Services
    pub embedding_provider: Arc<dyn EmbeddingProvider>,
    pub ocr_provider: Arc<dyn OcrProvider>,
    pub file_storage: Arc<dyn FileStorage>,
    pub progress_publisher: Arc<BroadcastProgressPublisher>,

    // Application Services
    pub document_processor: Arc<DocumentProcessorService>,

    // Use Cases
    pub upload_file_use_case: Arc<UploadFileUseCase>,
    pub list_uploads_use_case: Arc<ListUploadsUseCase>,
    pub get_upload_file_use_case: Arc<GetUploadFileUseCase>,
    pub delete_upload_use_case: Arc<DeleteUploadUseCase>,
    pub start_processing_use_case: Arc<StartProcessingUseCase>,
    pub get_upload_details_use_case: Arc<GetUploadDetailsUseCase>,

    // HTTP Handlers
    pub upload_handler: Arc<UploadHandler>,
    pub sse_handler: Arc<SseHandler>,
}

impl AppContainer {
    pub async fn new(config: AppConfig) -> Result<Self, ContainerError> {
        let upload_repository: Arc<dyn UploadRepository> = match &config.database_url {
            Some(database_url) => {
                let pool = create_connection_pool(database_url)?;
                let migration_pool = pool.clone();
                tokio::task::spawn_blocking(move || run_migrations(&migration_pool))
                    .await
                    .map_err(|e| DatabaseError::MigrationError(e.to_string()))??;
                tracing::info!("Using Postgres upload store");
                Arc::new(PostgresUploadRepository::new(pool))
            }
            None => {
                tracing::warn!("DATABASE_URL not set, uploads are kept in memory");
                Arc::new(InMemoryUploadRepository::new())
            }
        };

        let embedding_provider: Arc<dyn EmbeddingProvider> =
            Arc::new(InferenceEmbeddingProvider::from_config(EmbeddingsClientConfig {
                service_url: config.embed_api_url.clone(),
                embedding_dimension: config.embedding_dimension,
            })?);
        let ocr_provider: Arc<dyn OcrProvider> =
            Arc::new(OcrClient::new(config.ocr_api_url.clone())?);

        let storage = LocalFileStorage::new(config.upload_dir.clone());
        storage
            .ensure_directory_exists()
            .await
            .map_err(|e| ContainerError::Storage(e.to_string()))?;

        Ok(Self::with_components(
            config,
            upload_repository,
            Arc::new(storage),
            embedding_provider,
            ocr_provider,
        ))
    }

    /// Wire everything around the given store and external services.
    pub fn with_components(
        config: AppConfig,
        upload_repository: Arc<dyn UploadRepository>,
        file_storage: Arc<dyn FileStorage>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        ocr_provider: Arc<dyn OcrProvider>,
    ) -> Self {
        let progress_publisher = Arc::new(BroadcastProgressPublisher::new(config.event_buffer));
        let document_extractor: Arc<dyn DocumentExtractor> = Arc::new(HtmlExtractor::new());
        let pdf_pages: Arc<dyn PdfPageSource> = Arc::new(PdfExtractor::new(config.pages_dir()));

        // Create application services
        let document_processor = Arc::new(
            DocumentProcessorService::new(
                upload_repository.clone(),
                document_extractor,
                pdf_pages,
                ocr_provider.clone(),
                embedding_provider.clone(),
            )
            .with_splitter(ParagraphSplitter::new(config.chunk_max_length))
            .with_mark_failed_on_error(config.mark_failed_on_error),
        );

        // Create use cases
        let upload_file_use_case = Arc::new(UploadFileUseCase::new(
            upload_repository.clone(),
            file_storage.clone(),
        ));
        let list_uploads_use_case = Arc::new(ListUploadsUseCase::new(upload_repository.clone()));
        let get_upload_file_use_case = Arc::new(GetUploadFileUseCase::new(
            upload_repository.clone(),
            file_storage.clone(),
        ));
        let delete_upload_use_case = Arc::new(DeleteUploadUseCase::new(
            upload_repository.clone(),
            file_storage.clone(),
        ));
        let publisher: Arc<dyn ProgressPublisher> = progress_publisher.clone();
        let start_processing_use_case = Arc::new(StartProcessingUseCase::new(
            upload_repository.clone(),
            document_processor.clone(),
            publisher,
        ));
        let get_upload_details_use_case =
            Arc::new(GetUploadDetailsUseCase::new(upload_repository.clone()));

        // Create HTTP handlers
        let upload_handler = Arc::new(UploadHandler::new(
            upload_file_use_case.clone(),
            list_uploads_use_case.clone(),
            get_upload_file_use_case.clone(),
            delete_upload_use_case.clone(),
            start_processing_use_case.clone(),
            get_upload_details_use_case.clone(),
        ));
        let sse_handler = Arc::new(SseHandler::new(progress_publisher.clone()));

        Self {
            config,
            upload_repository,
            embedding_provider,
            ocr_provider,
            file_storage,
            progress_publisher,
            document_processor,
            upload_file_use_case,
            list_uploads_use_case,
            get_upload_file_use_case,
            delete_upload_use_case,
            start_processing_use_case,
            get_upload_details_use_case,
            upload_handler,
            sse_handler,
        }
    }
}
