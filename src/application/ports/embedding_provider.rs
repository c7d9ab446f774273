use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingProviderError {
    #[error("Embedding request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },
    #[error("Embedding request failed: {0}")]
    NetworkError(String),
    #[error("Embedding response invalid: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single chunk. One network round trip per call.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingProviderError>;

    /// Expected vector length, when known.
    fn embedding_dimension(&self) -> Option<usize>;
}
