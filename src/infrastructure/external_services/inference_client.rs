use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError};
use serde::{Deserialize, Serialize};

use crate::application::ports::embedding_provider::{EmbeddingProvider, EmbeddingProviderError};

#[derive(Serialize)]
pub struct EmbeddingsRequest<'a> {
    pub text: &'a str,
}

#[derive(Deserialize)]
pub struct EmbeddingsResponse {
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct EmbeddingsClientConfig {
    pub service_url: String,
    /// Reject vectors of any other length when set.
    pub embedding_dimension: Option<usize>,
}

/// Client for the external embedding endpoint. One POST per chunk, no retries.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: Client,
    config: EmbeddingsClientConfig,
}

impl InferenceClient {
    pub fn new(config: EmbeddingsClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    pub async fn get_embedding(&self, text: &str) -> Result<Vec<f32>, EmbeddingProviderError> {
        let response = self
            .client
            .post(&self.config.service_url)
            .json(&EmbeddingsRequest { text })
            .send()
            .await
            .map_err(|e| EmbeddingProviderError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingProviderError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response
            .json::<EmbeddingsResponse>()
            .await
            .map_err(|e| EmbeddingProviderError::InvalidResponse(e.to_string()))?;

        Ok(parsed.embedding)
    }
}

// Adapter to implement the EmbeddingProvider trait
pub struct InferenceEmbeddingProvider {
    client: InferenceClient,
}

impl InferenceEmbeddingProvider {
    pub fn new(client: InferenceClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: EmbeddingsClientConfig) -> Result<Self, ReqwestError> {
        Ok(Self::new(InferenceClient::new(config)?))
    }
}

#[async_trait]
impl EmbeddingProvider for InferenceEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingProviderError> {
        let embedding = self.client.get_embedding(text).await?;

        if embedding.is_empty() {
            return Err(EmbeddingProviderError::InvalidResponse(
                "No embedding returned".to_string(),
            ));
        }

        if let Some(expected) = self.embedding_dimension() {
            if embedding.len() != expected {
                return Err(EmbeddingProviderError::InvalidResponse(format!(
                    "Expected {} dimensions, got {}",
                    expected,
                    embedding.len()
                )));
            }
        }

        Ok(embedding)
    }

    fn embedding_dimension(&self) -> Option<usize> {
        self.client.config.embedding_dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn provider(server: &MockServer, dimension: Option<usize>) -> InferenceEmbeddingProvider {
        InferenceEmbeddingProvider::from_config(EmbeddingsClientConfig {
            service_url: server.url("/embed"),
            embedding_dimension: dimension,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn posts_text_and_returns_vector() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/embed")
                    .json_body(json!({ "text": "hello world" }));
                then.status(200)
                    .json_body(json!({ "embedding": [0.5, -0.25, 1.0] }));
            })
            .await;

        let embedding = provider(&server, Some(3)).embed("hello world").await.unwrap();

        mock.assert_async().await;
        assert_eq!(embedding, vec![0.5, -0.25, 1.0]);
    }

    #[tokio::test]
    async fn non_success_status_is_request_failure() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/embed");
                then.status(503).body("model loading");
            })
            .await;

        let error = provider(&server, None).embed("x").await.unwrap_err();

        // exactly one attempt
        mock.assert_hits_async(1).await;
        match error {
            EmbeddingProviderError::RequestFailed { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "model loading");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn wrong_dimension_is_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/embed");
                then.status(200).json_body(json!({ "embedding": [1.0, 2.0] }));
            })
            .await;

        let error = provider(&server, Some(3)).embed("x").await.unwrap_err();

        assert!(matches!(error, EmbeddingProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn undecodable_body_is_invalid_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/embed");
                then.status(200).body("not json");
            })
            .await;

        let error = provider(&server, None).embed("x").await.unwrap_err();

        assert!(matches!(error, EmbeddingProviderError::InvalidResponse(_)));
    }
}
