use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, header::CONTENT_TYPE};
use serde::Deserialize;
use std::path::Path;

use crate::application::ports::ocr_provider::{OcrProvider, OcrProviderError};

#[derive(Deserialize)]
struct OcrResponse {
    text: String,
}

/// Posts page images to the external OCR endpoint.
#[derive(Debug, Clone)]
pub struct OcrClient {
    client: Client,
    service_url: String,
}

impl OcrClient {
    pub fn new(service_url: impl Into<String>) -> Result<Self, ReqwestError> {
        Ok(Self {
            client: Client::builder().build()?,
            service_url: service_url.into(),
        })
    }
}

#[async_trait]
impl OcrProvider for OcrClient {
    async fn recognize(&self, image_path: &Path) -> Result<String, OcrProviderError> {
        let image = tokio::fs::read(image_path)
            .await
            .map_err(|e| OcrProviderError::ImageUnreadable {
                path: image_path.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(path = %image_path.display(), bytes = image.len(), "Sending page to OCR");

        let response = self
            .client
            .post(&self.service_url)
            .header(CONTENT_TYPE, "image/jpeg")
            .body(image)
            .send()
            .await
            .map_err(|e| OcrProviderError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OcrProviderError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response
            .json::<OcrResponse>()
            .await
            .map_err(|e| OcrProviderError::InvalidResponse(e.to_string()))?;

        Ok(parsed.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn posts_jpeg_bytes_and_returns_text() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("doc_page_1.jpg");
        tokio::fs::write(&image, b"fake-jpeg").await.unwrap();

        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/ocr")
                    .header("content-type", "image/jpeg")
                    .body("fake-jpeg");
                then.status(200).json_body(json!({ "text": "Page text" }));
            })
            .await;

        let client = OcrClient::new(server.url("/ocr")).unwrap();
        let text = client.recognize(&image).await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "Page text");
    }

    #[tokio::test]
    async fn missing_image_is_reported_without_a_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/ocr");
                then.status(200).json_body(json!({ "text": "" }));
            })
            .await;

        let client = OcrClient::new(server.url("/ocr")).unwrap();
        let error = client
            .recognize(Path::new("/definitely/missing/page.jpg"))
            .await
            .unwrap_err();

        mock.assert_hits_async(0).await;
        assert!(matches!(error, OcrProviderError::ImageUnreadable { .. }));
    }

    #[tokio::test]
    async fn server_error_is_request_failure() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("p.jpg");
        tokio::fs::write(&image, b"x").await.unwrap();

        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/ocr");
                then.status(500).body("ocr down");
            })
            .await;

        let client = OcrClient::new(server.url("/ocr")).unwrap();
        let error = client.recognize(&image).await.unwrap_err();

        assert!(matches!(
            error,
            OcrProviderError::RequestFailed { status: 500, .. }
        ));
    }
}
