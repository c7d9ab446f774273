use async_trait::async_trait;
use html2text::from_read_with_decorator;
use html2text::render::TrivialDecorator;
use regex::Regex;
use std::sync::LazyLock;

use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor, ExtractedContent,
};

static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title pattern is valid")
});

pub struct HtmlExtractor;

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_title(html: &str) -> Option<String> {
        TITLE
            .captures(html)
            .and_then(|captures| captures.get(1))
            .map(|title| title.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|title| !title.is_empty())
    }
}

#[async_trait]
impl DocumentExtractor for HtmlExtractor {
    async fn extract_html(&self, html: &str) -> Result<ExtractedContent, DocumentExtractionError> {
        // Literal text only, never rewrapped
        let text = from_read_with_decorator(html.as_bytes(), usize::MAX, TrivialDecorator::new())
            .map_err(|e| {
                DocumentExtractionError::ExtractionFailed(format!(
                    "Failed to convert HTML to text: {}",
                    e
                ))
            })?;

        Ok(ExtractedContent {
            text: text.trim().to_string(),
            title: Self::extract_title(html),
        })
    }
}
