use serde::{Deserialize, Serialize};

/// A slice of extracted text paired with its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlProcessingResult {
    pub full_html: String,
    pub extracted_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub chunks: Vec<Chunk>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfPageResult {
    pub page_number: u32,
    pub image_path: String,
    pub extracted_text: String,
    pub chunks: Vec<Chunk>,
}

/// Output of one pipeline run. HTML yields a single object, PDF one entry per page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProcessingResult {
    Html(HtmlProcessingResult),
    Pdf(Vec<PdfPageResult>),
}

impl ProcessingResult {
    pub fn chunk_count(&self) -> usize {
        match self {
            ProcessingResult::Html(result) => result.chunks.len(),
            ProcessingResult::Pdf(pages) => pages.iter().map(|page| page.chunks.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chunk(text: &str) -> Chunk {
        Chunk {
            text: text.to_string(),
            embedding: vec![0.5, 0.25],
        }
    }

    #[test]
    fn html_result_uses_camel_case_keys() {
        let result = ProcessingResult::Html(HtmlProcessingResult {
            full_html: "<p>hi</p>".to_string(),
            extracted_text: "hi".to_string(),
            title: None,
            chunks: vec![chunk("hi")],
        });

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "fullHtml": "<p>hi</p>",
                "extractedText": "hi",
                "chunks": [{ "text": "hi", "embedding": [0.5, 0.25] }]
            })
        );
    }

    #[test]
    fn pdf_result_is_a_page_array() {
        let value = json!([{
            "pageNumber": 1,
            "imagePath": "/tmp/p1.jpg",
            "extractedText": "a\n\nb",
            "chunks": [{ "text": "a\n\nb", "embedding": [1.0] }]
        }]);

        let result: ProcessingResult = serde_json::from_value(value).unwrap();
        match &result {
            ProcessingResult::Pdf(pages) => {
                assert_eq!(pages.len(), 1);
                assert_eq!(pages[0].page_number, 1);
            }
            other => panic!("expected pdf result, got {:?}", other),
        }
        assert_eq!(result.chunk_count(), 1);
    }

    #[test]
    fn counts_chunks_across_pages() {
        let page = |n: u32, count: usize| PdfPageResult {
            page_number: n,
            image_path: format!("p{}.jpg", n),
            extracted_text: String::new(),
            chunks: (0..count).map(|i| chunk(&i.to_string())).collect(),
        };
        let result = ProcessingResult::Pdf(vec![page(1, 2), page(2, 0), page(3, 3)]);

        assert_eq!(result.chunk_count(), 5);
    }
}
