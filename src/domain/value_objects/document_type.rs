use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Pdf,
    Html,
}

impl DocumentType {
    /// Detect the type from a file name's extension, case-insensitively.
    /// Only `.pdf` and `.html` are accepted.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = Path::new(file_name).extension()?.to_str()?;
        extension.parse().ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Pdf => "pdf",
            DocumentType::Html => "html",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentType::Pdf => ".pdf",
            DocumentType::Html => ".html",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            DocumentType::Pdf => "application/pdf",
            DocumentType::Html => "text/html",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(DocumentType::Pdf),
            "html" => Ok(DocumentType::Html),
            other => Err(format!("Unsupported document type: {}", other)),
        }
    }
}
