pub mod html_extractor;
pub mod pdf_extractor;

pub use html_extractor::HtmlExtractor;
pub use pdf_extractor::PdfExtractor;
