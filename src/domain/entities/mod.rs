pub mod processing_result;
pub mod upload;

pub use processing_result::{Chunk, HtmlProcessingResult, PdfPageResult, ProcessingResult};
pub use upload::Upload;
