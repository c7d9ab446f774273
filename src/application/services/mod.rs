pub mod chunker;
pub mod document_processor;

pub use chunker::{ParagraphSplitter, TextSplitter};
pub use document_processor::{DocumentProcessingError, DocumentProcessorService};
