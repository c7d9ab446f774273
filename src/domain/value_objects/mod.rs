pub mod document_type;
pub mod pipeline_stage;
pub mod processing_status;

pub use document_type::DocumentType;
pub use pipeline_stage::PipelineStage;
pub use processing_status::ProcessingStatus;
