pub mod sse_handler;
pub mod upload_handler;

pub use sse_handler::SseHandler;
pub use upload_handler::UploadHandler;
