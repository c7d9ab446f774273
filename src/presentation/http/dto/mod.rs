pub mod response_dto;
pub mod upload_dto;

pub use response_dto::*;
pub use upload_dto::*;
