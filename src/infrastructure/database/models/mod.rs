pub mod upload_model;

pub use upload_model::*;
