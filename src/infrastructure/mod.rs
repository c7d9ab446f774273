pub mod config;
pub mod container;
pub mod database;
pub mod external_services;
pub mod file_system;
pub mod messaging;

// Re-export commonly used items
pub use config::AppConfig;
pub use container::AppContainer;
pub use external_services::{InferenceEmbeddingProvider, OcrClient};
pub use file_system::LocalFileStorage;
