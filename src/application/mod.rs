pub mod use_cases;
pub mod services;
pub mod ports;

// Re-export commonly used items
pub use use_cases::*;
pub use services::*;
