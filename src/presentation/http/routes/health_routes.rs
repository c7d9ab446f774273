use axum::{Json, Router, routing::get};

use crate::presentation::http::dto::{HealthResponseDto, MessageResponseDto};

pub fn health_routes() -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
}

async fn root_handler() -> Json<MessageResponseDto> {
    Json(MessageResponseDto {
        message: "docstream upload service".to_string(),
    })
}

async fn health_handler() -> Json<HealthResponseDto> {
    Json(HealthResponseDto {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
