use axum::{Router, routing::get};
use std::sync::Arc;

use crate::presentation::http::handlers::SseHandler;

pub fn event_routes(sse_handler: Arc<SseHandler>) -> Router {
    Router::new()
        .route("/api/events", get(SseHandler::all_events))
        .route("/api/events/{job_id}", get(SseHandler::job_events))
        .with_state(sse_handler)
}
