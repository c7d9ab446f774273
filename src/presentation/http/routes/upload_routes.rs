use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::UploadHandler;

pub fn upload_routes(upload_handler: Arc<UploadHandler>) -> Router {
    Router::new()
        .route(
            "/api/uploads",
            post(UploadHandler::upload_file).get(UploadHandler::list_uploads),
        )
        .route(
            "/api/uploads/{id}",
            get(UploadHandler::download_file).delete(UploadHandler::delete_upload),
        )
        .route("/api/uploads/process/{id}", post(UploadHandler::process_upload))
        .route("/api/uploads/details/{id}", get(UploadHandler::upload_details))
        .with_state(upload_handler)
}
