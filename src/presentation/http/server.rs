use axum::{Router, extract::DefaultBodyLimit, http::HeaderValue};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::infrastructure::AppContainer;
use crate::presentation::http::{
    handlers::{SseHandler, UploadHandler},
    routes::{event_routes, health_routes, upload_routes},
};

pub struct HttpServer {
    upload_handler: Arc<UploadHandler>,
    sse_handler: Arc<SseHandler>,
    port: u16,
    cors_origin: Option<String>,
    max_upload_bytes: usize,
}

impl HttpServer {
    pub fn new(container: &AppContainer) -> Self {
        Self {
            upload_handler: container.upload_handler.clone(),
            sse_handler: container.sse_handler.clone(),
            port: container.config.server_port,
            cors_origin: container.config.cors_origin.clone(),
            max_upload_bytes: container.config.max_upload_bytes,
        }
    }

    fn cors_layer(&self) -> CorsLayer {
        let origin = match self.cors_origin.as_deref().map(HeaderValue::from_str) {
            Some(Ok(origin)) => AllowOrigin::exact(origin),
            Some(Err(e)) => {
                tracing::warn!("Ignoring invalid CORS_ORIGIN ({}), allowing any origin", e);
                AllowOrigin::from(Any)
            }
            None => AllowOrigin::from(Any),
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any)
    }

    pub fn router(&self) -> Router {
        Router::new()
            .merge(health_routes())
            .merge(upload_routes(self.upload_handler.clone()))
            .merge(event_routes(self.sse_handler.clone()))
            .layer(self.cors_layer())
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(self.max_upload_bytes))
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(
                                "Received request: {} {}",
                                request.method(),
                                request.uri()
                            );
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                "Response: {} (took {} ms)",
                                response.status(),
                                latency.as_millis()
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                "Request failed: {:?} (took {} ms)",
                                error,
                                latency.as_millis()
                            );
                        },
                    ),
            )
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        let app = self.router();
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "Listening");
        axum::serve(listener, app).await
    }
}
