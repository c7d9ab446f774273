use axum::{
    extract::{Path, State},
    response::{
        IntoResponse, Response, Sse,
        sse::{Event, KeepAlive},
    },
};
use futures::stream::{self, Stream, StreamExt};
use std::{convert::Infallible, sync::Arc, time::Duration};
use tokio::sync::broadcast::{Receiver, error::RecvError};
use uuid::Uuid;

use crate::application::ports::ProgressEvent;
use crate::infrastructure::messaging::BroadcastProgressPublisher;

pub struct SseHandler {
    publisher: Arc<BroadcastProgressPublisher>,
}

impl SseHandler {
    pub fn new(publisher: Arc<BroadcastProgressPublisher>) -> Self {
        Self { publisher }
    }

    // Every job's events, for as long as the client stays connected
    pub async fn all_events(State(handler): State<Arc<SseHandler>>) -> impl IntoResponse {
        let events = event_stream(handler.publisher.subscribe(), None);
        create_sse_response(events.filter_map(|event| async move { to_sse_event(&event) }))
    }

    // One job's events; ends after its `completed` or `error`
    pub async fn job_events(
        State(handler): State<Arc<SseHandler>>,
        Path(job_id): Path<Uuid>,
    ) -> impl IntoResponse {
        let events = event_stream(handler.publisher.subscribe(), Some(job_id));
        create_sse_response(events.filter_map(|event| async move { to_sse_event(&event) }))
    }
}

/// Progress events from `receiver`, optionally narrowed to one job. A job
/// stream ends after that job's terminal event, or as soon as it lags.
pub fn event_stream(
    receiver: Receiver<ProgressEvent>,
    job_id: Option<Uuid>,
) -> impl Stream<Item = ProgressEvent> + Send + 'static {
    stream::unfold(Some(receiver), move |state| async move {
        let mut receiver = state?;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let Some(wanted) = job_id else {
                        return Some((event, Some(receiver)));
                    };
                    if event.job_id() != wanted {
                        continue;
                    }
                    let next = if event.is_terminal() { None } else { Some(receiver) };
                    return Some((event, next));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, ?job_id, "Event listener lagged behind");
                    // the terminal event may be among the skipped ones
                    if job_id.is_some() {
                        return None;
                    }
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}

// Event name is the kind, data is the JSON payload
fn to_sse_event(event: &ProgressEvent) -> Option<Result<Event, Infallible>> {
    match Event::default().event(event.name()).json_data(event) {
        Ok(sse_event) => Some(Ok(sse_event)),
        Err(e) => {
            tracing::error!(job_id = %event.job_id(), "Could not encode event: {}", e);
            None
        }
    }
}

// Helper function to create SSE response with keep-alive
pub fn create_sse_response<S>(stream: S) -> Response
where
    S: Stream<Item = Result<Event, Infallible>> + Send + 'static,
{
    Sse::new(stream)
        .keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(30))
                .text("keep-alive"),
        )
        .into_response()
}
