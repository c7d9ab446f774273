use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::ProcessingResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageMessage {
    pub job_id: Uuid,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub job_id: Uuid,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    pub chunk_index: usize,
    pub total_chunks: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedPayload {
    pub job_id: Uuid,
    pub result: ProcessingResult,
}

/// Lifecycle events of one job. Serializes to the bare payload; the kind is
/// carried separately by [`ProgressEvent::name`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProgressEvent {
    ProcessingStarting(StageMessage),
    ProgressUpdate(ProgressUpdate),
    Finalizing(StageMessage),
    Completed(CompletedPayload),
    Error(StageMessage),
}

impl ProgressEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ProgressEvent::ProcessingStarting(_) => "processingStarting",
            ProgressEvent::ProgressUpdate(_) => "progressUpdate",
            ProgressEvent::Finalizing(_) => "finalizing",
            ProgressEvent::Completed(_) => "completed",
            ProgressEvent::Error(_) => "error",
        }
    }

    pub fn job_id(&self) -> Uuid {
        match self {
            ProgressEvent::ProcessingStarting(payload)
            | ProgressEvent::Finalizing(payload)
            | ProgressEvent::Error(payload) => payload.job_id,
            ProgressEvent::ProgressUpdate(payload) => payload.job_id,
            ProgressEvent::Completed(payload) => payload.job_id,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ProgressEvent::Completed(_) | ProgressEvent::Error(_))
    }
}

/// Publish-only push channel. Delivery is fire-and-forget.
pub trait ProgressPublisher: Send + Sync {
    fn publish(&self, event: ProgressEvent);
}

/// Percent complete after `index` of `total` chunks, rounded half up.
pub fn progress_percent(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((index as f64 / total as f64) * 100.0).round() as u8
}

/// A publisher bound to one job id.
#[derive(Clone)]
pub struct JobProgress {
    job_id: Uuid,
    publisher: Arc<dyn ProgressPublisher>,
}

impl JobProgress {
    pub fn new(job_id: Uuid, publisher: Arc<dyn ProgressPublisher>) -> Self {
        Self { job_id, publisher }
    }

    pub fn job_id(&self) -> Uuid {
        self.job_id
    }

    pub fn starting(&self, message: impl Into<String>) {
        self.publisher
            .publish(ProgressEvent::ProcessingStarting(self.stage_message(message)));
    }

    pub fn chunk_done(&self, page_number: Option<u32>, chunk_index: usize, total_chunks: usize) {
        let message = match page_number {
            Some(page) => format!(
                "Page {}: processed chunk {} of {}",
                page, chunk_index, total_chunks
            ),
            None => format!("Processed chunk {} of {}", chunk_index, total_chunks),
        };
        self.publisher.publish(ProgressEvent::ProgressUpdate(ProgressUpdate {
            job_id: self.job_id,
            progress: progress_percent(chunk_index, total_chunks),
            page_number,
            chunk_index,
            total_chunks,
            message,
        }));
    }

    pub fn finalizing(&self, message: impl Into<String>) {
        self.publisher
            .publish(ProgressEvent::Finalizing(self.stage_message(message)));
    }

    pub fn completed(&self, result: ProcessingResult) {
        self.publisher.publish(ProgressEvent::Completed(CompletedPayload {
            job_id: self.job_id,
            result,
        }));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publisher
            .publish(ProgressEvent::Error(self.stage_message(message)));
    }

    fn stage_message(&self, message: impl Into<String>) -> StageMessage {
        StageMessage {
            job_id: self.job_id,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<ProgressEvent>>);

    impl ProgressPublisher for Recorder {
        fn publish(&self, event: ProgressEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    #[test]
    fn percent_rounds_like_the_client_expects() {
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(3, 3), 100);
        assert_eq!(progress_percent(1, 8), 13);
        assert_eq!(progress_percent(1, 200), 1);
    }

    #[test]
    fn job_progress_tags_every_event_with_its_job() {
        let recorder = Arc::new(Recorder::default());
        let job_id = Uuid::new_v4();
        let progress = JobProgress::new(job_id, recorder.clone());

        progress.starting("Processing started.");
        progress.chunk_done(None, 1, 2);
        progress.finalizing("Finalizing processing.");
        progress.error("boom");

        let events = recorder.0.lock().unwrap();
        let names: Vec<_> = events.iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec!["processingStarting", "progressUpdate", "finalizing", "error"]
        );
        assert!(events.iter().all(|e| e.job_id() == job_id));
        assert!(events[3].is_terminal());
        assert!(!events[1].is_terminal());
    }

    #[test]
    fn progress_update_payload_shape() {
        let job_id = Uuid::nil();
        let event = ProgressEvent::ProgressUpdate(ProgressUpdate {
            job_id,
            progress: 50,
            page_number: Some(2),
            chunk_index: 1,
            total_chunks: 2,
            message: "Page 2: processed chunk 1 of 2".to_string(),
        });

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "jobId": job_id,
                "progress": 50,
                "pageNumber": 2,
                "chunkIndex": 1,
                "totalChunks": 2,
                "message": "Page 2: processed chunk 1 of 2"
            })
        );
    }
}
