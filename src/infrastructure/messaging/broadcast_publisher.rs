use tokio::sync::broadcast;

use crate::application::ports::{ProgressEvent, ProgressPublisher};

pub const DEFAULT_EVENT_BUFFER: usize = 256;

/// Fans progress events out to every connected listener. Slow listeners
/// drop the oldest events once `capacity` is exceeded.
#[derive(Clone)]
pub struct BroadcastProgressPublisher {
    sender: broadcast::Sender<ProgressEvent>,
}

impl Default for BroadcastProgressPublisher {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER)
    }
}

impl BroadcastProgressPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.sender.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl ProgressPublisher for BroadcastProgressPublisher {
    fn publish(&self, event: ProgressEvent) {
        tracing::debug!(
            job_id = %event.job_id(),
            event = event.name(),
            listeners = self.listener_count(),
            "Publishing progress event"
        );
        // no listeners is fine
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::JobProgress;
    use std::sync::Arc;
    use uuid::Uuid;

    #[tokio::test]
    async fn publishing_without_listeners_is_not_an_error() {
        let publisher = BroadcastProgressPublisher::new(4);
        let progress = JobProgress::new(Uuid::new_v4(), Arc::new(publisher.clone()));

        progress.starting("Processing started.");

        assert_eq!(publisher.listener_count(), 0);
    }

    #[tokio::test]
    async fn every_listener_sees_events_in_order() {
        let publisher = BroadcastProgressPublisher::default();
        let mut first = publisher.subscribe();
        let mut second = publisher.subscribe();
        let job_id = Uuid::new_v4();
        let progress = JobProgress::new(job_id, Arc::new(publisher.clone()));

        progress.starting("Processing started.");
        progress.chunk_done(None, 1, 1);
        progress.error("boom");

        for receiver in [&mut first, &mut second] {
            let names = [
                receiver.recv().await.unwrap().name(),
                receiver.recv().await.unwrap().name(),
                receiver.recv().await.unwrap().name(),
            ];
            assert_eq!(names, ["processingStarting", "progressUpdate", "error"]);
        }
    }
}
