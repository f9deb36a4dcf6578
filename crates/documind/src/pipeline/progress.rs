use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::stage::Stage;

/// Events emitted by the coordinator while a run moves through its stages.
/// Document text never appears in an event.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    StageEntered { stage: Stage, message: String },
    FallbackUsed { stage: Stage, reason: String },
    Completed,
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, run_id: Uuid, event: ProgressEvent);
}

/// No-op reporter for callers that only read the run afterwards.
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _run_id: Uuid, _event: ProgressEvent) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageEventKind {
    Entered,
    Fallback,
    Completed,
}

/// Serializable form of a [`ProgressEvent`] for a presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageEvent {
    pub run_id: Uuid,
    pub stage: Stage,
    pub kind: StageEventKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl StageEvent {
    fn from_progress(run_id: Uuid, event: ProgressEvent) -> Self {
        let (stage, kind, message) = match event {
            ProgressEvent::StageEntered { stage, message } => {
                (stage, StageEventKind::Entered, message)
            }
            ProgressEvent::FallbackUsed { stage, reason } => {
                (stage, StageEventKind::Fallback, reason)
            }
            ProgressEvent::Completed => (
                Stage::QaReady,
                StageEventKind::Completed,
                "Pipeline complete".to_string(),
            ),
        };
        Self {
            run_id,
            stage,
            kind,
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Fans stage events out over a tokio broadcast channel.
#[derive(Clone)]
pub struct BroadcastProgress {
    sender: broadcast::Sender<StageEvent>,
}

impl BroadcastProgress {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StageEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastProgress {
    fn default() -> Self {
        Self::new(256)
    }
}

impl ProgressReporter for BroadcastProgress {
    fn report(&self, run_id: Uuid, event: ProgressEvent) {
        // No subscribers is fine
        let _ = self.sender.send(StageEvent::from_progress(run_id, event));
    }
}
