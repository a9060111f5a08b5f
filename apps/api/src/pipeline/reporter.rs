use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::pipeline::events::{ProgressEvent, Stage};
use crate::pipeline::PipelineError;

/// Sends progress events to the client in emission order.
///
/// Backed by a bounded channel so a slow client applies backpressure to the
/// run instead of events piling up in memory.
#[derive(Clone)]
pub struct ProgressReporter {
    tx: mpsc::Sender<ProgressEvent>,
}

impl ProgressReporter {
    pub fn new(tx: mpsc::Sender<ProgressEvent>) -> Self {
        Self { tx }
    }

    /// Reporter plus the receiving end, with room for `buffer` unread events.
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<ProgressEvent>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self::new(tx), rx)
    }

    pub async fn emit(&self, event: ProgressEvent) -> Result<(), PipelineError> {
        debug!(event = event.kind(), "Emitting progress event");
        self.tx
            .send(event)
            .await
            .map_err(|_| PipelineError::ClientDisconnected)
    }

    pub async fn start(&self, topic: &str) -> Result<(), PipelineError> {
        self.emit(ProgressEvent::Start {
            message: format!("Starting content generation for topic: {topic}"),
        })
        .await
    }

    pub async fn stage_started(&self, stage: Stage) -> Result<(), PipelineError> {
        self.emit(ProgressEvent::Progress {
            step: stage,
            message: stage.progress_message().to_string(),
            current: None,
            total: None,
        })
        .await
    }

    pub async fn stage_completed<T: Serialize>(
        &self,
        stage: Stage,
        data: &T,
    ) -> Result<(), PipelineError> {
        let data = payload_value(stage, data);
        self.emit(ProgressEvent::Complete {
            step: stage,
            title: stage.complete_title().to_string(),
            data,
            error: None,
        })
        .await
    }

    /// Terminal `complete` carrying an error in place of the stage payload.
    pub async fn stage_failed(
        &self,
        stage: Stage,
        title: &str,
        error: &str,
    ) -> Result<(), PipelineError> {
        self.emit(ProgressEvent::Complete {
            step: stage,
            title: title.to_string(),
            data: Value::String(error.to_string()),
            error: Some(error.to_string()),
        })
        .await
    }

    pub async fn url_started(
        &self,
        url: &str,
        current: usize,
        total: usize,
    ) -> Result<(), PipelineError> {
        self.emit(ProgressEvent::Progress {
            step: Stage::Content,
            message: format!("Fetching content from {url}"),
            current: Some(current),
            total: Some(total),
        })
        .await
    }

    pub async fn url_completed(
        &self,
        url: &str,
        success: bool,
        current: usize,
        total: usize,
    ) -> Result<(), PipelineError> {
        self.emit(ProgressEvent::UrlComplete {
            url: url.to_string(),
            success,
            current,
            total,
        })
        .await
    }
}

/// JSON form of a stage payload; `null` when it cannot be serialized.
fn payload_value<T: Serialize>(stage: Stage, data: &T) -> Value {
    serde_json::to_value(data).unwrap_or_else(|e| {
        warn!(%stage, "Stage payload could not be serialized: {e}");
        Value::Null
    })
}
