use axum::{
    extract::{Query, State},
    response::sse::{Event, Sse},
};
use serde::Deserialize;
use tokio_stream::{wrappers::ReceiverStream, Stream, StreamExt};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::pipeline::events::expected_event_count;
use crate::pipeline::{Pipeline, PipelineError, ProgressReporter};
use crate::state::AppState;

/// Unread events buffered per client before the run waits on it.
const EVENT_BUFFER: usize = 64;

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub topic: Option<String>,
}

/// GET /progress?topic=<string>
///
/// Starts a pipeline run for `topic` and streams its progress as server-sent
/// events, one JSON object per `data:` message. The run executes on its own
/// task with its own data; the stream ends when the run does.
pub async fn progress_handler(
    State(state): State<AppState>,
    Query(params): Query<ProgressQuery>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, AppError> {
    let topic = params
        .topic
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("topic query parameter is required".to_string()))?;

    let (reporter, rx) = ProgressReporter::channel(EVENT_BUFFER);
    let pipeline = Pipeline::new(state.providers.clone());
    let run_id = Uuid::new_v4();
    let span = info_span!(
        "pipeline_run",
        %run_id,
        %topic,
        mode = ?state.config.provider_mode
    );

    tokio::spawn(
        async move {
            info!("Starting content generation");
            match pipeline.run(&topic, &reporter).await {
                Ok(output) => info!(
                    pages = output.pages.len(),
                    keywords = output.keywords.common_keywords.len(),
                    events = expected_event_count(output.search_results.len()),
                    analysis_chars = output.analysis.len(),
                    plan_chars = output.plan.len(),
                    draft_chars = output.draft.len(),
                    proofread_chars = output.proofread.len(),
                    seo_chars = output.seo.len(),
                    final_chars = output.final_deliverable.len(),
                    "Run finished"
                ),
                Err(PipelineError::NoSearchResults) => warn!("Run aborted: no SERP results"),
                Err(PipelineError::ClientDisconnected) => {
                    info!("Client disconnected, run stopped")
                }
            }
        }
        .instrument(span),
    );

    let stream = ReceiverStream::new(rx).map(|event| Event::default().json_data(event));
    Ok(Sse::new(stream))
}
