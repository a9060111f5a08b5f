// Content pipeline: SERP → keywords → page content → six language-model stages,
// reported step by step to the client.
// All LLM calls go through the ChatProvider seam, never direct HTTP.

use thiserror::Error;

pub mod builder;
pub mod events;
pub mod orchestrator;
pub mod prompts;
pub mod reporter;

pub use orchestrator::Pipeline;
pub use reporter::ProgressReporter;

/// Why a run ended before the final stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The SERP stage produced nothing to work on. The terminal event has
    /// already been sent.
    #[error("SERP retrieval returned no results")]
    NoSearchResults,

    /// The event receiver is gone; nobody is listening for the rest of the run.
    #[error("Progress client disconnected")]
    ClientDisconnected,
}
