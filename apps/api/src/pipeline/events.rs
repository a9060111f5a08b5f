//! Progress events streamed to the client, one JSON object per SSE message.

use serde::Serialize;
use serde_json::Value;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Serp,
    Semrush,
    Content,
    Analysis,
    Plan,
    Draft,
    Proofread,
    Seo,
    Final,
}

impl Stage {
    pub const ALL: [Stage; 9] = [
        Stage::Serp,
        Stage::Semrush,
        Stage::Content,
        Stage::Analysis,
        Stage::Plan,
        Stage::Draft,
        Stage::Proofread,
        Stage::Seo,
        Stage::Final,
    ];

    /// Shown in the `progress` event when the stage begins.
    pub fn progress_message(self) -> &'static str {
        match self {
            Stage::Serp => "Retrieving SERP Data...",
            Stage::Semrush => "Processing SEMRush Data...",
            Stage::Content => "Starting content fetch...",
            Stage::Analysis => "Analyzing Content...",
            Stage::Plan => "Generating Content Plan...",
            Stage::Draft => "Creating Content Draft...",
            Stage::Proofread => "Proofreading Content...",
            Stage::Seo => "Generating SEO Recommendations...",
            Stage::Final => "Compiling Final Deliverable...",
        }
    }

    /// Title of the `complete` event on success.
    pub fn complete_title(self) -> &'static str {
        match self {
            Stage::Serp => "SERP Data Retrieved",
            Stage::Semrush => "SEMRush Data Retrieved and Processed",
            Stage::Content => "Content Fetching Complete",
            Stage::Analysis => "Analyzing Content",
            Stage::Plan => "Content Planning",
            Stage::Draft => "Content Draft",
            Stage::Proofread => "Proofreading",
            Stage::Seo => "SEO Recommendations",
            Stage::Final => "Final Deliverable",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Serp => "serp",
            Stage::Semrush => "semrush",
            Stage::Content => "content",
            Stage::Analysis => "analysis",
            Stage::Plan => "plan",
            Stage::Draft => "draft",
            Stage::Proofread => "proofread",
            Stage::Seo => "seo",
            Stage::Final => "final",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    Start {
        message: String,
    },
    Progress {
        step: Stage,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        current: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        total: Option<usize>,
    },
    Complete {
        step: Stage,
        title: String,
        data: Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    UrlComplete {
        url: String,
        success: bool,
        current: usize,
        total: usize,
    },
}

impl ProgressEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ProgressEvent::Start { .. } => "start",
            ProgressEvent::Progress { .. } => "progress",
            ProgressEvent::Complete { .. } => "complete",
            ProgressEvent::UrlComplete { .. } => "url_complete",
        }
    }
}

/// Number of events a successful run over `n` search results emits:
/// one `start`, a `progress`/`complete` pair per stage, and a
/// `progress`/`url_complete` pair per fetched URL.
pub fn expected_event_count(n: usize) -> usize {
    1 + 2 * Stage::ALL.len() + 2 * n
}
