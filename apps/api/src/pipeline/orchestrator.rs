//! Pipeline Orchestrator — runs one content-generation request end to end.
//!
//! Flow: serp → semrush → content → analysis → plan → draft → proofread → seo → final.
//!
//! Stages run strictly in order, each awaiting its external calls before the
//! next begins. Only an empty SERP aborts the run; every other failure becomes
//! a sentinel value (empty keyword list, `ERROR:` body, `ERROR:` stage text)
//! and the run continues.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::keywords::aggregate_keywords;
use crate::models::{ContentRecord, KeywordRecord, RankedKeyword, SearchResult};
use crate::pipeline::builder;
use crate::pipeline::events::Stage;
use crate::pipeline::reporter::ProgressReporter;
use crate::pipeline::PipelineError;
use crate::providers::{ChatMessage, ProviderError, Providers};

const SERP_FAILURE_TITLE: &str = "Could not retrieve SERP data.";
const SERP_FAILURE_MESSAGE: &str = "Failed to retrieve data from SerpAPI.";

// ────────────────────────────────────────────────────────────────────────────
// Stage payloads
// ────────────────────────────────────────────────────────────────────────────

/// One search result with the keywords its URL ranks for.
#[derive(Debug, Clone, Serialize)]
pub struct UrlKeywords {
    pub position: u32,
    pub url: String,
    pub title: String,
    pub keywords: Vec<KeywordRecord>,
}

/// `complete` payload of the keyword-metrics stage.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordStageData {
    pub semrush_results: Vec<UrlKeywords>,
    pub common_keywords: Vec<RankedKeyword>,
}

/// Everything a successful run produced, in stage order.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub search_results: Vec<SearchResult>,
    pub keywords: KeywordStageData,
    pub pages: Vec<ContentRecord>,
    pub analysis: String,
    pub plan: String,
    pub draft: String,
    pub proofread: String,
    pub seo: String,
    pub final_deliverable: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ────────────────────────────────────────────────────────────────────────────

/// A single pipeline run's collaborators. Cheap to clone; holds no per-run state.
#[derive(Clone)]
pub struct Pipeline {
    providers: Providers,
}

impl Pipeline {
    pub fn new(providers: Providers) -> Self {
        Self { providers }
    }

    /// Runs every stage for `topic`, reporting progress as it goes.
    ///
    /// Returns `NoSearchResults` after emitting the terminal error event, or
    /// `ClientDisconnected` as soon as an event cannot be delivered.
    pub async fn run(
        &self,
        topic: &str,
        reporter: &ProgressReporter,
    ) -> Result<PipelineOutput, PipelineError> {
        reporter.start(topic).await?;

        // Step 1: SERP
        reporter.stage_started(Stage::Serp).await?;
        let search_results = self.search(topic).await;
        if search_results.is_empty() {
            error!(topic, "No SERP results, aborting run");
            reporter
                .stage_failed(Stage::Serp, SERP_FAILURE_TITLE, SERP_FAILURE_MESSAGE)
                .await?;
            return Err(PipelineError::NoSearchResults);
        }
        reporter
            .stage_completed(Stage::Serp, &search_results)
            .await?;

        // Step 2: keyword metrics + aggregation
        reporter.stage_started(Stage::Semrush).await?;
        let keywords = self.keyword_metrics(&search_results).await;
        reporter.stage_completed(Stage::Semrush, &keywords).await?;

        // Step 3: page content, one URL at a time
        reporter.stage_started(Stage::Content).await?;
        let pages = self
            .fetch_pages(&keywords.semrush_results, reporter)
            .await?;
        reporter.stage_completed(Stage::Content, &pages).await?;

        // Steps 4-9: language-model stages
        let ranked = &keywords.common_keywords;
        let analysis = self
            .llm_stage(
                Stage::Analysis,
                builder::analysis_messages(topic, &pages),
                reporter,
            )
            .await?;
        let plan = self
            .llm_stage(
                Stage::Plan,
                builder::plan_messages(&analysis, topic, ranked),
                reporter,
            )
            .await?;
        let draft = self
            .llm_stage(
                Stage::Draft,
                builder::draft_messages(&plan, &analysis),
                reporter,
            )
            .await?;
        let proofread = self
            .llm_stage(
                Stage::Proofread,
                builder::proofread_messages(&draft, &plan, &analysis),
                reporter,
            )
            .await?;
        let seo = self
            .llm_stage(
                Stage::Seo,
                builder::seo_messages(&proofread, ranked),
                reporter,
            )
            .await?;
        let final_deliverable = self
            .llm_stage(
                Stage::Final,
                builder::final_messages(&proofread, &seo, ranked, &search_results, &analysis),
                reporter,
            )
            .await?;

        info!(topic, "Pipeline run complete");

        Ok(PipelineOutput {
            search_results,
            keywords,
            pages,
            analysis,
            plan,
            draft,
            proofread,
            seo,
            final_deliverable,
        })
    }

    /// SERP lookup; a provider error reads as "no results".
    async fn search(&self, topic: &str) -> Vec<SearchResult> {
        match self.providers.serp.search(topic).await {
            Ok(results) => {
                info!(count = results.len(), "SERP stage complete");
                results
            }
            Err(e) => {
                error!("SERP lookup failed: {e}");
                Vec::new()
            }
        }
    }

    async fn keyword_metrics(&self, results: &[SearchResult]) -> KeywordStageData {
        let mut semrush_results = Vec::with_capacity(results.len());
        for result in results {
            let keywords = match self.providers.keywords.keywords_for_url(&result.url).await {
                Ok(keywords) => keywords,
                Err(e) => {
                    warn!(url = %result.url, "Keyword lookup failed: {e}");
                    Vec::new()
                }
            };
            semrush_results.push(UrlKeywords {
                position: result.position,
                url: result.url.clone(),
                title: result.title.clone(),
                keywords,
            });
        }

        let per_url: Vec<Vec<KeywordRecord>> = semrush_results
            .iter()
            .map(|r| r.keywords.clone())
            .collect();
        let common_keywords = aggregate_keywords(&per_url);
        info!(
            selected = common_keywords.len(),
            "Processed keyword data and extracted target keywords"
        );

        KeywordStageData {
            semrush_results,
            common_keywords,
        }
    }

    async fn fetch_pages(
        &self,
        sources: &[UrlKeywords],
        reporter: &ProgressReporter,
    ) -> Result<Vec<ContentRecord>, PipelineError> {
        let total = sources.len();
        let mut pages = Vec::with_capacity(total);

        for (index, source) in sources.iter().enumerate() {
            let current = index + 1;
            reporter.url_started(&source.url, current, total).await?;

            let body = self.fetch_body(&source.url).await;
            let result = SearchResult {
                position: source.position,
                url: source.url.clone(),
                title: source.title.clone(),
            };
            let page = ContentRecord::new(&result, source.keywords.clone(), body);

            reporter
                .url_completed(&page.url, page.fetch_succeeded, current, total)
                .await?;
            pages.push(page);
        }

        Ok(pages)
    }

    /// Page text, or an `ERROR:` marker when the fetch fails.
    async fn fetch_body(&self, url: &str) -> String {
        match self.providers.content.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                error!(url, "Content fetch failed: {e}");
                fetch_error_marker(url, &e)
            }
        }
    }

    async fn llm_stage(
        &self,
        stage: Stage,
        messages: Vec<ChatMessage>,
        reporter: &ProgressReporter,
    ) -> Result<String, PipelineError> {
        reporter.stage_started(stage).await?;

        let text = match self.providers.chat.complete(&messages).await {
            Ok(text) => {
                info!(%stage, model = self.providers.chat.model(), "LLM stage complete");
                text
            }
            Err(e) => {
                error!(%stage, "LLM call failed: {e}");
                format!("ERROR: {stage} generation failed: {e}")
            }
        };

        reporter.stage_completed(stage, &text).await?;
        Ok(text)
    }
}

fn fetch_error_marker(url: &str, err: &ProviderError) -> String {
    if err.is_network() {
        format!("ERROR: Request failed for {url}.")
    } else {
        format!("ERROR: Unknown error processing {url}.")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::pipeline::events::{expected_event_count, ProgressEvent};
    use crate::providers::fakes::{FakeChat, FakeContent, FakeSerp, Fixture};
    use crate::providers::ChatRole;

    async fn run_collecting(
        fixture: &Fixture,
        topic: &str,
    ) -> (Result<PipelineOutput, PipelineError>, Vec<ProgressEvent>) {
        let (reporter, mut rx) = ProgressReporter::channel(256);
        let pipeline = Pipeline::new(fixture.providers());
        let outcome = pipeline.run(topic, &reporter).await;
        drop(reporter);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        (outcome, events)
    }

    fn kinds_and_steps(events: &[ProgressEvent]) -> Vec<String> {
        events
            .iter()
            .map(|e| match e {
                ProgressEvent::Start { .. } => "start".to_string(),
                ProgressEvent::Progress { step, current: Some(c), .. } => format!("progress:{step}:{c}"),
                ProgressEvent::Progress { step, .. } => format!("progress:{step}"),
                ProgressEvent::Complete { step, .. } => format!("complete:{step}"),
                ProgressEvent::UrlComplete { current, .. } => format!("url_complete:{current}"),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_full_run_emits_events_in_stage_order() {
        let fixture = Fixture::healthy(2);
        let (outcome, events) = run_collecting(&fixture, "rust web servers").await;

        assert!(outcome.is_ok());
        assert_eq!(events.len(), expected_event_count(2));
        assert_eq!(
            kinds_and_steps(&events),
            vec![
                "start",
                "progress:serp",
                "complete:serp",
                "progress:semrush",
                "complete:semrush",
                "progress:content",
                "progress:content:1",
                "url_complete:1",
                "progress:content:2",
                "url_complete:2",
                "complete:content",
                "progress:analysis",
                "complete:analysis",
                "progress:plan",
                "complete:plan",
                "progress:draft",
                "complete:draft",
                "progress:proofread",
                "complete:proofread",
                "progress:seo",
                "complete:seo",
                "progress:final",
                "complete:final",
            ]
        );
    }

    #[tokio::test]
    async fn test_event_count_scales_with_results() {
        for n in [1, 3, 5] {
            let fixture = Fixture::healthy(n);
            let (_, events) = run_collecting(&fixture, "topic").await;
            assert_eq!(events.len(), expected_event_count(n as usize), "n = {n}");
        }
    }

    #[tokio::test]
    async fn test_empty_serp_emits_single_terminal_error() {
        let fixture = Fixture {
            serp: Arc::new(FakeSerp::default()),
            ..Fixture::healthy(2)
        };
        let (outcome, events) = run_collecting(&fixture, "obscure").await;

        assert!(matches!(outcome, Err(PipelineError::NoSearchResults)));
        assert_eq!(kinds_and_steps(&events), vec!["start", "progress:serp", "complete:serp"]);
        match events.last().unwrap() {
            ProgressEvent::Complete { error, data, .. } => {
                assert_eq!(error.as_deref(), Some("Failed to retrieve data from SerpAPI."));
                assert_eq!(data, &serde_json::json!("Failed to retrieve data from SerpAPI."));
            }
            other => panic!("unexpected terminal event {other:?}"),
        }
        assert!(fixture.chat.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_serp_provider_error_is_fatal_like_empty() {
        let fixture = Fixture {
            serp: Arc::new(FakeSerp {
                results: vec![],
                fail: true,
            }),
            ..Fixture::healthy(1)
        };
        let (outcome, events) = run_collecting(&fixture, "topic").await;
        assert!(matches!(outcome, Err(PipelineError::NoSearchResults)));
        assert_eq!(events.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_fetch_continues_with_marker() {
        let healthy = Fixture::healthy(2);
        let mut bodies = healthy.content.by_url.clone();
        bodies.remove("https://site2.example/post");
        let fixture = Fixture {
            content: Arc::new(FakeContent {
                by_url: bodies,
                ..FakeContent::default()
            }),
            ..healthy
        };

        let (outcome, events) = run_collecting(&fixture, "topic").await;
        let output = outcome.unwrap();

        assert_eq!(events.len(), expected_event_count(2));
        assert!(output.pages[0].fetch_succeeded);
        assert!(!output.pages[1].fetch_succeeded);
        assert_eq!(
            output.pages[1].body_text,
            "ERROR: Request failed for https://site2.example/post."
        );

        assert_eq!(url_successes(&events), vec![true, false]);

        // The analysis prompt only carries the page that was fetched.
        let calls = fixture.chat.recorded();
        let analysis_prompt = &calls[0][1].content;
        assert!(analysis_prompt.contains("body of site 1"));
        assert!(!analysis_prompt.contains("ERROR:"));
    }

    fn url_successes(events: &[ProgressEvent]) -> Vec<bool> {
        events
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::UrlComplete { success, .. } => Some(*success),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_non_network_fetch_errors_use_unknown_error_marker() {
        for err in [
            ProviderError::Api {
                status: 422,
                message: "unprocessable".to_string(),
            },
            ProviderError::EmptyContent,
            ProviderError::MissingApiKey("JINA_API_KEY"),
        ] {
            let healthy = Fixture::healthy(2);
            let failures =
                [("https://site1.example/post".to_string(), err.clone())].into_iter().collect();
            let fixture = Fixture {
                content: Arc::new(FakeContent {
                    by_url: healthy.content.by_url.clone(),
                    failures,
                }),
                ..healthy
            };

            let (outcome, events) = run_collecting(&fixture, "topic").await;
            let output = outcome.unwrap();

            assert_eq!(
                output.pages[0].body_text,
                "ERROR: Unknown error processing https://site1.example/post.",
                "{err:?}"
            );
            assert!(!output.pages[0].fetch_succeeded);
            assert!(output.pages[1].fetch_succeeded);
            assert_eq!(url_successes(&events), vec![false, true], "{err:?}");
            assert_eq!(events.len(), expected_event_count(2));

            let calls = fixture.chat.recorded();
            let analysis_prompt = &calls[0][1].content;
            assert!(!analysis_prompt.contains("body of site 1"));
            assert!(analysis_prompt.contains("WEB CONTENT 1\nbody of site 2"));
            assert!(!analysis_prompt.contains("ERROR:"));
        }
    }

    #[tokio::test]
    async fn test_error_prefixed_body_counts_as_failed_fetch() {
        let healthy = Fixture::healthy(2);
        let mut bodies = healthy.content.by_url.clone();
        bodies.insert(
            "https://site2.example/post".to_string(),
            "ERROR: upstream said no".to_string(),
        );
        let fixture = Fixture {
            content: Arc::new(FakeContent {
                by_url: bodies,
                ..FakeContent::default()
            }),
            ..healthy
        };

        let (outcome, events) = run_collecting(&fixture, "topic").await;
        let output = outcome.unwrap();

        assert_eq!(output.pages[1].body_text, "ERROR: upstream said no");
        assert!(!output.pages[1].fetch_succeeded);
        assert_eq!(url_successes(&events), vec![true, false]);

        let calls = fixture.chat.recorded();
        let analysis_prompt = &calls[0][1].content;
        assert!(analysis_prompt.contains("body of site 1"));
        assert!(!analysis_prompt.contains("upstream said no"));
    }

    #[tokio::test]
    async fn test_keyword_failure_yields_empty_list_for_that_url() {
        let healthy = Fixture::healthy(2);
        let mut by_url = healthy.keywords.by_url.clone();
        by_url.remove("https://site1.example/post");
        let fixture = Fixture {
            keywords: Arc::new(crate::providers::fakes::FakeKeywords { by_url }),
            ..healthy
        };

        let (outcome, _) = run_collecting(&fixture, "topic").await;
        let output = outcome.unwrap();
        assert!(output.keywords.semrush_results[0].keywords.is_empty());
        assert_eq!(output.keywords.semrush_results[1].keywords.len(), 2);
        assert!(output.pages[0].keyword_records.is_empty());
    }

    #[tokio::test]
    async fn test_stage_outputs_thread_into_later_prompts() {
        let fixture = Fixture::healthy(2);
        let (outcome, _) = run_collecting(&fixture, "rust web servers").await;
        let output = outcome.unwrap();

        // FakeChat answers reply-1..reply-6 in stage order.
        assert_eq!(output.analysis, "reply-1");
        assert_eq!(output.plan, "reply-2");
        assert_eq!(output.draft, "reply-3");
        assert_eq!(output.proofread, "reply-4");
        assert_eq!(output.seo, "reply-5");
        assert_eq!(output.final_deliverable, "reply-6");

        let calls = fixture.chat.recorded();
        assert_eq!(calls.len(), 6);
        assert!(calls.iter().all(|c| c[0].role == ChatRole::System));

        let plan_prompt = &calls[1][1].content;
        assert!(plan_prompt.contains("Topic: rust web servers"));
        assert!(plan_prompt.contains("reply-1"));
        assert!(plan_prompt.contains("- shared (search volume: 100, frequency: 2)"));

        let proofread_prompt = &calls[3][1].content;
        assert!(proofread_prompt.contains("Content Draft:\nreply-3"));
        assert!(proofread_prompt.contains("Content Plan:\nreply-2"));

        let final_prompt = &calls[5][1].content;
        assert!(final_prompt.contains("SEO Recommendations:\nreply-5"));
        assert!(final_prompt.contains("1. Site 1 (https://site1.example/post)"));
    }

    #[tokio::test]
    async fn test_llm_failure_becomes_error_text_and_run_continues() {
        let fixture = Fixture {
            chat: Arc::new(FakeChat {
                fail_calls: vec![3],
                ..FakeChat::default()
            }),
            ..Fixture::healthy(1)
        };
        let (outcome, events) = run_collecting(&fixture, "topic").await;
        let output = outcome.unwrap();

        assert!(output.draft.starts_with("ERROR: draft generation failed:"));
        assert_eq!(output.proofread, "reply-4");
        assert_eq!(events.len(), expected_event_count(1));
    }

    #[tokio::test]
    async fn test_common_keywords_are_aggregated() {
        let fixture = Fixture::healthy(3);
        let (outcome, _) = run_collecting(&fixture, "topic").await;
        let keywords = outcome.unwrap().keywords.common_keywords;

        assert_eq!(keywords[0].keyword, "shared");
        assert_eq!(keywords[0].frequency, 3);
        // Six rows in total, so the volume pool admits every single-URL keyword.
        let rest: Vec<&str> = keywords[1..].iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(rest, vec!["only-3", "only-2", "only-1"]);
    }

    #[tokio::test]
    async fn test_disconnected_client_stops_the_run() {
        let fixture = Fixture::healthy(2);
        let (reporter, rx) = ProgressReporter::channel(4);
        drop(rx);

        let outcome = Pipeline::new(fixture.providers()).run("topic", &reporter).await;
        assert!(matches!(outcome, Err(PipelineError::ClientDisconnected)));
        assert!(fixture.chat.recorded().is_empty());
    }
}
