//! Canned collaborators for running the full pipeline without API keys.
//!
//! Every call sleeps for the configured delay, then returns fixed data.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::models::{KeywordRecord, SearchResult};
use crate::providers::{
    ChatMessage, ChatProvider, ContentProvider, KeywordMetricsProvider, Providers, Result,
    SerpProvider,
};

const DEMO_MODEL: &str = "demo";

pub struct DemoSerp {
    delay: Duration,
}

pub struct DemoKeywords {
    delay: Duration,
}

pub struct DemoContent {
    delay: Duration,
}

pub struct DemoChat {
    delay: Duration,
}

/// The full demo collaborator set.
pub fn providers(delay: Duration) -> Providers {
    Providers {
        serp: Arc::new(DemoSerp { delay }),
        keywords: Arc::new(DemoKeywords { delay }),
        content: Arc::new(DemoContent { delay }),
        chat: Arc::new(DemoChat { delay }),
    }
}

#[async_trait]
impl SerpProvider for DemoSerp {
    async fn search(&self, _topic: &str) -> Result<Vec<SearchResult>> {
        tokio::time::sleep(self.delay).await;
        info!("Using demo SERP data");
        Ok((1..=2)
            .map(|i| SearchResult {
                position: i,
                url: format!("http://example.com/{i}"),
                title: format!("Example Title {i}"),
            })
            .collect())
    }
}

#[async_trait]
impl KeywordMetricsProvider for DemoKeywords {
    async fn keywords_for_url(&self, _url: &str) -> Result<Vec<KeywordRecord>> {
        tokio::time::sleep(self.delay).await;
        info!("Using demo SEMrush data");
        Ok(vec![
            KeywordRecord::new("example", 1000, 1),
            KeywordRecord::new("test", 500, 2),
        ])
    }
}

#[async_trait]
impl ContentProvider for DemoContent {
    async fn fetch(&self, url: &str) -> Result<String> {
        tokio::time::sleep(self.delay).await;
        info!(url, "Using demo page content");
        Ok("This is demo content for testing purposes.".to_string())
    }
}

#[async_trait]
impl ChatProvider for DemoChat {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
        tokio::time::sleep(self.delay).await;
        info!("Using demo LLM response");
        Ok("This is a demo response for testing purposes.".to_string())
    }

    fn model(&self) -> &str {
        DEMO_MODEL
    }
}
