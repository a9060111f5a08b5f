//! In-memory collaborators for orchestrator and route tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::models::{KeywordRecord, SearchResult};
use crate::providers::{
    ChatMessage, ChatProvider, ContentProvider, KeywordMetricsProvider, ProviderError, Providers,
    Result, SerpProvider,
};

#[derive(Default)]
pub struct FakeSerp {
    pub results: Vec<SearchResult>,
    pub fail: bool,
}

#[async_trait]
impl SerpProvider for FakeSerp {
    async fn search(&self, _topic: &str) -> Result<Vec<SearchResult>> {
        if self.fail {
            return Err(ProviderError::Network("connection refused".to_string()));
        }
        Ok(self.results.clone())
    }
}

/// Keyword lists per URL; unknown URLs fail with an API error.
#[derive(Default)]
pub struct FakeKeywords {
    pub by_url: HashMap<String, Vec<KeywordRecord>>,
}

#[async_trait]
impl KeywordMetricsProvider for FakeKeywords {
    async fn keywords_for_url(&self, url: &str) -> Result<Vec<KeywordRecord>> {
        self.by_url.get(url).cloned().ok_or(ProviderError::Api {
            status: 500,
            message: format!("no keywords for {url}"),
        })
    }
}

/// Page bodies per URL; URLs in `failures` return that error, any other
/// unknown URL fails with a network error.
#[derive(Default)]
pub struct FakeContent {
    pub by_url: HashMap<String, String>,
    pub failures: HashMap<String, ProviderError>,
}

#[async_trait]
impl ContentProvider for FakeContent {
    async fn fetch(&self, url: &str) -> Result<String> {
        if let Some(err) = self.failures.get(url) {
            return Err(err.clone());
        }
        self.by_url
            .get(url)
            .cloned()
            .ok_or_else(|| ProviderError::Network(format!("timed out fetching {url}")))
    }
}

/// Replies `reply-<n>` to the n-th call (1-based) and records every request.
/// Calls listed in `fail_calls` return an API error instead.
#[derive(Default)]
pub struct FakeChat {
    pub calls: Mutex<Vec<Vec<ChatMessage>>>,
    pub fail_calls: Vec<usize>,
}

impl FakeChat {
    pub fn recorded(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatProvider for FakeChat {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let n = {
            let mut calls = self.calls.lock().map_err(|e| ProviderError::Parse(e.to_string()))?;
            calls.push(messages.to_vec());
            calls.len()
        };
        if self.fail_calls.contains(&n) {
            return Err(ProviderError::Api {
                status: 503,
                message: "model overloaded".to_string(),
            });
        }
        Ok(format!("reply-{n}"))
    }

    fn model(&self) -> &str {
        "fake"
    }
}

/// `n` results at `https://site<i>.example/post`, each with a keyword list
/// and a fetchable body.
pub fn results(n: u32) -> Vec<SearchResult> {
    (1..=n)
        .map(|i| SearchResult {
            position: i,
            url: format!("https://site{i}.example/post"),
            title: format!("Site {i}"),
        })
        .collect()
}

pub struct Fixture {
    pub serp: Arc<FakeSerp>,
    pub keywords: Arc<FakeKeywords>,
    pub content: Arc<FakeContent>,
    pub chat: Arc<FakeChat>,
}

impl Fixture {
    /// Every URL has keywords `shared` (volume 100) and `only-<i>` (volume 10 * i)
    /// and a body `body of site <i>`.
    pub fn healthy(n: u32) -> Self {
        let results = results(n);
        let keywords = results
            .iter()
            .enumerate()
            .map(|(i, r)| {
                (
                    r.url.clone(),
                    vec![
                        KeywordRecord::new("shared", 100, 1),
                        KeywordRecord::new(format!("only-{}", i + 1), 10 * (i as u64 + 1), 4),
                    ],
                )
            })
            .collect();
        let content = results
            .iter()
            .enumerate()
            .map(|(i, r)| (r.url.clone(), format!("body of site {}", i + 1)))
            .collect();

        Self {
            serp: Arc::new(FakeSerp {
                results,
                fail: false,
            }),
            keywords: Arc::new(FakeKeywords { by_url: keywords }),
            content: Arc::new(FakeContent {
                by_url: content,
                failures: HashMap::new(),
            }),
            chat: Arc::new(FakeChat::default()),
        }
    }

    pub fn providers(&self) -> Providers {
        Providers {
            serp: self.serp.clone(),
            keywords: self.keywords.clone(),
            content: self.content.clone(),
            chat: self.chat.clone(),
        }
    }
}
