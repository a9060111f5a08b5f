//! External collaborators: the four services a pipeline run depends on.
//!
//! Each collaborator is an object-safe async trait so the orchestrator can run
//! against live HTTP clients, canned demo data, or in-memory test fakes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{Config, ProviderMode};
use crate::llm_client::LlmClient;
use crate::models::{KeywordRecord, SearchResult};

pub mod demo;
pub mod error;
pub mod jina;
pub mod semrush;
pub mod serpapi;

#[cfg(test)]
pub mod fakes;

pub use error::{ProviderError, Result};

// ────────────────────────────────────────────────────────────────────────────
// Chat message types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Collaborator traits
// ────────────────────────────────────────────────────────────────────────────

/// Topic → ordered organic results.
#[async_trait]
pub trait SerpProvider: Send + Sync {
    async fn search(&self, topic: &str) -> Result<Vec<SearchResult>>;
}

/// URL → keywords that URL ranks for, with search volume.
#[async_trait]
pub trait KeywordMetricsProvider: Send + Sync {
    async fn keywords_for_url(&self, url: &str) -> Result<Vec<KeywordRecord>>;
}

/// URL → plain-text page body.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Role-tagged messages → completion text. Model and temperature are part of
/// the provider's configuration.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}

/// The collaborator set handed to every pipeline run.
#[derive(Clone)]
pub struct Providers {
    pub serp: Arc<dyn SerpProvider>,
    pub keywords: Arc<dyn KeywordMetricsProvider>,
    pub content: Arc<dyn ContentProvider>,
    pub chat: Arc<dyn ChatProvider>,
}

impl Providers {
    /// Wires live HTTP clients or canned demo collaborators per `PROVIDER_MODE`.
    pub fn from_config(config: &Config) -> Self {
        match config.provider_mode {
            ProviderMode::Live => {
                let timeout = Duration::from_secs(config.http_timeout_secs);
                Self {
                    serp: Arc::new(
                        serpapi::SerpApiClient::new(config.serpapi_key.clone(), timeout)
                            .with_base_url(&config.serpapi_base_url),
                    ),
                    keywords: Arc::new(
                        semrush::SemrushClient::new(
                            config.semrush_api_key.clone(),
                            config.semrush.clone(),
                            timeout,
                        )
                        .with_base_url(&config.semrush_base_url),
                    ),
                    content: Arc::new(
                        jina::JinaReader::new(
                            config.jina_api_key.clone(),
                            config.jina_timeout_secs,
                            timeout,
                        )
                        .with_base_url(&config.jina_base_url),
                    ),
                    chat: Arc::new(
                        LlmClient::new(
                            config.openai_api_key.clone(),
                            config.openai_model.clone(),
                            config.openai_temperature,
                            timeout * 2,
                        )
                        .with_base_url(&config.openai_base_url),
                    ),
                }
            }
            ProviderMode::Demo => demo::providers(Duration::from_millis(config.demo_delay_ms)),
        }
    }
}

/// Shared reqwest client construction for all live collaborators.
pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
