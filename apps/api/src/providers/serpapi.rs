use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::models::SearchResult;
use crate::providers::error::{require_key, ProviderError, Result};
use crate::providers::{http_client, SerpProvider};

const SERPAPI_BASE_URL: &str = "https://serpapi.com";
const LANGUAGE: &str = "en";
const COUNTRY: &str = "us";
const GOOGLE_DOMAIN: &str = "google.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    position: u32,
    link: String,
    #[serde(default)]
    title: String,
}

/// Google organic results via SerpApi's `search.json` endpoint.
pub struct SerpApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl SerpApiClient {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            base_url: SERPAPI_BASE_URL.to_string(),
            api_key,
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl SerpProvider for SerpApiClient {
    async fn search(&self, topic: &str) -> Result<Vec<SearchResult>> {
        let api_key = require_key(&self.api_key, "SERPAPI_KEY")?;
        let url = format!("{}/search.json", self.base_url);

        debug!(topic, "SerpApi search request");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("q", topic),
                ("hl", LANGUAGE),
                ("gl", COUNTRY),
                ("google_domain", GOOGLE_DOMAIN),
                ("api_key", api_key),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SearchResponse = resp.json().await?;
        if let Some(message) = body.error {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let mut results: Vec<SearchResult> = body
            .organic_results
            .into_iter()
            .map(|r| SearchResult {
                position: r.position,
                url: r.link,
                title: r.title,
            })
            .collect();
        results.sort_by_key(|r| r.position);

        info!(count = results.len(), "Retrieved SERP data");
        Ok(results)
    }
}
