use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::providers::error::{require_key, ProviderError, Result};
use crate::providers::{http_client, ContentProvider};

const JINA_BASE_URL: &str = "https://r.jina.ai";

#[derive(Debug, Deserialize)]
struct ReaderResponse {
    data: Option<ReaderData>,
}

#[derive(Debug, Deserialize)]
struct ReaderData {
    #[serde(default)]
    content: String,
}

/// Page text via Jina Reader (`GET {base}/<target url>`).
pub struct JinaReader {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    /// Server-side render budget, sent as `X-Timeout`.
    render_timeout_secs: u64,
}

impl JinaReader {
    pub fn new(api_key: Option<String>, render_timeout_secs: u64, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            base_url: JINA_BASE_URL.to_string(),
            api_key,
            render_timeout_secs,
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl ContentProvider for JinaReader {
    async fn fetch(&self, url: &str) -> Result<String> {
        let api_key = require_key(&self.api_key, "JINA_API_KEY")?;
        let endpoint = format!("{}/{}", self.base_url, url);

        debug!(url, "Jina Reader request");

        let resp = self
            .client
            .get(&endpoint)
            .bearer_auth(api_key)
            .header("X-Retain-Images", "none")
            .header("Accept", "application/json")
            .header("X-Timeout", self.render_timeout_secs.to_string())
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

        let body: ReaderResponse = resp.json().await?;
        let content = body
            .data
            .map(|d| d.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(ProviderError::EmptyContent)?;

        info!(url, chars = content.len(), "Fetched page content");
        Ok(content)
    }
}
