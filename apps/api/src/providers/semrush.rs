//! SEMrush `url_organic` report — keywords a single URL ranks for.
//!
//! The report body is semicolon-separated text with a header row, e.g.
//!
//! ```text
//! Keyword;Position;Search Volume;CPC;Competition
//! rust web framework;3;1900;2.10;0.31
//! ```
//!
//! Failures come back as a 200 with an `ERROR <code> :: <message>` body.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::SemrushSettings;
use crate::models::KeywordRecord;
use crate::providers::error::{require_key, ProviderError, Result};
use crate::providers::{http_client, KeywordMetricsProvider};

const SEMRUSH_BASE_URL: &str = "https://api.semrush.com";
const REPORT_TYPE: &str = "url_organic";
/// Phrase, position, search volume, CPC, competition.
const EXPORT_COLUMNS: &str = "Ph,Po,Nq,Cp,Co";
/// SEMrush's "no data for this query" code; an empty report, not a failure.
const NOTHING_FOUND_PREFIX: &str = "ERROR 50 ::";

pub struct SemrushClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    settings: SemrushSettings,
}

impl SemrushClient {
    pub fn new(api_key: Option<String>, settings: SemrushSettings, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            base_url: SEMRUSH_BASE_URL.to_string(),
            api_key,
            settings,
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl KeywordMetricsProvider for SemrushClient {
    async fn keywords_for_url(&self, url: &str) -> Result<Vec<KeywordRecord>> {
        let api_key = require_key(&self.api_key, "SEMRUSH_API_KEY")?;
        let display_limit = self.settings.display_limit.to_string();

        debug!(url, "SEMrush url_organic request");

        let resp = self
            .client
            .get(format!("{}/", self.base_url))
            .query(&[
                ("type", REPORT_TYPE),
                ("key", api_key),
                ("display_limit", display_limit.as_str()),
                ("export_columns", EXPORT_COLUMNS),
                ("url", url),
                ("database", self.settings.database.as_str()),
                ("display_filter", self.settings.display_filter.as_str()),
                ("display_sort", self.settings.display_sort.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let records = parse_report(&body)?;
        info!(url, count = records.len(), "Retrieved SEMrush keywords");
        Ok(records)
    }
}

/// Parses a `url_organic` CSV report into keyword records.
///
/// Columns are located by header name so the export order does not matter.
/// Unparseable numeric cells read as 0.
pub fn parse_report(body: &str) -> Result<Vec<KeywordRecord>> {
    let body = body.trim();
    if body.is_empty() || body.starts_with(NOTHING_FOUND_PREFIX) {
        return Ok(Vec::new());
    }
    if body.starts_with("ERROR") {
        return Err(ProviderError::Api {
            status: 200,
            message: body.to_string(),
        });
    }

    let mut lines = body.lines();
    let header: Vec<&str> = lines
        .next()
        .map(|h| h.split(';').map(str::trim).collect())
        .unwrap_or_default();
    let column = |name: &str| {
        header
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| ProviderError::Parse(format!("SEMrush report has no '{name}' column")))
    };
    let keyword_col = column("Keyword")?;
    let position_col = column("Position")?;
    let volume_col = column("Search Volume")?;

    let records = lines
        .map(|line| line.split(';').map(str::trim).collect::<Vec<_>>())
        .filter_map(|cells| {
            let keyword = cells.get(keyword_col).filter(|k| !k.is_empty())?;
            Some(KeywordRecord {
                keyword: keyword.to_string(),
                search_volume: parse_cell(&cells, volume_col).unwrap_or(0),
                position: parse_cell(&cells, position_col).unwrap_or(0),
            })
        })
        .collect();

    Ok(records)
}

/// Numeric cell, or `None` when missing or out of range for `T`.
fn parse_cell<T: std::str::FromStr>(cells: &[&str], col: usize) -> Option<T> {
    cells.get(col).and_then(|c| c.parse().ok())
}
