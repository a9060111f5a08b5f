use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Which set of external collaborators the server wires in at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderMode {
    /// Real HTTP calls to SerpApi, SEMrush, Jina Reader and the chat model.
    Live,
    /// Canned responses after a fixed delay. No keys or network needed.
    Demo,
}

impl FromStr for ProviderMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(ProviderMode::Live),
            "demo" => Ok(ProviderMode::Demo),
            other => bail!("PROVIDER_MODE must be 'live' or 'demo', got '{other}'"),
        }
    }
}

/// Query parameters sent with every SEMrush `url_organic` report.
#[derive(Debug, Clone)]
pub struct SemrushSettings {
    pub database: String,
    pub display_limit: u32,
    /// Unencoded filter expression; the HTTP client percent-encodes it.
    pub display_filter: String,
    pub display_sort: String,
}

/// Application configuration loaded from environment variables.
///
/// API keys are optional here: a missing key fails the collaborator call
/// that needs it, never startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub provider_mode: ProviderMode,
    pub demo_delay_ms: u64,

    pub serpapi_key: Option<String>,
    pub semrush_api_key: Option<String>,
    pub jina_api_key: Option<String>,
    pub openai_api_key: Option<String>,

    pub serpapi_base_url: String,
    pub semrush_base_url: String,
    pub jina_base_url: String,
    pub openai_base_url: String,

    pub semrush: SemrushSettings,
    pub jina_timeout_secs: u64,
    pub openai_model: String,
    pub openai_temperature: f32,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let secret = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: parse_var(&lookup, "PORT", "8080")?,
            rust_log: get("RUST_LOG", "info"),
            provider_mode: parse_var(&lookup, "PROVIDER_MODE", "live")?,
            demo_delay_ms: parse_var(&lookup, "DEMO_DELAY_MS", "2000")?,

            serpapi_key: secret("SERPAPI_KEY"),
            semrush_api_key: secret("SEMRUSH_API_KEY"),
            jina_api_key: secret("JINA_API_KEY"),
            openai_api_key: secret("OPENAI_API_KEY"),

            serpapi_base_url: get("SERPAPI_BASE_URL", "https://serpapi.com"),
            semrush_base_url: get("SEMRUSH_BASE_URL", "https://api.semrush.com"),
            jina_base_url: get("JINA_BASE_URL", "https://r.jina.ai"),
            openai_base_url: get("OPENAI_BASE_URL", "https://api.openai.com/v1"),

            semrush: SemrushSettings {
                database: get("SEMRUSH_DATABASE", "us"),
                display_limit: parse_var(&lookup, "SEMRUSH_DISPLAY_LIMIT", "50")?,
                display_filter: get("SEMRUSH_DISPLAY_FILTER", "+|Po|Lt|50"),
                display_sort: get("SEMRUSH_DISPLAY_SORT", "po_asc"),
            },
            jina_timeout_secs: parse_var(&lookup, "JINA_TIMEOUT_SECS", "15")?,
            openai_model: get("OPENAI_MODEL", "gpt-4o-mini"),
            openai_temperature: parse_var(&lookup, "OPENAI_TEMPERATURE", "0.8")?,
            http_timeout_secs: parse_var(&lookup, "HTTP_TIMEOUT_SECS", "60")?,
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'"))
}
