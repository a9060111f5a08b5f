use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Failure of a single call to an external collaborator.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Missing API key: {0} is not set")]
    MissingApiKey(&'static str),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Provider returned empty content")]
    EmptyContent,
}

impl ProviderError {
    /// True for transport-level failures (connect, timeout, TLS), as opposed
    /// to the provider answering with an error.
    pub fn is_network(&self) -> bool {
        matches!(self, ProviderError::Network(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Parse(err.to_string())
    }
}

/// Reads a required key or fails the call that needs it.
pub(crate) fn require_key<'a>(key: &'a Option<String>, name: &'static str) -> Result<&'a str> {
    key.as_deref().ok_or(ProviderError::MissingApiKey(name))
}
