use serde::{Deserialize, Serialize};

use crate::models::keyword::KeywordRecord;
use crate::models::serp::SearchResult;

/// Prefix marking a body that carries a fetch failure instead of page text.
pub const ERROR_MARKER: &str = "ERROR:";

/// A competitor page after keyword lookup and content fetch.
///
/// `body_text` holds either the page text or an `ERROR:` marker; `fetch_succeeded`
/// is false exactly when it holds the marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub url: String,
    pub title: String,
    pub position: u32,
    pub keyword_records: Vec<KeywordRecord>,
    pub body_text: String,
    pub fetch_succeeded: bool,
}

impl ContentRecord {
    pub fn new(result: &SearchResult, keyword_records: Vec<KeywordRecord>, body_text: String) -> Self {
        let fetch_succeeded = !is_error_marker(&body_text);
        Self {
            url: result.url.clone(),
            title: result.title.clone(),
            position: result.position,
            keyword_records,
            body_text,
            fetch_succeeded,
        }
    }
}

pub fn is_error_marker(text: &str) -> bool {
    text.starts_with(ERROR_MARKER)
}
