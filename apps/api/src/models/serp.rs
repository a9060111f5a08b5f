use serde::{Deserialize, Serialize};

/// One organic result from the search engine results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// 1-based rank on the results page.
    pub position: u32,
    pub url: String,
    pub title: String,
}
