use serde::{Deserialize, Serialize};

/// A keyword a competitor URL ranks for, as reported by the keyword-metrics provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub keyword: String,
    pub search_volume: u64,
    pub position: u32,
}

impl KeywordRecord {
    pub fn new(keyword: impl Into<String>, search_volume: u64, position: u32) -> Self {
        Self {
            keyword: keyword.into(),
            search_volume,
            position,
        }
    }
}

/// A keyword selected for targeting, with its aggregate frequency across competitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedKeyword {
    pub keyword: String,
    pub search_volume: u64,
    pub frequency: u32,
}
