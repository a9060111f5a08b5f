//! Plain-text renderings of keyword and competitor tables for prompt interpolation.

use crate::models::{RankedKeyword, SearchResult};

/// One `- keyword (search volume: N, frequency: F)` line per keyword.
pub fn render_keyword_list(keywords: &[RankedKeyword]) -> String {
    if keywords.is_empty() {
        return "(no keyword data available)".to_string();
    }
    keywords
        .iter()
        .map(|k| {
            format!(
                "- {} (search volume: {}, frequency: {})",
                k.keyword, k.search_volume, k.frequency
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One `position. title (url)` line per search result.
pub fn render_competitors(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| format!("{}. {} ({})", r.position, r.title, r.url))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lines_keep_order() {
        let keywords = vec![
            RankedKeyword {
                keyword: "rust web server".to_string(),
                search_volume: 2400,
                frequency: 3,
            },
            RankedKeyword {
                keyword: "axum tutorial".to_string(),
                search_volume: 880,
                frequency: 1,
            },
        ];
        assert_eq!(
            render_keyword_list(&keywords),
            "- rust web server (search volume: 2400, frequency: 3)\n\
             - axum tutorial (search volume: 880, frequency: 1)"
        );
    }

    #[test]
    fn test_empty_keyword_list_is_explicit() {
        assert_eq!(render_keyword_list(&[]), "(no keyword data available)");
    }

    #[test]
    fn test_competitor_lines() {
        let results = vec![SearchResult {
            position: 1,
            url: "https://example.com/a".to_string(),
            title: "First".to_string(),
        }];
        assert_eq!(render_competitors(&results), "1. First (https://example.com/a)");
    }
}
