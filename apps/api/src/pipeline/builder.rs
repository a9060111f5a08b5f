//! Prompt Builder — turns upstream stage outputs into the message list for each
//! language-model stage. Pure string assembly, no I/O.

use crate::keywords::{render_competitors, render_keyword_list};
use crate::models::{ContentRecord, RankedKeyword, SearchResult};
use crate::pipeline::prompts::*;
use crate::providers::ChatMessage;

/// Fills `{name}` slots in a single left-to-right pass, so text substituted
/// into one slot is never re-scanned for another.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let slot = after
            .find('}')
            .map(|close| &after[..close])
            .and_then(|name| values.iter().find(|(key, _)| *key == name));

        match slot {
            Some((key, value)) => {
                out.push_str(value);
                rest = &after[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn messages(system: &str, user: String) -> Vec<ChatMessage> {
    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

/// Competitor analysis over every successfully fetched page body.
pub fn analysis_messages(topic: &str, pages: &[ContentRecord]) -> Vec<ChatMessage> {
    let web_content = pages
        .iter()
        .filter(|p| p.fetch_succeeded && !p.body_text.is_empty())
        .enumerate()
        .map(|(i, p)| format!("WEB CONTENT {}\n{}", i + 1, p.body_text))
        .collect::<Vec<_>>()
        .join("\n");

    messages(
        ANALYSIS_SYSTEM,
        fill_template(
            ANALYSIS_PROMPT_TEMPLATE,
            &[("topic", topic), ("web_content", &web_content)],
        ),
    )
}

pub fn plan_messages(
    content_analysis: &str,
    topic: &str,
    keywords: &[RankedKeyword],
) -> Vec<ChatMessage> {
    let keywords = render_keyword_list(keywords);
    messages(
        PLAN_SYSTEM,
        fill_template(
            PLAN_PROMPT_TEMPLATE,
            &[
                ("topic", topic),
                ("keywords", &keywords),
                ("content_analysis", content_analysis),
            ],
        ),
    )
}

pub fn draft_messages(content_plan: &str, content_analysis: &str) -> Vec<ChatMessage> {
    messages(
        DRAFT_SYSTEM,
        fill_template(
            DRAFT_PROMPT_TEMPLATE,
            &[
                ("content_plan", content_plan),
                ("content_analysis", content_analysis),
            ],
        ),
    )
}

pub fn proofread_messages(
    content_draft: &str,
    content_plan: &str,
    content_analysis: &str,
) -> Vec<ChatMessage> {
    messages(
        PROOFREAD_SYSTEM,
        fill_template(
            PROOFREAD_PROMPT_TEMPLATE,
            &[
                ("content_draft", content_draft),
                ("content_plan", content_plan),
                ("content_analysis", content_analysis),
            ],
        ),
    )
}

pub fn seo_messages(proofread_draft: &str, keywords: &[RankedKeyword]) -> Vec<ChatMessage> {
    let keywords = render_keyword_list(keywords);
    messages(
        SEO_SYSTEM,
        fill_template(
            SEO_PROMPT_TEMPLATE,
            &[("content", proofread_draft), ("keywords", &keywords)],
        ),
    )
}

pub fn final_messages(
    proofread_draft: &str,
    seo_recommendations: &str,
    keywords: &[RankedKeyword],
    competitors: &[SearchResult],
    content_analysis: &str,
) -> Vec<ChatMessage> {
    let keywords = render_keyword_list(keywords);
    let competitors = render_competitors(competitors);
    messages(
        FINAL_SYSTEM,
        fill_template(
            FINAL_PROMPT_TEMPLATE,
            &[
                ("content", proofread_draft),
                ("seo_recommendations", seo_recommendations),
                ("keywords", &keywords),
                ("competitors", &competitors),
                ("content_analysis", content_analysis),
            ],
        ),
    )
}
