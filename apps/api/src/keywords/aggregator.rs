//! Keyword Aggregator — combines per-competitor keyword lists into a ranked shortlist.
//!
//! Pure, deterministic, no I/O. Ties are always broken by first-encounter order
//! (URL order, then row order within a URL) so repeated runs over the same input
//! produce identical output.

use std::collections::{HashMap, HashSet};

use crate::models::{KeywordRecord, RankedKeyword};

/// How many highest-volume rows are admitted regardless of frequency.
pub const TOP_BY_VOLUME: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Frequency table
// ────────────────────────────────────────────────────────────────────────────

/// Occurrence counts per distinct keyword, remembering first-seen order.
struct FrequencyTable<'a> {
    order: Vec<&'a str>,
    counts: HashMap<&'a str, u32>,
}

impl<'a> FrequencyTable<'a> {
    fn build(records: &[&'a KeywordRecord]) -> Self {
        let mut order = Vec::new();
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for &record in records {
            let count = counts.entry(record.keyword.as_str()).or_insert_with(|| {
                order.push(record.keyword.as_str());
                0
            });
            *count += 1;
        }
        Self { order, counts }
    }

    fn frequency(&self, keyword: &str) -> u32 {
        self.counts.get(keyword).copied().unwrap_or(0)
    }

    /// Highest and second-highest distinct frequency (0 when there is only one tier).
    fn top_tiers(&self) -> Option<(u32, u32)> {
        let mut tiers: Vec<u32> = self.counts.values().copied().collect();
        tiers.sort_unstable_by(|a, b| b.cmp(a));
        tiers.dedup();
        let max = *tiers.first()?;
        Some((max, tiers.get(1).copied().unwrap_or(0)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation
// ────────────────────────────────────────────────────────────────────────────

/// Selects and ranks target keywords from every competitor's keyword list.
///
/// Algorithm:
/// 1. frequency = occurrences of each keyword across all lists
/// 2. set A = keywords in the highest or second-highest frequency tier;
///    when the highest tier is exactly 2, every keyword with frequency 1 or 2
/// 3. set B = the `TOP_BY_VOLUME` highest-volume rows across all lists
/// 4. final = A ∪ B, each with its first-seen search volume
/// 5. sort by (frequency desc, search volume desc)
pub fn aggregate_keywords(per_url: &[Vec<KeywordRecord>]) -> Vec<RankedKeyword> {
    let records: Vec<&KeywordRecord> = per_url.iter().flatten().collect();
    let table = FrequencyTable::build(&records);

    let Some((max_freq, second_freq)) = table.top_tiers() else {
        return Vec::new();
    };

    let in_tier_set = |freq: u32| {
        // The max == 2 case also admits frequency 1, unlike every other max.
        if max_freq == 2 {
            freq == 1 || freq == 2
        } else {
            freq == max_freq || freq == second_freq
        }
    };

    let mut by_volume = records.clone();
    by_volume.sort_by(|a, b| b.search_volume.cmp(&a.search_volume));
    let top_volume: HashSet<&str> = by_volume
        .iter()
        .take(TOP_BY_VOLUME)
        .map(|r| r.keyword.as_str())
        .collect();

    let mut first_volume: HashMap<&str, u64> = HashMap::new();
    for record in &records {
        first_volume
            .entry(record.keyword.as_str())
            .or_insert(record.search_volume);
    }

    let mut ranked: Vec<RankedKeyword> = table
        .order
        .iter()
        .filter(|kw| in_tier_set(table.frequency(kw)) || top_volume.contains(*kw))
        .map(|kw| RankedKeyword {
            keyword: kw.to_string(),
            search_volume: first_volume.get(kw).copied().unwrap_or(0),
            frequency: table.frequency(kw),
        })
        .collect();

    // Stable sort keeps first-encounter order among exact ties.
    ranked.sort_by(|a, b| {
        b.frequency
            .cmp(&a.frequency)
            .then(b.search_volume.cmp(&a.search_volume))
    });

    ranked
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
