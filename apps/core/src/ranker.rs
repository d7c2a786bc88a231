use serde::{Deserialize, Serialize};

use crate::matcher;
use crate::model::{CatalogEntry, RankedResult};
use crate::weights::UsageWeights;

pub const DEFAULT_LIMIT: usize = 20;

/// How surviving matches are scored. The two modes are mutually exclusive;
/// bigram similarity ignores usage counts entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    #[default]
    Frequency,
    BigramSimilarity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankOptions {
    pub limit: usize,
    pub mode: ScoringMode,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            mode: ScoringMode::Frequency,
        }
    }
}

/// Filters the catalog through the subsequence matcher, scores survivors,
/// and returns at most `options.limit` results ordered by descending score
/// with alphabetical path order breaking ties.
///
/// Pure function of its inputs; recomputed from scratch on every
/// keystroke, so two calls with unchanged inputs return identical lists.
pub fn rank(
    catalog: &[CatalogEntry],
    query: &str,
    weights: &UsageWeights,
    options: &RankOptions,
) -> Vec<RankedResult> {
    if options.limit == 0 || catalog.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<RankedResult> = catalog
        .iter()
        .filter(|entry| matcher::matches(query, entry))
        .map(|entry| RankedResult {
            score: score_entry(entry, query, weights, options.mode),
            entry: entry.clone(),
        })
        .collect();

    results.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.entry.path().cmp(b.entry.path()))
    });

    results.truncate(options.limit);
    results
}

fn score_entry(
    entry: &CatalogEntry,
    query: &str,
    weights: &UsageWeights,
    mode: ScoringMode,
) -> f64 {
    match mode {
        ScoringMode::Frequency => weights.get(entry.path()),
        ScoringMode::BigramSimilarity => {
            bigram_similarity(&query.to_lowercase(), entry.lower_leaf())
        }
    }
}

/// Dice-style bigram overlap between two strings, in `[0, 1]`. Each bigram
/// of one string can satisfy at most one bigram of the other, so repeated
/// pairs cannot push the score past 1.
fn bigram_similarity(a: &str, b: &str) -> f64 {
    let pairs_a = bigrams(a);
    let mut pairs_b = bigrams(b);
    let union = pairs_a.len() + pairs_b.len();
    if union == 0 {
        return 0.0;
    }

    let mut hits = 0usize;
    for pair in pairs_a {
        if let Some(position) = pairs_b.iter().position(|other| *other == pair) {
            pairs_b.swap_remove(position);
            hits += 1;
        }
    }

    (2.0 * hits as f64) / union as f64
}

fn bigrams(text: &str) -> Vec<[char; 2]> {
    let chars: Vec<char> = text.chars().collect();
    chars.windows(2).map(|pair| [pair[0], pair[1]]).collect()
}
