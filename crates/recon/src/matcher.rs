use std::collections::HashMap;

use crate::model::Record;
use crate::similarity::string_similarity;

/// Lookup structure over the downstream side, built once per run and
/// read-only thereafter.
///
/// Duplicate keys are preserved; lookups bind to the first occurrence.
pub struct DownstreamIndex<'a> {
    rows: &'a [Record],
    by_key: HashMap<String, Vec<usize>>,
    /// Every key value in row order — the fuzzy-fallback universe.
    keys: Vec<String>,
}

/// Resolution of one baseline record against the index. Matched variants
/// borrow the downstream record; nothing is copied or mutated.
#[derive(Debug)]
pub enum MatchResult<'a> {
    Exact { row: &'a Record },
    Fuzzy { row: &'a Record, score: f64 },
    Unmatched { best_score: Option<f64> },
}

impl<'a> DownstreamIndex<'a> {
    pub fn build(rows: &'a [Record], key_column: &str) -> Self {
        let mut by_key: HashMap<String, Vec<usize>> = HashMap::new();
        let mut keys = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let key = row.field(key_column).to_string();
            by_key.entry(key.clone()).or_default().push(i);
            keys.push(key);
        }
        Self { rows, by_key, keys }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Resolve a baseline key: exact lookup first, fuzzy fallback against
    /// the whole key universe otherwise. Never fails — an unresolvable key
    /// is a normal `Unmatched` result carrying the best score seen.
    pub fn find(&self, baseline_key: &str, threshold: u8) -> MatchResult<'a> {
        if !baseline_key.is_empty() {
            if let Some(indices) = self.by_key.get(baseline_key) {
                return MatchResult::Exact {
                    row: &self.rows[indices[0]],
                };
            }
        }

        let mut best: Option<(usize, f64)> = None;
        for (i, key) in self.keys.iter().enumerate() {
            let score = string_similarity(baseline_key, key);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((i, score));
            }
        }

        match best {
            Some((i, score)) if score >= threshold as f64 => MatchResult::Fuzzy {
                row: &self.rows[i],
                score,
            },
            Some((_, score)) => MatchResult::Unmatched {
                best_score: Some(score),
            },
            None => MatchResult::Unmatched { best_score: None },
        }
    }
}
