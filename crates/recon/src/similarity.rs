//! Similarity scoring on the 0–100 scale used by thresholds and reports.

use strsim::normalized_levenshtein;

use crate::model::Quantity;
use crate::normalize::round_dp;

/// Token-order-insensitive string similarity.
///
/// Lowercases, tokenizes on non-alphanumeric runs, sorts the tokens and
/// compares the normalized forms, so "blue arctic" scores 100 against
/// "Arctic Blue". Two empty inputs are a vacuous match (100).
pub fn string_similarity(a: &str, b: &str) -> f64 {
    let a = token_sort(a);
    let b = token_sort(b);
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    (normalized_levenshtein(&a, &b) * 100.0).round()
}

fn token_sort(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut tokens: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Relative closeness of two quantities.
///
/// Both missing → 100 (nothing to compare). A single missing side is scored
/// as 0 — that substitution is this function's documented policy, not the
/// caller's. Otherwise `100 − |a−b| / max(|a|,|b|,1) × 100`, floored at 0
/// and rounded to 2 decimals. The denominator floor of 1 keeps small and
/// zero values from dividing by zero.
pub fn quantity_similarity(a: Quantity, b: Quantity) -> f64 {
    if a.is_missing() && b.is_missing() {
        return 100.0;
    }
    let a = a.as_f64().unwrap_or(0.0);
    let b = b.as_f64().unwrap_or(0.0);
    if a == 0.0 && b == 0.0 {
        return 100.0;
    }
    let denom = a.abs().max(b.abs()).max(1.0);
    let pct_diff = (a - b).abs() / denom * 100.0;
    round_dp((100.0 - pct_diff).max(0.0), 2)
}
