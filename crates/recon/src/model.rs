use std::collections::HashMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single row from either side, cell values keyed by column name.
///
/// A column absent from the source is absent from the map — distinct from a
/// present-but-empty cell. Values are stored as read; access via [`Record::field`]
/// always yields the trimmed form.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub fields: HashMap<String, String>,
}

impl Record {
    /// Trimmed value of the named field, or the empty string when the field
    /// is absent or blank.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(|v| v.trim()).unwrap_or("")
    }
}

/// Pre-loaded records for one reconciliation run.
pub struct ReconcileInput {
    pub baseline: Vec<Record>,
    pub downstream: Vec<Record>,
}

// ---------------------------------------------------------------------------
// Quantities
// ---------------------------------------------------------------------------

/// A consumption quantity. `Missing` covers absent, blank, and unparseable
/// raw values — it never compares equal to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Quantity {
    Value(f64),
    Missing,
}

impl Quantity {
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

// ---------------------------------------------------------------------------
// Match status + verdicts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MatchStatus {
    /// Matching was never attempted (the record left scope before lookup).
    Skipped,
    /// No downstream record qualified; carries the best fuzzy score seen,
    /// `None` when the downstream key universe was empty.
    Unmatched { best_score: Option<f64> },
    Exact,
    Fuzzy { score: f64 },
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skipped => write!(f, "skipped"),
            Self::Unmatched { .. } => write!(f, "unmatched"),
            Self::Exact => write!(f, "exact"),
            Self::Fuzzy { .. } => write!(f, "fuzzy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorVerdict {
    /// Baseline and downstream vendor references are equal after trimming.
    Exact,
    /// Downstream vendor appears inside the baseline material description.
    FoundInDescription,
    NotFound,
    /// Record was excluded or unmatched; the check never ran.
    NotApplicable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ConsumptionVerdict {
    /// Downstream >= baseline, the accepted state. `difference` is signed
    /// (downstream − baseline), `score` is the closeness score.
    Ok { difference: f64, score: f64 },
    BaselineHigher { difference: f64, score: f64 },
    /// Either side had no usable quantity; no numeric comparison was made.
    MissingValue,
    /// Record was excluded or unmatched; the comparison never ran.
    NotApplicable,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Downstream fields captured at match time. Values are copied out of the
/// matched record; the caller's rows are never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct DownstreamFields {
    pub material: String,
    pub vendor: String,
    pub color: String,
    pub consumption: Quantity,
}

/// One outcome per baseline record, write-once after evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    pub material: String,
    pub description: String,
    pub component: String,
    pub vendor: String,
    pub color: String,
    pub consumption: Quantity,
    pub status: MatchStatus,
    pub component_excluded: bool,
    pub downstream: Option<DownstreamFields>,
    pub vendor_verdict: VendorVerdict,
    pub consumption_verdict: ConsumptionVerdict,
    pub material_similarity: f64,
    pub color_similarity: f64,
    pub notes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Summary + result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub total: usize,
    pub unmatched: usize,
    pub component_excluded: usize,
    pub vendor_not_found: usize,
    pub baseline_higher: usize,
    pub consumption_ok: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileMeta {
    pub config_name: String,
    pub threshold: u8,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileResult {
    pub meta: ReconcileMeta,
    pub summary: ReconcileSummary,
    /// One outcome per baseline row, in input order.
    pub outcomes: Vec<MatchOutcome>,
    /// The subset of `outcomes` with status `Unmatched`, in input order.
    pub unmatched: Vec<MatchOutcome>,
}
