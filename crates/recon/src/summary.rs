use std::collections::HashSet;

use crate::model::{ConsumptionVerdict, MatchOutcome, MatchStatus, ReconcileSummary, VendorVerdict};

/// Fold outcomes into summary counters.
///
/// Single pass over final outcome state; no rule is re-evaluated. With
/// `dedup_by_key` the first outcome per baseline material key (in the given
/// order) is counted and later duplicates are skipped.
pub fn summarize(outcomes: &[MatchOutcome], dedup_by_key: bool) -> ReconcileSummary {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut summary = ReconcileSummary {
        total: 0,
        unmatched: 0,
        component_excluded: 0,
        vendor_not_found: 0,
        baseline_higher: 0,
        consumption_ok: 0,
    };

    for outcome in outcomes {
        if dedup_by_key && !seen.insert(outcome.material.as_str()) {
            continue;
        }

        summary.total += 1;
        if matches!(outcome.status, MatchStatus::Unmatched { .. }) {
            summary.unmatched += 1;
        }
        if outcome.component_excluded {
            summary.component_excluded += 1;
        }
        if outcome.vendor_verdict == VendorVerdict::NotFound {
            summary.vendor_not_found += 1;
        }
        match outcome.consumption_verdict {
            ConsumptionVerdict::BaselineHigher { .. } => summary.baseline_higher += 1,
            ConsumptionVerdict::Ok { .. } => summary.consumption_ok += 1,
            ConsumptionVerdict::MissingValue | ConsumptionVerdict::NotApplicable => {}
        }
    }

    summary
}
